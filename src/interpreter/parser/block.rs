use std::iter::Peekable;
use std::rc::Rc;

use crate::{
    ast::Node,
    interpreter::{
        lexer::Token,
        parser::{
            core::{parse_expression, ParseResult},
            statement,
            utils::{expect_token, expected, parse_comma_separated, parse_identifier},
        },
    },
    position::Span,
};

/// Parses a braced statement block.
///
/// Grammar: `block := "{" statements "}"`
///
/// # Errors
/// - `SyntaxError`: The braces are unbalanced or a statement fails.
pub(in crate::interpreter::parser) fn parse_block<'a, I>(
    tokens: &mut Peekable<I>,
) -> ParseResult<Node>
where
    I: Iterator<Item = &'a (Token, Span)> + Clone,
{
    let open = expect_token(tokens, &Token::LBrace, "'{'")?;
    let statements = statement::parse_statements(tokens, Some(&Token::RBrace))?;
    let close = expect_token(tokens, &Token::RBrace, "'}'")?;
    Ok(Node::Block {
        statements,
        span: open.to(close),
    })
}

/// Parses a control-flow body: a braced block or a single `:` statement.
/// A block may also follow the colon, so `loop: { ... }` parses.
fn parse_body<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
where
    I: Iterator<Item = &'a (Token, Span)> + Clone,
{
    match tokens.peek() {
        Some((Token::Colon, _)) => {
            tokens.next();
            if matches!(tokens.peek(), Some((Token::LBrace, _))) {
                parse_block(tokens)
            } else {
                statement::parse_statement(tokens)
            }
        }
        Some((Token::LBrace, _)) => parse_block(tokens),
        _ => Err(expected(tokens, "':' or '{'")),
    }
}

/// Parses a control-flow header expression.
///
/// A header followed by a braced body may contain a bare range, so the
/// expression is first tried with `:` enabled; if that parse does not end
/// on `{`, the header is re-parsed with `:` disabled, leaving the colon to
/// introduce a single-statement body.
fn parse_header<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
where
    I: Iterator<Item = &'a (Token, Span)> + Clone,
{
    let mut lookahead = tokens.clone();
    if let Ok(header) = parse_expression(&mut lookahead, true) {
        if matches!(lookahead.peek(), Some((Token::LBrace, _))) {
            *tokens = lookahead;
            return Ok(header);
        }
    }
    parse_expression(tokens, false)
}

/// Parses `if`, including any `else if` chain.
///
/// Grammar: `if := "if" expr body (sep* "else" (if | body))?`
///
/// # Errors
/// - `SyntaxError`: A malformed header, body, or `else` arm.
pub(in crate::interpreter::parser) fn parse_if<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
where
    I: Iterator<Item = &'a (Token, Span)> + Clone,
{
    let start = expect_token(tokens, &Token::If, "'if'")?;
    let condition = parse_header(tokens)?;
    let body = parse_body(tokens)?;
    let else_body = parse_else(tokens)?;
    let end = else_body.as_ref().map_or(body.span(), |e| e.span());
    Ok(Node::If {
        condition: Box::new(condition),
        body: Box::new(body),
        else_body: else_body.map(Box::new),
        span: start.to(end),
    })
}

/// Parses the optional `else` arm. Separators before `else` are only
/// consumed when an `else` actually follows them.
fn parse_else<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Node>>
where
    I: Iterator<Item = &'a (Token, Span)> + Clone,
{
    let mut lookahead = tokens.clone();
    while matches!(lookahead.peek(), Some((Token::Separator, _))) {
        lookahead.next();
    }
    if !matches!(lookahead.peek(), Some((Token::Else, _))) {
        return Ok(None);
    }
    lookahead.next();
    *tokens = lookahead;

    let body = if matches!(tokens.peek(), Some((Token::If, _))) {
        parse_if(tokens)?
    } else {
        parse_body(tokens)?
    };
    Ok(Some(body))
}

/// Parses a `for` loop.
///
/// Grammar: `for := "for" IDENT "in" expr body`
///
/// # Errors
/// - `SyntaxError`: A malformed binding, iterable, or body.
pub(in crate::interpreter::parser) fn parse_for<'a, I>(
    tokens: &mut Peekable<I>,
) -> ParseResult<Node>
where
    I: Iterator<Item = &'a (Token, Span)> + Clone,
{
    let start = expect_token(tokens, &Token::For, "'for'")?;
    let (binding, _) = parse_identifier(tokens)?;
    expect_token(tokens, &Token::In, "'in'")?;
    let iterable = parse_header(tokens)?;
    let body = parse_body(tokens)?;
    let span = start.to(body.span());
    Ok(Node::For {
        binding,
        iterable: Box::new(iterable),
        body: Box::new(body),
        span,
    })
}

/// Parses a `while` loop.
///
/// Grammar: `while := "while" expr body`
///
/// # Errors
/// - `SyntaxError`: A malformed condition or body.
pub(in crate::interpreter::parser) fn parse_while<'a, I>(
    tokens: &mut Peekable<I>,
) -> ParseResult<Node>
where
    I: Iterator<Item = &'a (Token, Span)> + Clone,
{
    let start = expect_token(tokens, &Token::While, "'while'")?;
    let condition = parse_header(tokens)?;
    let body = parse_body(tokens)?;
    let span = start.to(body.span());
    Ok(Node::While {
        condition: Box::new(condition),
        body: Box::new(body),
        span,
    })
}

/// Parses a `loop`.
///
/// Grammar: `loop := "loop" body`
///
/// # Errors
/// - `SyntaxError`: A malformed body.
pub(in crate::interpreter::parser) fn parse_loop<'a, I>(
    tokens: &mut Peekable<I>,
) -> ParseResult<Node>
where
    I: Iterator<Item = &'a (Token, Span)> + Clone,
{
    let start = expect_token(tokens, &Token::Loop, "'loop'")?;
    let body = parse_body(tokens)?;
    let span = start.to(body.span());
    Ok(Node::Loop {
        body: Box::new(body),
        span,
    })
}

/// Parses a `fn` definition, in block or arrow form.
///
/// Grammar: `fn := "fn" IDENT "(" params ")" (block | "->" expression)`
///
/// # Errors
/// - `SyntaxError`: A malformed name, parameter list, or body.
pub(in crate::interpreter::parser) fn parse_fn<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
where
    I: Iterator<Item = &'a (Token, Span)> + Clone,
{
    let start = expect_token(tokens, &Token::Fn, "'fn'")?;
    let (name, _) = parse_identifier(tokens)?;
    expect_token(tokens, &Token::LParen, "'('")?;
    let (params, _) = parse_comma_separated(
        tokens,
        |t| parse_identifier(t).map(|(name, _)| name),
        &Token::RParen,
        "')'",
    )?;

    let body = match tokens.peek() {
        Some((Token::Arrow, _)) => {
            tokens.next();
            parse_expression(tokens, true)?
        }
        Some((Token::LBrace, _)) => parse_block(tokens)?,
        _ => return Err(expected(tokens, "'->' or '{'")),
    };
    let span = start.to(body.span());
    Ok(Node::FuncDef {
        name,
        params,
        body: Rc::new(body),
        span,
    })
}
