use std::iter::Peekable;

use crate::{
    ast::{AssignOp, Node},
    interpreter::{
        lexer::Token,
        parser::{
            binary,
            core::{parse_expression, ParseResult},
            utils::{expect_token, expected, parse_identifier, second},
        },
    },
    position::Span,
};

/// Parses statements until `closing` or the end of input.
///
/// Statements are separated by one or more newlines/`;`; leading and
/// trailing separators are skipped. The closing token, when present, is
/// left unconsumed for the caller.
///
/// Grammar: `statements := sep* (statement (sep+ statement)*)? sep*`
///
/// # Errors
/// - `SyntaxError`: A statement fails to parse, or two statements run
///   together without a separator.
pub(in crate::interpreter::parser) fn parse_statements<'a, I>(
    tokens: &mut Peekable<I>,
    closing: Option<&Token>,
) -> ParseResult<Vec<Node>>
where
    I: Iterator<Item = &'a (Token, Span)> + Clone,
{
    let mut statements = Vec::new();
    loop {
        while matches!(tokens.peek(), Some((Token::Separator, _))) {
            tokens.next();
        }
        match tokens.peek() {
            Some((Token::Eof, _)) | None => break,
            Some((token, _)) if closing == Some(token) => break,
            _ => {}
        }

        statements.push(parse_statement(tokens)?);

        match tokens.peek() {
            Some((Token::Separator | Token::Eof, _)) | None => {}
            Some((token, _)) if closing == Some(token) => {}
            _ => return Err(expected(tokens, "a newline or ';'")),
        }
    }
    Ok(statements)
}

/// Parses one statement.
///
/// Grammar: `statement := "return" expression? | "import" NAME | expression`
///
/// # Errors
/// - `SyntaxError`: The statement is malformed.
pub(in crate::interpreter::parser) fn parse_statement<'a, I>(
    tokens: &mut Peekable<I>,
) -> ParseResult<Node>
where
    I: Iterator<Item = &'a (Token, Span)> + Clone,
{
    match tokens.peek().copied() {
        Some((Token::Return, span)) => {
            let start = *span;
            tokens.next();
            let value = match tokens.peek() {
                Some((Token::Separator | Token::RBrace | Token::Eof, _)) | None => None,
                _ => Some(Box::new(parse_expression(tokens, true)?)),
            };
            let span = value.as_deref().map_or(start, |v| start.to(v.span()));
            Ok(Node::Return { value, span })
        }
        Some((Token::Import, span)) => {
            let start = *span;
            tokens.next();
            let (module, name_span) = parse_identifier(tokens)?;
            Ok(Node::Import {
                module,
                span: start.to(name_span),
            })
        }
        _ => parse_expression(tokens, true),
    }
}

/// Parses a declaration, an assignment, or falls through to the operator
/// ladder.
///
/// A plain expression and an assignment both start with an identifier; one
/// token of lookahead at the following operator disambiguates them.
///
/// Grammar: `binding := "let" NAME "=" expr
///                    | NAME ("=" | "+=" | "-=" | "*=" | "/=" | "%=" | "^=") expr
///                    | NAME ("++" | "--")
///                    | word_comparison`
///
/// # Errors
/// - `SyntaxError`: A malformed binding or expression.
pub(in crate::interpreter::parser) fn parse_binding<'a, I>(
    tokens: &mut Peekable<I>,
    colon: bool,
) -> ParseResult<Node>
where
    I: Iterator<Item = &'a (Token, Span)> + Clone,
{
    if let Some((Token::Let, span)) = tokens.peek().copied() {
        let start = *span;
        tokens.next();
        let (name, _) = parse_identifier(tokens)?;
        expect_token(tokens, &Token::Equals, "'='")?;
        let value = parse_expression(tokens, colon)?;
        let span = start.to(value.span());
        return Ok(Node::Declaration {
            name,
            value: Box::new(value),
            span,
        });
    }

    if let (Some((Token::Identifier(name), name_span)), Some((op_token, op_span))) =
        (tokens.peek().copied(), second(tokens))
    {
        if let Some(op) = assign_op(op_token) {
            let name = name.clone();
            let (name_span, op_span) = (*name_span, *op_span);
            tokens.next();
            tokens.next();

            if matches!(op, AssignOp::Inc | AssignOp::Dec) {
                return Ok(Node::Assignment {
                    name,
                    op,
                    value: None,
                    span: name_span.to(op_span),
                });
            }
            let value = parse_expression(tokens, colon)?;
            let span = name_span.to(value.span());
            return Ok(Node::Assignment {
                name,
                op,
                value: Some(Box::new(value)),
                span,
            });
        }
    }

    binary::parse_word_comparison(tokens, colon)
}

const fn assign_op(token: &Token) -> Option<AssignOp> {
    match token {
        Token::Equals => Some(AssignOp::Set),
        Token::PlusEq => Some(AssignOp::Add),
        Token::MinusEq => Some(AssignOp::Sub),
        Token::StarEq => Some(AssignOp::Mul),
        Token::SlashEq => Some(AssignOp::Div),
        Token::PercentEq => Some(AssignOp::Rem),
        Token::CaretEq => Some(AssignOp::Pow),
        Token::PlusPlus => Some(AssignOp::Inc),
        Token::MinusMinus => Some(AssignOp::Dec),
        _ => None,
    }
}
