use std::iter::Peekable;
use std::rc::Rc;

use crate::{
    ast::{BinaryOp, GroupOp, Node, StrPiece, UnaryOp},
    error::SyntaxError,
    interpreter::{
        lexer::{StrFragment, Token},
        parser::{
            block,
            core::{parse_expression, parse_fragment, ParseResult},
            utils::{expect_token, expected, parse_comma_separated, peek_span, second},
        },
    },
    position::Span,
};

/// Parses the unary-prefix level.
///
/// Prefix operators bind looser than `^`, so `-2 ^ 2` is `-(2 ^ 2)`.
///
/// Grammar: `unary := ("+" | "-" | "±" | "∓" | "√" | "∛" | "∜" | "∑" | "∏"
/// | "not") unary | power`
///
/// # Errors
/// - `SyntaxError`: The operand fails to parse.
pub(in crate::interpreter::parser) fn parse_unary<'a, I>(
    tokens: &mut Peekable<I>,
) -> ParseResult<Node>
where
    I: Iterator<Item = &'a (Token, Span)> + Clone,
{
    let op = match tokens.peek() {
        Some((Token::Plus, _)) => Some(UnaryOp::Pos),
        Some((Token::Minus, _)) => Some(UnaryOp::Neg),
        Some((Token::PlusMinus, _)) => Some(UnaryOp::PlusMinus),
        Some((Token::MinusPlus, _)) => Some(UnaryOp::MinusPlus),
        Some((Token::Sqrt, _)) => Some(UnaryOp::Sqrt),
        Some((Token::Cbrt, _)) => Some(UnaryOp::Cbrt),
        Some((Token::FourthRoot, _)) => Some(UnaryOp::FourthRoot),
        Some((Token::Sum, _)) => Some(UnaryOp::Sum),
        Some((Token::Product, _)) => Some(UnaryOp::Product),
        Some((Token::Not, _)) => Some(UnaryOp::Not),
        _ => None,
    };
    if let Some(op) = op {
        let start = peek_span(tokens);
        tokens.next();
        let operand = parse_unary(tokens)?;
        let span = start.to(operand.span());
        return Ok(Node::Unary {
            op,
            operand: Box::new(operand),
            span,
        });
    }
    parse_power(tokens)
}

/// Parses the power level.
///
/// `^` is right-associative: its right operand re-enters the unary level,
/// which swallows any further `^`. A trailing superscript run is an
/// implicit exponent, and a number directly followed by an identifier
/// multiplies implicitly, so `2x²` reads as `2 * x ^ 2`. The rewrite sits
/// at this level, above `*` and `/`, so `6 / 2x` divides by all of `2x`.
///
/// Grammar: `power := postfix (NUMBER-IDENT rewrite) ("^" unary | SUPERSCRIPT)*`
///
/// # Errors
/// - `SyntaxError`: An operand or superscript run fails to parse.
fn parse_power<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
where
    I: Iterator<Item = &'a (Token, Span)> + Clone,
{
    let mut left = parse_postfix(tokens)?;

    if matches!(left, Node::Number { .. })
        && matches!(tokens.peek(), Some((Token::Identifier(_), _)))
    {
        let right = parse_power(tokens)?;
        let span = left.span().to(right.span());
        return Ok(Node::Binary {
            lhs: Box::new(left),
            op: BinaryOp::Mul,
            rhs: Box::new(right),
            span,
        });
    }

    loop {
        match tokens.peek().copied() {
            Some((Token::Caret, _)) => {
                tokens.next();
                let right = parse_unary(tokens)?;
                let span = left.span().to(right.span());
                left = Node::Binary {
                    lhs: Box::new(left),
                    op: BinaryOp::Pow,
                    rhs: Box::new(right),
                    span,
                };
            }
            Some((Token::Superscript(run), run_span)) => {
                tokens.next();
                let exponent = parse_fragment(run)?;
                let span = left.span().to(*run_span);
                left = Node::Binary {
                    lhs: Box::new(left),
                    op: BinaryOp::Pow,
                    rhs: Box::new(exponent),
                    span,
                };
            }
            _ => break,
        }
    }
    Ok(left)
}

/// Parses the postfix level: factorial and degrees.
///
/// Grammar: `postfix := call ("!" | "°")*`
///
/// # Errors
/// - `SyntaxError`: The operand fails to parse.
fn parse_postfix<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
where
    I: Iterator<Item = &'a (Token, Span)> + Clone,
{
    let mut node = parse_call(tokens)?;
    loop {
        let op = match tokens.peek() {
            Some((Token::Bang, _)) => UnaryOp::Factorial,
            Some((Token::Degree, _)) => UnaryOp::Degrees,
            _ => break,
        };
        let op_span = peek_span(tokens);
        tokens.next();
        let span = node.span().to(op_span);
        node = Node::Unary {
            op,
            operand: Box::new(node),
            span,
        };
    }
    Ok(node)
}

/// Parses a call, an equation-form function definition, or an atom, plus
/// any trailing `[prop]` accesses.
///
/// `f(x, y) = expr` looks exactly like a call up to the `=`; when one
/// follows, the arguments are reinterpreted as parameter names and the
/// whole construct becomes a function definition.
///
/// Grammar: `call := IDENT "(" args ")" ("=" expression)? | atom` followed
/// by `("[" expression "]")*`
///
/// # Errors
/// - `SyntaxError`: Malformed arguments, a non-identifier where a
///   parameter name is needed, or a malformed atom.
fn parse_call<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
where
    I: Iterator<Item = &'a (Token, Span)> + Clone,
{
    let node = match (tokens.peek().copied(), second(tokens)) {
        (Some((Token::Identifier(name), name_span)), Some((Token::LParen, _))) => {
            let (name, name_span) = (name.clone(), *name_span);
            tokens.next();
            tokens.next();
            let (args, close_span) =
                parse_comma_separated(tokens, |t| parse_expression(t, true), &Token::RParen, "')'")?;

            if matches!(tokens.peek(), Some((Token::Equals, _))) {
                tokens.next();
                let params = args
                    .into_iter()
                    .map(|arg| match arg {
                        Node::Identifier { name, .. } => Ok(name),
                        other => Err(SyntaxError::new("a parameter name", other.span())),
                    })
                    .collect::<ParseResult<Vec<_>>>()?;
                let body = parse_expression(tokens, true)?;
                let span = name_span.to(body.span());
                Node::FuncDef {
                    name,
                    params,
                    body: Rc::new(body),
                    span,
                }
            } else {
                Node::FuncCall {
                    name,
                    name_span,
                    args,
                    span: name_span.to(close_span),
                }
            }
        }
        _ => parse_atom(tokens)?,
    };
    parse_trailing_index(tokens, node)
}

fn parse_trailing_index<'a, I>(tokens: &mut Peekable<I>, mut node: Node) -> ParseResult<Node>
where
    I: Iterator<Item = &'a (Token, Span)> + Clone,
{
    while matches!(tokens.peek(), Some((Token::LBracket, _))) {
        tokens.next();
        let prop = parse_expression(tokens, true)?;
        let close = expect_token(tokens, &Token::RBracket, "']'")?;
        let span = node.span().to(close);
        node = Node::PropAccess {
            target: Box::new(node),
            prop: Box::new(prop),
            span,
        };
    }
    Ok(node)
}

/// Parses an atom: a literal, a name, a bracketed form, or one of the
/// keyword constructs.
///
/// Grammar: `atom := NUMBER | BOOLEAN | STRING | IDENT | "(" expr ")"
/// | "|" expr "|" | "⌊" expr "⌋" | "⌈" expr "⌉" | "[" ... "]" | "⟨" ... "⟩"
/// | if | for | while | loop | fn | "await" call`
///
/// # Errors
/// - `SyntaxError`: No atom starts here.
fn parse_atom<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
where
    I: Iterator<Item = &'a (Token, Span)> + Clone,
{
    match tokens.peek().copied() {
        Some((Token::Number(value), span)) => {
            let node = Node::Number {
                value: *value,
                span: *span,
            };
            tokens.next();
            Ok(node)
        }
        Some((Token::Bool(value), span)) => {
            let node = Node::Boolean {
                value: *value,
                span: *span,
            };
            tokens.next();
            Ok(node)
        }
        Some((Token::Str(fragments), span)) => {
            let span = *span;
            tokens.next();
            parse_string(fragments, span)
        }
        Some((Token::Identifier(name), span)) => {
            let node = Node::Identifier {
                name: name.clone(),
                span: *span,
            };
            tokens.next();
            Ok(node)
        }
        Some((Token::LParen, _)) => {
            tokens.next();
            let expr = parse_expression(tokens, true)?;
            expect_token(tokens, &Token::RParen, "')'")?;
            Ok(expr)
        }
        Some((Token::Pipe, span)) => parse_grouping(tokens, *span, GroupOp::Abs, &Token::Pipe, "'|'"),
        Some((Token::LFloor, span)) => {
            parse_grouping(tokens, *span, GroupOp::Floor, &Token::RFloor, "'⌋'")
        }
        Some((Token::LCeil, span)) => {
            parse_grouping(tokens, *span, GroupOp::Ceil, &Token::RCeil, "'⌉'")
        }
        Some((Token::LBracket, span)) => parse_bracket(tokens, *span),
        Some((Token::LAngle, span)) => {
            let span = *span;
            tokens.next();
            let (components, close) =
                parse_comma_separated(tokens, |t| parse_expression(t, true), &Token::RAngle, "'⟩'")?;
            Ok(Node::Vector {
                components,
                span: span.to(close),
            })
        }
        Some((Token::If, _)) => block::parse_if(tokens),
        Some((Token::For, _)) => block::parse_for(tokens),
        Some((Token::While, _)) => block::parse_while(tokens),
        Some((Token::Loop, _)) => block::parse_loop(tokens),
        Some((Token::Fn, _)) => block::parse_fn(tokens),
        Some((Token::Await, span)) => {
            let start = *span;
            tokens.next();
            let operand = parse_call(tokens)?;
            let span = start.to(operand.span());
            Ok(Node::Await {
                operand: Box::new(operand),
                span,
            })
        }
        _ => Err(expected(tokens, "an expression")),
    }
}

fn parse_grouping<'a, I>(
    tokens: &mut Peekable<I>,
    start: Span,
    op: GroupOp,
    closing: &Token,
    what: &str,
) -> ParseResult<Node>
where
    I: Iterator<Item = &'a (Token, Span)> + Clone,
{
    tokens.next();
    let operand = parse_expression(tokens, true)?;
    let close = expect_token(tokens, closing, what)?;
    Ok(Node::Grouping {
        op,
        operand: Box::new(operand),
        span: start.to(close),
    })
}

/// Builds a string node, sub-parsing each interpolated token run.
fn parse_string(fragments: &[StrFragment], span: Span) -> ParseResult<Node> {
    let mut pieces = Vec::with_capacity(fragments.len());
    for fragment in fragments {
        match fragment {
            StrFragment::Literal(text) => pieces.push(StrPiece::Literal(text.clone())),
            StrFragment::Tokens(run) => pieces.push(StrPiece::Expr(parse_fragment(run)?)),
        }
    }
    Ok(Node::Str { pieces, span })
}

/// Parses a bracket literal. A non-empty literal whose elements are all
/// themselves bracket literals is a matrix; anything else is a list.
fn parse_bracket<'a, I>(tokens: &mut Peekable<I>, start: Span) -> ParseResult<Node>
where
    I: Iterator<Item = &'a (Token, Span)> + Clone,
{
    tokens.next();
    let (items, close) =
        parse_comma_separated(tokens, |t| parse_expression(t, true), &Token::RBracket, "']'")?;
    let span = start.to(close);

    if !items.is_empty() && items.iter().all(|item| matches!(item, Node::List { .. })) {
        let rows = items
            .into_iter()
            .map(|item| match item {
                Node::List { items, .. } => items,
                other => vec![other],
            })
            .collect();
        return Ok(Node::Matrix { rows, span });
    }
    Ok(Node::List { items, span })
}
