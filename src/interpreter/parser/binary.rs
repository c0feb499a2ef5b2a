use std::iter::Peekable;

use crate::{
    ast::{BinaryOp, Node},
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, unary::parse_unary},
    },
    position::Span,
};

/// Parses the word-comparison level: `and`, `or`, and `in`.
///
/// Grammar: `word_comparison := comparison (("and" | "or" | "in") comparison)*`
///
/// # Errors
/// - `SyntaxError`: An operand fails to parse.
pub(in crate::interpreter::parser) fn parse_word_comparison<'a, I>(
    tokens: &mut Peekable<I>,
    colon: bool,
) -> ParseResult<Node>
where
    I: Iterator<Item = &'a (Token, Span)> + Clone,
{
    let mut left = parse_comparison(tokens, colon)?;
    while let Some(op) = next_op(tokens, |op| {
        matches!(op, BinaryOp::And | BinaryOp::Or | BinaryOp::In)
    }) {
        let right = parse_comparison(tokens, colon)?;
        left = join(left, op, right);
    }
    Ok(left)
}

/// Parses the symbolic-comparison level, which also builds ranges.
///
/// `:` is only accepted when `colon` is set; control-flow headers clear it
/// so their body colon is left alone.
///
/// Grammar: `comparison := additive (("==" | "!=" | "<" | "<=" | ">" | ">="
/// | ":") additive)*`
///
/// # Errors
/// - `SyntaxError`: An operand fails to parse.
pub(in crate::interpreter::parser) fn parse_comparison<'a, I>(
    tokens: &mut Peekable<I>,
    colon: bool,
) -> ParseResult<Node>
where
    I: Iterator<Item = &'a (Token, Span)> + Clone,
{
    let mut left = parse_additive(tokens)?;
    while let Some(op) = next_op(tokens, |op| {
        matches!(
            op,
            BinaryOp::Eq
                | BinaryOp::Ne
                | BinaryOp::Lt
                | BinaryOp::Le
                | BinaryOp::Gt
                | BinaryOp::Ge
        ) || (colon && matches!(op, BinaryOp::Range))
    }) {
        let right = parse_additive(tokens)?;
        left = join(left, op, right);
    }
    Ok(left)
}

/// Parses the additive level.
///
/// Grammar: `additive := multiplicative (("+" | "-" | "±" | "∓") multiplicative)*`
///
/// # Errors
/// - `SyntaxError`: An operand fails to parse.
pub(in crate::interpreter::parser) fn parse_additive<'a, I>(
    tokens: &mut Peekable<I>,
) -> ParseResult<Node>
where
    I: Iterator<Item = &'a (Token, Span)> + Clone,
{
    let mut left = parse_multiplicative(tokens)?;
    while let Some(op) = next_op(tokens, |op| {
        matches!(
            op,
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::PlusMinus | BinaryOp::MinusPlus
        )
    }) {
        let right = parse_multiplicative(tokens)?;
        left = join(left, op, right);
    }
    Ok(left)
}

/// Parses the multiplicative level.
///
/// Grammar: `multiplicative := unary (("*" | "∙" | "×" | "/" | "%") unary)*`
///
/// # Errors
/// - `SyntaxError`: An operand fails to parse.
pub(in crate::interpreter::parser) fn parse_multiplicative<'a, I>(
    tokens: &mut Peekable<I>,
) -> ParseResult<Node>
where
    I: Iterator<Item = &'a (Token, Span)> + Clone,
{
    let mut left = parse_unary(tokens)?;
    while let Some(op) = next_op(tokens, |op| {
        matches!(
            op,
            BinaryOp::Mul | BinaryOp::Dot | BinaryOp::Cross | BinaryOp::Div | BinaryOp::Rem
        )
    }) {
        let right = parse_unary(tokens)?;
        left = join(left, op, right);
    }
    Ok(left)
}

/// Consumes and returns the next binary operator if it belongs to the
/// current level.
fn next_op<'a, I>(tokens: &mut Peekable<I>, belongs: impl Fn(BinaryOp) -> bool) -> Option<BinaryOp>
where
    I: Iterator<Item = &'a (Token, Span)>,
{
    let (token, _) = tokens.peek()?;
    let op = binary_op(token)?;
    if belongs(op) {
        tokens.next();
        return Some(op);
    }
    None
}

fn join(left: Node, op: BinaryOp, right: Node) -> Node {
    let span = left.span().to(right.span());
    Node::Binary {
        lhs: Box::new(left),
        op,
        rhs: Box::new(right),
        span,
    }
}

pub(in crate::interpreter::parser) const fn binary_op(token: &Token) -> Option<BinaryOp> {
    match token {
        Token::Plus => Some(BinaryOp::Add),
        Token::Minus => Some(BinaryOp::Sub),
        Token::PlusMinus => Some(BinaryOp::PlusMinus),
        Token::MinusPlus => Some(BinaryOp::MinusPlus),
        Token::Star => Some(BinaryOp::Mul),
        Token::Dot => Some(BinaryOp::Dot),
        Token::Cross => Some(BinaryOp::Cross),
        Token::Slash => Some(BinaryOp::Div),
        Token::Percent => Some(BinaryOp::Rem),
        Token::Caret => Some(BinaryOp::Pow),
        Token::Colon => Some(BinaryOp::Range),
        Token::EqEq => Some(BinaryOp::Eq),
        Token::NotEq => Some(BinaryOp::Ne),
        Token::Less => Some(BinaryOp::Lt),
        Token::LessEq => Some(BinaryOp::Le),
        Token::Greater => Some(BinaryOp::Gt),
        Token::GreaterEq => Some(BinaryOp::Ge),
        Token::And => Some(BinaryOp::And),
        Token::Or => Some(BinaryOp::Or),
        Token::In => Some(BinaryOp::In),
        _ => None,
    }
}
