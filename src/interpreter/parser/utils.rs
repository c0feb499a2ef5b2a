use std::iter::Peekable;

use crate::{
    error::SyntaxError,
    interpreter::{lexer::Token, parser::core::ParseResult},
    position::Span,
};

/// The span of the next token, or the end-of-input sentinel.
pub(in crate::interpreter::parser) fn peek_span<'a, I>(tokens: &mut Peekable<I>) -> Span
where
    I: Iterator<Item = &'a (Token, Span)>,
{
    tokens.peek().map_or(Span::EOF, |(_, span)| *span)
}

/// Builds the error for an unexpected token at the current position.
pub(in crate::interpreter::parser) fn expected<'a, I>(
    tokens: &mut Peekable<I>,
    what: &str,
) -> SyntaxError
where
    I: Iterator<Item = &'a (Token, Span)>,
{
    SyntaxError::new(what, peek_span(tokens))
}

/// Consumes the next token, which must equal `token`.
///
/// # Returns
/// The consumed token's span.
///
/// # Errors
/// - [`SyntaxError`]: The next token is something else; `what` names what
///   was expected.
pub(in crate::interpreter::parser) fn expect_token<'a, I>(
    tokens: &mut Peekable<I>,
    token: &Token,
    what: &str,
) -> ParseResult<Span>
where
    I: Iterator<Item = &'a (Token, Span)>,
{
    match tokens.peek() {
        Some((next, span)) if next == token => {
            let span = *span;
            tokens.next();
            Ok(span)
        }
        _ => Err(expected(tokens, what)),
    }
}

/// The token after the next one, for one-token lookahead.
pub(in crate::interpreter::parser) fn second<'a, I>(
    tokens: &Peekable<I>,
) -> Option<&'a (Token, Span)>
where
    I: Iterator<Item = &'a (Token, Span)> + Clone,
{
    tokens.clone().nth(1)
}

/// Parses a comma-separated list of items up to a closing token.
///
/// Shared by argument lists, parameter lists, and the list, vector, and
/// matrix literals. An immediately encountered closing token produces an
/// empty list. The closing token is consumed.
///
/// Grammar: `list := (item ("," item)*)? closing`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item or the closer.
/// - `parse_item`: Parses one element.
/// - `closing`: The token that terminates the list.
/// - `what`: How the closer reads in an error, such as `"')'"`.
///
/// # Returns
/// The items and the closing token's span.
///
/// # Errors
/// - [`SyntaxError`]: An item fails to parse, or neither a comma nor the
///   closer follows one.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token,
    what: &str,
) -> ParseResult<(Vec<T>, Span)>
where
    I: Iterator<Item = &'a (Token, Span)> + Clone,
{
    let mut items = Vec::new();
    if let Some((token, span)) = tokens.peek() {
        if token == closing {
            let span = *span;
            tokens.next();
            return Ok((items, span));
        }
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.peek() {
            Some((Token::Comma, _)) => {
                tokens.next();
            }
            Some((token, span)) if token == closing => {
                let span = *span;
                tokens.next();
                return Ok((items, span));
            }
            _ => return Err(expected(tokens, &format!("',' or {what}"))),
        }
    }
}

/// Parses a plain identifier and returns its name and span.
///
/// # Errors
/// - [`SyntaxError`]: The next token is not an identifier.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(
    tokens: &mut Peekable<I>,
) -> ParseResult<(String, Span)>
where
    I: Iterator<Item = &'a (Token, Span)>,
{
    match tokens.peek() {
        Some((Token::Identifier(name), span)) => {
            let result = (name.clone(), *span);
            tokens.next();
            Ok(result)
        }
        _ => Err(expected(tokens, "an identifier")),
    }
}
