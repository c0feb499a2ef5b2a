use std::iter::Peekable;

use crate::{
    ast::Node,
    error::SyntaxError,
    interpreter::{
        lexer::Token,
        parser::{statement, utils::expected},
    },
    position::Span,
};

pub type ParseResult<T> = Result<T, SyntaxError>;

/// Parses a whole token stream into a program block.
///
/// Statements are newline/`;` separated and collected into a single
/// [`Node::Block`]; an empty stream parses to an empty block.
///
/// # Parameters
/// - `tokens`: The lexed stream, ending with [`Token::Eof`].
///
/// # Returns
/// The program as a block node.
///
/// # Errors
/// - [`SyntaxError`]: The first unexpected token aborts the parse.
pub fn parse(tokens: &[(Token, Span)]) -> ParseResult<Node> {
    let mut tokens = tokens.iter().peekable();
    let statements = statement::parse_statements(&mut tokens, None)?;

    match tokens.peek() {
        Some((Token::Eof, _)) | None => {}
        _ => return Err(expected(&mut tokens, "end of input")),
    }

    let span = match (statements.first(), statements.last()) {
        (Some(first), Some(last)) => first.span().to(last.span()),
        _ => Span::new(0, 0),
    };
    Ok(Node::Block { statements, span })
}

/// Parses one expression.
///
/// This is the top of the precedence ladder. The `colon` flag controls
/// whether `:` is accepted as the range operator; control-flow headers
/// disable it so the colon can introduce the body instead.
///
/// Grammar: `expression := declaration | assignment | word_comparison`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, Span)` pairs.
/// - `colon`: Whether `:` may build a range at the comparison level.
///
/// # Returns
/// The parsed expression node.
///
/// # Errors
/// - [`SyntaxError`]: The expression is malformed.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>, colon: bool) -> ParseResult<Node>
where
    I: Iterator<Item = &'a (Token, Span)> + Clone,
{
    statement::parse_binding(tokens, colon)
}

/// Parses a nested token run as a single expression.
///
/// String interpolations and superscript exponents carry their own token
/// vectors; this re-enters the ladder on one of them and requires it to be
/// fully consumed.
///
/// # Errors
/// - [`SyntaxError`]: The run is malformed or has trailing tokens.
pub fn parse_fragment(tokens: &[(Token, Span)]) -> ParseResult<Node> {
    let mut tokens = tokens.iter().peekable();
    let node = parse_expression(&mut tokens, true)?;
    match tokens.peek() {
        Some((Token::Eof, _)) | None => Ok(node),
        _ => Err(expected(&mut tokens, "end of expression")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, UnaryOp};
    use crate::interpreter::lexer::lex;

    fn first(source: &str) -> Node {
        let parsed = parse(&lex(source).unwrap()).unwrap();
        match parsed {
            Node::Block { mut statements, .. } => statements.remove(0),
            other => other,
        }
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let Node::Binary { op, rhs, .. } = first("1 + 2 * 3") else {
            panic!("expected a binary node");
        };
        assert_eq!(op, BinaryOp::Add);
        assert!(matches!(
            *rhs,
            Node::Binary {
                op: BinaryOp::Mul,
                ..
            }
        ));
    }

    #[test]
    fn power_is_right_associative() {
        let Node::Binary { op, lhs, rhs, .. } = first("2 ^ 3 ^ 2") else {
            panic!("expected a binary node");
        };
        assert_eq!(op, BinaryOp::Pow);
        assert!(matches!(*lhs, Node::Number { value, .. } if value == 2.0));
        assert!(matches!(
            *rhs,
            Node::Binary {
                op: BinaryOp::Pow,
                ..
            }
        ));
    }

    #[test]
    fn prefix_minus_binds_looser_than_power() {
        let Node::Unary { op, operand, .. } = first("-2 ^ 2") else {
            panic!("expected a unary node");
        };
        assert_eq!(op, UnaryOp::Neg);
        assert!(matches!(
            *operand,
            Node::Binary {
                op: BinaryOp::Pow,
                ..
            }
        ));
    }

    #[test]
    fn adjacent_number_and_identifier_multiply() {
        let Node::Binary { op, lhs, rhs, .. } = first("2x") else {
            panic!("expected a binary node");
        };
        assert_eq!(op, BinaryOp::Mul);
        assert!(matches!(*lhs, Node::Number { .. }));
        assert!(matches!(*rhs, Node::Identifier { .. }));
    }

    #[test]
    fn superscript_run_is_an_exponent() {
        let Node::Binary { op, rhs, .. } = first("x²") else {
            panic!("expected a binary node");
        };
        assert_eq!(op, BinaryOp::Pow);
        assert!(matches!(*rhs, Node::Number { value, .. } if value == 2.0));
    }

    #[test]
    fn equation_form_defines_a_function() {
        let Node::FuncDef { name, params, body, .. } = first("f(x) = x + 1") else {
            panic!("expected a function definition");
        };
        assert_eq!(name, "f");
        assert_eq!(params, ["x"]);
        assert!(matches!(*body, Node::Binary { .. }));
    }

    #[test]
    fn nested_bracket_literals_make_a_matrix() {
        let Node::Matrix { rows, .. } = first("[[1, 2], [3, 4]]") else {
            panic!("expected a matrix literal");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 2);
        assert!(matches!(first("[1, 2, 3]"), Node::List { .. }));
    }

    #[test]
    fn for_headers_take_ranges_or_colon_bodies() {
        let Node::For { iterable, .. } = first("for i in 1:5 { i }") else {
            panic!("expected a for loop");
        };
        assert!(matches!(
            *iterable,
            Node::Binary {
                op: BinaryOp::Range,
                ..
            }
        ));

        let Node::For { iterable, body, .. } = first("for i in 10: print(i)") else {
            panic!("expected a for loop");
        };
        assert!(matches!(*iterable, Node::Number { value, .. } if value == 10.0));
        assert!(matches!(*body, Node::FuncCall { .. }));
    }

    #[test]
    fn unbalanced_parens_are_reported() {
        let err = parse(&lex("(1 + 2").unwrap()).unwrap_err();
        assert_eq!(err.to_string(), "expected ')'");
    }
}
