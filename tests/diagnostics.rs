//! Tests for error reporting: categories, messages, spans, and the source
//! snippet rendered above a diagnostic.

use std::cell::RefCell;
use std::rc::Rc;

use vesper::{
    error::{Error, LexError, RuntimeError},
    evaluate_with,
    position::{snippet, Position, Span},
};

fn fail(source: &str) -> Error {
    let out = Rc::new(RefCell::new(Vec::new()));
    match evaluate_with(source, false, out) {
        Ok(value) => panic!("program unexpectedly produced {value}:\n{source}"),
        Err(err) => err,
    }
}

#[test]
fn illegal_characters_are_lex_errors() {
    let err = fail("1 $ 2");
    assert_eq!(
        err,
        Error::Lex(LexError::IllegalCharacter {
            ch: '$',
            span: Span::new(2, 3),
        })
    );
    assert_eq!(err.title(), "Char Error");
    assert_eq!(err.to_string(), "illegal character '$'");
}

#[test]
fn unterminated_strings_are_reported() {
    let err = fail("\"never closed");
    assert!(matches!(
        err,
        Error::Lex(LexError::UnterminatedString { .. })
    ));
    let err = fail("\"open {1 + 2\"");
    assert!(matches!(
        err,
        Error::Lex(LexError::UnterminatedInterpolation { .. })
    ));
}

#[test]
fn syntax_errors_say_what_was_expected() {
    assert_eq!(fail("(1 + 2").to_string(), "expected ')'");
    assert_eq!(fail("let = 3").to_string(), "expected an identifier");
    assert_eq!(fail("1 +").to_string(), "expected an expression");
    assert_eq!(fail("1 2").to_string(), "expected a newline or ';'");
    assert_eq!(fail("fn f()").to_string(), "expected '->' or '{'");
    assert_eq!(fail("[1, 2").to_string(), "expected ',' or ']'");
    assert_eq!(fail("if 1 + 2").to_string(), "expected ':' or '{'");
}

#[test]
fn syntax_errors_carry_the_offending_token_span() {
    let source = "let x 3";
    let err = fail(source);
    assert_eq!(err.title(), "Syntax Error");
    assert_eq!(err.span(), Span::new(6, 7));
}

#[test]
fn runtime_errors_point_at_the_failing_line() {
    let source = "let a = 1\nb + a";
    let err = fail(source);
    assert_eq!(err.title(), "Runtime Error");
    assert_eq!(err.to_string(), "'b' is not defined");
    assert_eq!(err.span(), Span::new(10, 11));

    let at = Position::of(source, err.span().start);
    assert_eq!((at.row, at.col), (1, 0));
    assert_eq!(snippet(source, err.span()), "2 | b + a");
}

#[test]
fn ragged_matrix_literals_are_shape_mismatches() {
    let err = fail("[[1, 2], [3]]");
    assert!(matches!(
        err,
        Error::Runtime(RuntimeError::ShapeMismatch { .. })
    ));
    assert_eq!(
        err.to_string(),
        "shape mismatch: matrix rows must all have the same, non-zero length"
    );
}

#[test]
fn snippets_cover_every_spanned_line() {
    let source = "let a = 1\nlet b = 2";
    assert_eq!(
        snippet(source, Span::new(4, 14)),
        "1 | let a = 1\n2 | let b = 2"
    );
}

#[test]
fn eof_spans_render_a_placeholder_snippet() {
    assert_eq!(snippet("1 + 2", Span::EOF), "<eof>");
    assert_eq!(snippet("", Span::new(0, 0)), "<eof>");
}

#[test]
fn fractional_indices_are_type_errors() {
    let err = fail("[1, 2, 3][1.5]");
    assert_eq!(err.to_string(), "index must be a whole number, found 1.5");
}

#[test]
fn indexing_an_unindexable_kind_names_both_sides() {
    let err = fail("true[0]");
    assert_eq!(err.to_string(), "cannot apply '[]' to a boolean and a number");
}

#[test]
fn unary_misapplication_names_the_operator() {
    let err = fail("√true");
    assert_eq!(err.to_string(), "cannot apply '√' to a boolean");
}
