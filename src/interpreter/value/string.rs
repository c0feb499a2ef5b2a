use crate::{
    ast::{BinaryOp, UnaryOp},
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::Value},
    position::Span,
};

/// Applies a unary operator to a string.
///
/// Unary `+` parses the string as a number, NaN if it isn't one. The
/// reverse coercion does not exist: `"a" + 1` concatenates.
pub(crate) fn unary(s: &str, op: UnaryOp) -> Option<Value> {
    match op {
        UnaryOp::Pos => Some(Value::Number(s.trim().parse().unwrap_or(f64::NAN))),
        _ => None,
    }
}

/// Applies a binary operator with a string on the left.
///
/// `+` concatenates with strings, numbers, booleans, and lists (the right
/// side rendered); `*` repeats; ordering comparisons go by length, against
/// either a string or a number.
pub(crate) fn binary(s: &str, op: BinaryOp, rhs: &Value) -> Option<Value> {
    let len = s.chars().count() as f64;
    match (op, rhs) {
        (
            BinaryOp::Add,
            Value::Str(_) | Value::Number(_) | Value::Boolean(_) | Value::List(_),
        ) => Some(Value::Str(format!("{s}{rhs}"))),
        (BinaryOp::Mul | BinaryOp::Cross, Value::Number(o)) => Some(repeat(s, *o)),
        (BinaryOp::Eq, Value::Str(o)) => Some(Value::Boolean(s == o)),
        (BinaryOp::Ne, Value::Str(o)) => Some(Value::Boolean(s != o)),
        (BinaryOp::Lt, Value::Str(o)) => Some(Value::Boolean(len < o.chars().count() as f64)),
        (BinaryOp::Le, Value::Str(o)) => Some(Value::Boolean(len <= o.chars().count() as f64)),
        (BinaryOp::Gt, Value::Str(o)) => Some(Value::Boolean(len > o.chars().count() as f64)),
        (BinaryOp::Ge, Value::Str(o)) => Some(Value::Boolean(len >= o.chars().count() as f64)),
        (BinaryOp::Lt, Value::Number(o)) => Some(Value::Boolean(len < *o)),
        (BinaryOp::Le, Value::Number(o)) => Some(Value::Boolean(len <= *o)),
        (BinaryOp::Gt, Value::Number(o)) => Some(Value::Boolean(len > *o)),
        (BinaryOp::Ge, Value::Number(o)) => Some(Value::Boolean(len >= *o)),
        _ => None,
    }
}

/// Repeats a string a whole number of times; fractional counts truncate and
/// negative counts give the empty string.
pub(crate) fn repeat(s: &str, count: f64) -> Value {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = count.max(0.0) as usize;
    Value::Str(s.repeat(count))
}

/// Indexes one character out of a string.
pub(crate) fn index(s: &str, i: f64, span: Span) -> EvalResult<Value> {
    let len = s.chars().count();
    let index = Value::checked_index(i, len, span)?;
    let ch = s.chars().nth(index).ok_or(RuntimeError::IndexOutOfBounds {
        index: index as i64,
        len,
        span,
    })?;
    Ok(Value::Str(ch.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Span;

    fn str_value(s: &str) -> Value {
        Value::Str(s.to_string())
    }

    #[test]
    fn concatenation_renders_the_right_side() {
        assert_eq!(
            str_value("n = ")
                .binary(BinaryOp::Add, &Value::Number(3.0), Span::EOF)
                .unwrap(),
            str_value("n = 3")
        );
        assert_eq!(
            str_value("ok: ")
                .binary(BinaryOp::Add, &Value::Boolean(true), Span::EOF)
                .unwrap(),
            str_value("ok: true")
        );
    }

    #[test]
    fn unary_plus_parses_but_binary_plus_concatenates() {
        assert_eq!(
            str_value("12").unary(UnaryOp::Pos, Span::EOF).unwrap(),
            Value::Number(12.0)
        );
        assert_eq!(
            str_value("12")
                .binary(BinaryOp::Add, &Value::Number(1.0), Span::EOF)
                .unwrap(),
            str_value("121")
        );
    }

    #[test]
    fn repetition_truncates_fractional_counts() {
        assert_eq!(repeat("ab", 2.9), str_value("abab"));
        assert_eq!(repeat("ab", -1.0), str_value(""));
    }

    #[test]
    fn ordering_goes_by_length() {
        assert_eq!(
            str_value("abc")
                .binary(BinaryOp::Gt, &str_value("a"), Span::EOF)
                .unwrap(),
            Value::Boolean(true)
        );
        assert_eq!(
            str_value("abc")
                .binary(BinaryOp::Le, &Value::Number(3.0), Span::EOF)
                .unwrap(),
            Value::Boolean(true)
        );
    }

    #[test]
    fn indexing_is_character_based() {
        assert_eq!(
            str_value("héllo")
                .index(&Value::Number(1.0), Span::EOF)
                .unwrap(),
            str_value("é")
        );
        assert!(str_value("hi").index(&Value::Number(5.0), Span::EOF).is_err());
    }
}
