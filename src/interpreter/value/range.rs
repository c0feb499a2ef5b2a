use std::fmt;

use crate::{
    ast::BinaryOp,
    interpreter::{evaluator::core::EvalResult, value::Value},
    position::Span,
};

/// A half-open numeric range `from:to`, stepping by `step`.
///
/// `1:5` enumerates `1 2 3 4`; `1:10:2` (a range re-stepped with `:`)
/// enumerates `1 3 5 7 9`. Negative steps count downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    /// The first value.
    pub from: f64,
    /// The exclusive end.
    pub to: f64,
    /// The distance between consecutive values.
    pub step: f64,
}

impl Range {
    /// Creates a range.
    #[must_use]
    pub const fn new(from: f64, to: f64, step: f64) -> Self {
        Self { from, to, step }
    }

    /// How many values the range enumerates. A zero step enumerates none.
    #[must_use]
    pub fn len(&self) -> usize {
        if self.step == 0.0 {
            return 0;
        }
        let count = (self.to - self.from) / self.step;
        if count <= 0.0 {
            0
        } else {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            {
                count.ceil() as usize
            }
        }
    }

    /// Whether the range enumerates nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The values of the range, in order.
    pub fn iter(&self) -> impl Iterator<Item = f64> {
        let Self { from, step, .. } = *self;
        (0..self.len()).map(move |i| from + step * i as f64)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<range {}:{}:{}>", self.from, self.to, self.step)
    }
}

/// Applies a binary operator with a range on the left. `:` with a number
/// replaces the step.
pub(crate) fn binary(r: Range, op: BinaryOp, rhs: &Value) -> Option<Value> {
    match (op, rhs) {
        (BinaryOp::Range, Value::Number(step)) => Some(Range::new(r.from, r.to, *step).into()),
        (BinaryOp::Eq, Value::Range(o)) => Some(Value::Boolean(r == *o)),
        (BinaryOp::Ne, Value::Range(o)) => Some(Value::Boolean(r != *o)),
        _ => None,
    }
}

/// Indexes into the arithmetic progression.
pub(crate) fn index(r: Range, i: f64, span: Span) -> EvalResult<Value> {
    let index = Value::checked_index(i, r.len(), span)?;
    Ok(Value::Number(r.from + r.step * index as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumeration_excludes_the_end() {
        let values: Vec<f64> = Range::new(1.0, 5.0, 1.0).iter().collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn restepping_keeps_the_bounds() {
        let range: Value = Range::new(1.0, 10.0, 1.0).into();
        let restepped = range
            .binary(BinaryOp::Range, &Value::Number(2.0), Span::EOF)
            .unwrap();
        assert_eq!(restepped, Range::new(1.0, 10.0, 2.0).into());
        let Value::Range(r) = restepped else {
            panic!("expected a range");
        };
        assert_eq!(r.iter().collect::<Vec<_>>(), vec![1.0, 3.0, 5.0, 7.0, 9.0]);
    }

    #[test]
    fn negative_steps_count_down() {
        let values: Vec<f64> = Range::new(5.0, 1.0, -2.0).iter().collect();
        assert_eq!(values, vec![5.0, 3.0]);
    }

    #[test]
    fn zero_step_enumerates_nothing() {
        assert!(Range::new(1.0, 5.0, 0.0).is_empty());
    }

    #[test]
    fn indexing_walks_the_progression() {
        let range: Value = Range::new(1.0, 10.0, 2.0).into();
        assert_eq!(
            range.index(&Value::Number(3.0), Span::EOF).unwrap(),
            Value::Number(7.0)
        );
        assert!(range.index(&Value::Number(5.0), Span::EOF).is_err());
    }
}
