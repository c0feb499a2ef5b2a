use crate::{
    ast::{BinaryOp, GroupOp, UnaryOp},
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::Value},
    position::Span,
};

/// Applies a unary operator to a vector.
pub(crate) fn unary(v: &[f64], op: UnaryOp) -> Option<Value> {
    match op {
        UnaryOp::Pos => Some(v.to_vec().into()),
        UnaryOp::Neg => Some(v.iter().map(|x| -x).collect::<Vec<_>>().into()),
        UnaryOp::PlusMinus => Some(
            vec![
                Value::Vector(v.to_vec()),
                Value::Vector(v.iter().map(|x| -x).collect()),
            ]
            .into(),
        ),
        UnaryOp::MinusPlus => Some(
            vec![
                Value::Vector(v.iter().map(|x| -x).collect()),
                Value::Vector(v.to_vec()),
            ]
            .into(),
        ),
        _ => None,
    }
}

/// Applies a binary operator with a vector on the left.
///
/// Vector-vector `+`, `-`, and `*` are elementwise with the shorter operand
/// zero-extended; `∙` is the dot product; `×` is the three-dimensional cross
/// product and rejects any other length.
pub(crate) fn binary(
    v: &[f64],
    op: BinaryOp,
    rhs: &Value,
    span: Span,
) -> EvalResult<Option<Value>> {
    match (op, rhs) {
        (BinaryOp::Add, Value::Vector(o)) => Ok(Some(zipped(v, o, |a, b| a + b))),
        (BinaryOp::Sub, Value::Vector(o)) => Ok(Some(zipped(v, o, |a, b| a - b))),
        (BinaryOp::Mul, Value::Vector(o)) => Ok(Some(zipped(v, o, |a, b| a * b))),
        (BinaryOp::Add, Value::Number(o)) => {
            Ok(Some(v.iter().map(|x| x + o).collect::<Vec<_>>().into()))
        }
        (BinaryOp::Sub, Value::Number(o)) => {
            Ok(Some(v.iter().map(|x| x - o).collect::<Vec<_>>().into()))
        }
        (BinaryOp::Mul, Value::Number(o)) => {
            Ok(Some(v.iter().map(|x| x * o).collect::<Vec<_>>().into()))
        }
        (BinaryOp::Dot, Value::Vector(o)) => {
            let dot = v.iter().zip(o.iter()).map(|(a, b)| a * b).sum();
            Ok(Some(Value::Number(dot)))
        }
        (BinaryOp::Cross, Value::Vector(o)) => {
            if v.len() != 3 || o.len() != 3 {
                return Err(RuntimeError::ShapeMismatch {
                    details: format!(
                        "cross product needs two vectors of length 3, found {} and {}",
                        v.len(),
                        o.len()
                    ),
                    span,
                });
            }
            Ok(Some(
                vec![
                    v[1] * o[2] - v[2] * o[1],
                    v[2] * o[0] - v[0] * o[2],
                    v[0] * o[1] - v[1] * o[0],
                ]
                .into(),
            ))
        }
        (BinaryOp::Eq, Value::Vector(o)) => Ok(Some(Value::Boolean(v == o.as_slice()))),
        (BinaryOp::Ne, Value::Vector(o)) => Ok(Some(Value::Boolean(v != o.as_slice()))),
        _ => Ok(None),
    }
}

/// Applies a bracket-pair operator componentwise.
pub(crate) fn grouping(v: &[f64], op: GroupOp) -> Value {
    let f: fn(&f64) -> f64 = match op {
        GroupOp::Abs => |x| x.abs(),
        GroupOp::Floor => |x| x.floor(),
        GroupOp::Ceil => |x| x.ceil(),
    };
    v.iter().map(f).collect::<Vec<_>>().into()
}

/// Combines two vectors componentwise, zero-extending the shorter one.
fn zipped(a: &[f64], b: &[f64], f: impl Fn(f64, f64) -> f64) -> Value {
    let length = a.len().max(b.len());
    (0..length)
        .map(|i| {
            f(
                a.get(i).copied().unwrap_or(0.0),
                b.get(i).copied().unwrap_or(0.0),
            )
        })
        .collect::<Vec<_>>()
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(xs: &[f64]) -> Value {
        Value::Vector(xs.to_vec())
    }

    #[test]
    fn elementwise_math_zero_extends() {
        assert_eq!(
            vector(&[1.0, 2.0, 3.0])
                .binary(BinaryOp::Add, &vector(&[10.0]), Span::EOF)
                .unwrap(),
            vector(&[11.0, 2.0, 3.0])
        );
    }

    #[test]
    fn dot_product_is_a_number() {
        assert_eq!(
            vector(&[1.0, 2.0, 3.0])
                .binary(BinaryOp::Dot, &vector(&[4.0, 5.0, 6.0]), Span::EOF)
                .unwrap(),
            Value::Number(32.0)
        );
    }

    #[test]
    fn cross_product_is_three_dimensional_only() {
        assert_eq!(
            vector(&[1.0, 0.0, 0.0])
                .binary(BinaryOp::Cross, &vector(&[0.0, 1.0, 0.0]), Span::EOF)
                .unwrap(),
            vector(&[0.0, 0.0, 1.0])
        );
        let error = vector(&[1.0, 0.0])
            .binary(BinaryOp::Cross, &vector(&[0.0, 1.0]), Span::EOF)
            .unwrap_err();
        assert!(matches!(error, RuntimeError::ShapeMismatch { .. }));
    }

    #[test]
    fn grouping_applies_componentwise() {
        assert_eq!(
            vector(&[-1.5, 2.5]).grouping(GroupOp::Floor, Span::EOF).unwrap(),
            vector(&[-2.0, 2.0])
        );
        assert_eq!(
            vector(&[-1.5, 2.5]).grouping(GroupOp::Abs, Span::EOF).unwrap(),
            vector(&[1.5, 2.5])
        );
    }
}
