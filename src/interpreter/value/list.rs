use std::rc::Rc;

use crate::{
    ast::{BinaryOp, UnaryOp},
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::Value},
    position::Span,
};

/// Applies a unary operator to a list.
///
/// `∑` and `∏` reduce the numeric items and silently skip everything else;
/// `∏` of an empty list is 0.
pub(crate) fn unary(items: &Rc<Vec<Value>>, op: UnaryOp) -> Option<Value> {
    match op {
        UnaryOp::Sum => {
            let sum = items
                .iter()
                .filter_map(|item| match item {
                    Value::Number(n) => Some(n),
                    _ => None,
                })
                .sum();
            Some(Value::Number(sum))
        }
        UnaryOp::Product => {
            if items.is_empty() {
                return Some(Value::Number(0.0));
            }
            let product = items
                .iter()
                .filter_map(|item| match item {
                    Value::Number(n) => Some(n),
                    _ => None,
                })
                .product();
            Some(Value::Number(product))
        }
        _ => None,
    }
}

/// Applies a binary operator with a list on the left.
///
/// `+` concatenates with another list and appends any other value. `*` and
/// `/` map over the items, pairwise against another list of the same length
/// or broadcast against a scalar.
pub(crate) fn binary(
    items: &Rc<Vec<Value>>,
    op: BinaryOp,
    rhs: &Value,
    span: Span,
) -> EvalResult<Option<Value>> {
    match (op, rhs) {
        (BinaryOp::Add, Value::List(other)) => {
            let mut joined = items.as_ref().clone();
            joined.extend(other.iter().cloned());
            Ok(Some(joined.into()))
        }
        (BinaryOp::Add, _) => {
            let mut appended = items.as_ref().clone();
            appended.push(rhs.clone());
            Ok(Some(appended.into()))
        }
        (BinaryOp::Mul | BinaryOp::Div, Value::List(other)) => {
            if items.len() != other.len() {
                return Err(RuntimeError::ShapeMismatch {
                    details: format!(
                        "pairwise '{op}' needs lists of equal length, found {} and {}",
                        items.len(),
                        other.len()
                    ),
                    span,
                });
            }
            let mapped = items
                .iter()
                .zip(other.iter())
                .map(|(a, b)| a.binary(op, b, span))
                .collect::<EvalResult<Vec<_>>>()?;
            Ok(Some(mapped.into()))
        }
        (BinaryOp::Mul | BinaryOp::Div, Value::Number(_)) => {
            let mapped = items
                .iter()
                .map(|item| item.binary(op, rhs, span))
                .collect::<EvalResult<Vec<_>>>()?;
            Ok(Some(mapped.into()))
        }
        (BinaryOp::Eq, Value::List(other)) => Ok(Some(Value::Boolean(items == other))),
        (BinaryOp::Ne, Value::List(other)) => Ok(Some(Value::Boolean(items != other))),
        _ => Ok(None),
    }
}

/// Indexes an item out of a list.
pub(crate) fn index(items: &Rc<Vec<Value>>, i: f64, span: Span) -> EvalResult<Value> {
    let index = Value::checked_index(i, items.len(), span)?;
    Ok(items[index].clone())
}
