use crate::{
    ast::{BinaryOp, UnaryOp},
    interpreter::value::{complex::Complex, range::Range, string, Value},
};

/// Applies a unary operator to a number.
///
/// `√` and `∜` of a negative number promote to a complex result instead of
/// producing NaN; `∛` stays real, as every real number has a real cube root.
pub(crate) fn unary(n: f64, op: UnaryOp) -> Option<Value> {
    Some(match op {
        UnaryOp::Pos => Value::Number(n),
        UnaryOp::Neg => Value::Number(-n),
        UnaryOp::PlusMinus => vec![Value::Number(n), Value::Number(-n)].into(),
        UnaryOp::MinusPlus => vec![Value::Number(-n), Value::Number(n)].into(),
        UnaryOp::Sqrt if n < 0.0 => Complex::new(0.0, (-n).sqrt()).into(),
        UnaryOp::Sqrt => Value::Number(n.sqrt()),
        UnaryOp::Cbrt => Value::Number(n.cbrt()),
        UnaryOp::FourthRoot if n < 0.0 => Complex::new(0.0, (-n).sqrt().sqrt()).into(),
        UnaryOp::FourthRoot => Value::Number(n.sqrt().sqrt()),
        UnaryOp::Factorial => Value::Number(factorial(n)),
        UnaryOp::Degrees => Value::Number(n.to_radians()),
        UnaryOp::Sum | UnaryOp::Product | UnaryOp::Not => return None,
    })
}

/// Applies a binary operator with a number on the left.
pub(crate) fn binary(n: f64, op: BinaryOp, rhs: &Value) -> Option<Value> {
    match (op, rhs) {
        (BinaryOp::Add, Value::Number(o)) => Some(Value::Number(n + o)),
        (BinaryOp::Add, Value::Complex(o)) => Some(Complex::new(n + o.re, o.im).into()),
        (BinaryOp::Sub, Value::Number(o)) => Some(Value::Number(n - o)),
        (BinaryOp::Sub, Value::Complex(o)) => Some(Complex::new(n - o.re, -o.im).into()),
        (BinaryOp::PlusMinus, Value::Number(o)) => {
            Some(vec![Value::Number(n + o), Value::Number(n - o)].into())
        }
        (BinaryOp::MinusPlus, Value::Number(o)) => {
            Some(vec![Value::Number(n - o), Value::Number(n + o)].into())
        }
        (BinaryOp::Mul | BinaryOp::Cross, Value::Number(o)) => Some(Value::Number(n * o)),
        (BinaryOp::Mul | BinaryOp::Cross, Value::Complex(o)) => Some((*o * n).into()),
        (BinaryOp::Mul | BinaryOp::Cross, Value::Str(s)) => Some(string::repeat(s, n)),
        (BinaryOp::Div, Value::Number(o)) => Some(Value::Number(n / o)),
        (BinaryOp::Rem, Value::Number(o)) => Some(Value::Number(n % o)),
        (BinaryOp::Pow, Value::Number(o)) => Some(Value::Number(n.powf(*o))),
        (BinaryOp::Range, Value::Number(o)) => Some(Range::new(n, *o, 1.0).into()),
        (BinaryOp::Eq, Value::Number(o)) => Some(Value::Boolean(n == *o)),
        (BinaryOp::Ne, Value::Number(o)) => Some(Value::Boolean(n != *o)),
        (BinaryOp::Lt, Value::Number(o)) => Some(Value::Boolean(n < *o)),
        (BinaryOp::Le, Value::Number(o)) => Some(Value::Boolean(n <= *o)),
        (BinaryOp::Gt, Value::Number(o)) => Some(Value::Boolean(n > *o)),
        (BinaryOp::Ge, Value::Number(o)) => Some(Value::Boolean(n >= *o)),
        (BinaryOp::In, Value::List(items)) => Some(Value::Boolean(
            items.iter().any(|item| matches!(item, Value::Number(x) if *x == n)),
        )),
        _ => None,
    }
}

/// The factorial of `n`, computed over the reals the same way `n!` is
/// usually taught: the product of `n (n-1) (n-2) ...` down to one.
fn factorial(n: f64) -> f64 {
    let mut result = 1.0;
    let mut x = n;
    while x > 1.0 {
        result *= x;
        x -= 1.0;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Span;

    fn bin(n: f64, op: BinaryOp, rhs: Value) -> Value {
        Value::Number(n).binary(op, &rhs, Span::EOF).unwrap()
    }

    #[test]
    fn square_root_of_a_negative_is_complex() {
        assert_eq!(
            Value::Number(-4.0).unary(UnaryOp::Sqrt, Span::EOF).unwrap(),
            Complex::new(0.0, 2.0).into()
        );
        assert_eq!(
            Value::Number(9.0).unary(UnaryOp::Sqrt, Span::EOF).unwrap(),
            Value::Number(3.0)
        );
    }

    #[test]
    fn factorial_and_degrees() {
        assert_eq!(
            Value::Number(5.0)
                .unary(UnaryOp::Factorial, Span::EOF)
                .unwrap(),
            Value::Number(120.0)
        );
        assert_eq!(
            Value::Number(180.0)
                .unary(UnaryOp::Degrees, Span::EOF)
                .unwrap(),
            Value::Number(std::f64::consts::PI)
        );
    }

    #[test]
    fn plus_minus_makes_a_two_element_list() {
        assert_eq!(
            bin(10.0, BinaryOp::PlusMinus, Value::Number(2.0)),
            vec![Value::Number(12.0), Value::Number(8.0)].into()
        );
        assert_eq!(
            bin(10.0, BinaryOp::MinusPlus, Value::Number(2.0)),
            vec![Value::Number(8.0), Value::Number(12.0)].into()
        );
    }

    #[test]
    fn colon_builds_a_range() {
        assert_eq!(
            bin(1.0, BinaryOp::Range, Value::Number(5.0)),
            Range::new(1.0, 5.0, 1.0).into()
        );
    }

    #[test]
    fn membership_checks_lists_numerically() {
        let list: Value = vec![Value::Number(1.0), Value::Str("2".into())].into();
        assert_eq!(bin(1.0, BinaryOp::In, list.clone()), Value::Boolean(true));
        assert_eq!(bin(2.0, BinaryOp::In, list), Value::Boolean(false));
    }
}
