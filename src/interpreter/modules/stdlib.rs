//! The `std` module: mathematical constants, conversions, and the
//! trigonometric family. Imported automatically before a program runs.

use std::f64::consts;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::EvalResult,
        modules::{builtin, number_arg, Exports},
        value::{Complex, Value},
    },
    position::Span,
};

/// The twelve trigonometric builtins, each `fn(number) -> number`.
const TRIG: &[(&str, fn(f64) -> f64)] = &[
    ("sin", f64::sin),
    ("cos", f64::cos),
    ("tan", f64::tan),
    ("asin", f64::asin),
    ("acos", f64::acos),
    ("atan", f64::atan),
    ("sinh", f64::sinh),
    ("cosh", f64::cosh),
    ("tanh", f64::tanh),
    ("asinh", f64::asinh),
    ("acosh", f64::acosh),
    ("atanh", f64::atanh),
];

/// Builds the module's bindings.
#[must_use]
pub fn exports() -> Exports {
    let phi = (1.0 + 5.0_f64.sqrt()) / 2.0;
    let mut exports: Exports = vec![
        ("π", Value::Number(consts::PI)),
        ("PI", Value::Number(consts::PI)),
        ("τ", Value::Number(consts::TAU)),
        ("TAU", Value::Number(consts::TAU)),
        ("e", Value::Number(consts::E)),
        ("Φ", Value::Number(phi)),
        ("PHI", Value::Number(phi)),
        ("∞", Value::Number(f64::INFINITY)),
        ("i", Value::Complex(Complex::new(0.0, 1.0))),
        builtin("int", int),
        builtin("float", float),
        builtin("str", str),
        builtin("round", round),
        builtin("len", len),
        builtin("min", min),
        builtin("max", max),
        builtin("minmax", minmax),
        builtin("clamp", clamp),
        builtin("lerp", lerp),
        builtin("gcd", gcd),
        builtin("σ", sigmoid),
        builtin("zeros", zeros),
        builtin("ones", ones),
    ];
    for &(name, f) in TRIG {
        exports.push(builtin(name, move |args, span| {
            Ok(Value::Number(f(number_arg(args, 0, name, span)?)))
        }));
    }
    exports
}

/// Truncates a number towards zero, or parses a string as an integer.
fn int(args: &[Value], span: Span) -> EvalResult<Value> {
    match args.first() {
        Some(Value::Number(n)) => Ok(Value::Number(n.trunc())),
        Some(Value::Str(s)) => Ok(Value::Number(
            s.trim().parse::<f64>().map_or(f64::NAN, f64::trunc),
        )),
        _ => Err(RuntimeError::TypeError {
            details: "int() expects a number or string".to_string(),
            span,
        }),
    }
}

/// Passes a number through, or parses a string as a number.
fn float(args: &[Value], span: Span) -> EvalResult<Value> {
    match args.first() {
        Some(Value::Number(n)) => Ok(Value::Number(*n)),
        Some(Value::Str(s)) => Ok(Value::Number(s.trim().parse().unwrap_or(f64::NAN))),
        _ => Err(RuntimeError::TypeError {
            details: "float() expects a number or string".to_string(),
            span,
        }),
    }
}

/// Renders any value the way `print` would.
fn str(args: &[Value], span: Span) -> EvalResult<Value> {
    match args.first() {
        Some(value) => Ok(Value::Str(value.to_string())),
        None => Err(RuntimeError::TypeError {
            details: "str() expects a value".to_string(),
            span,
        }),
    }
}

/// Rounds at a precision scale: `round(x, 100)` keeps two decimal places.
/// The scale defaults to `1`, plain rounding.
fn round(args: &[Value], span: Span) -> EvalResult<Value> {
    let x = number_arg(args, 0, "round", span)?;
    let nearest = match args.get(1) {
        Some(_) => number_arg(args, 1, "round", span)?,
        None => 1.0,
    };
    Ok(Value::Number((x * nearest).round() / nearest))
}

/// The length of a list or string, or the modulus of a complex number.
fn len(args: &[Value], span: Span) -> EvalResult<Value> {
    match args.first() {
        Some(Value::List(items)) => Ok(Value::Number(items.len() as f64)),
        Some(Value::Str(s)) => Ok(Value::Number(s.chars().count() as f64)),
        Some(Value::Complex(c)) => Ok(Value::Number(c.abs())),
        _ => Err(RuntimeError::TypeError {
            details: "len() expects a list, string or complex number".to_string(),
            span,
        }),
    }
}

/// The smallest number among the arguments, or within a single list
/// argument. Non-numbers are skipped.
fn min(args: &[Value], _span: Span) -> EvalResult<Value> {
    Ok(Value::Number(fold_numbers(args, f64::INFINITY, f64::min)))
}

/// The largest number among the arguments, or within a single list
/// argument. Non-numbers are skipped.
fn max(args: &[Value], _span: Span) -> EvalResult<Value> {
    Ok(Value::Number(fold_numbers(
        args,
        f64::NEG_INFINITY,
        f64::max,
    )))
}

fn fold_numbers(args: &[Value], init: f64, f: fn(f64, f64) -> f64) -> f64 {
    let items: &[Value] = match args.first() {
        Some(Value::List(items)) => items.as_slice(),
        _ => args,
    };
    items.iter().fold(init, |acc, value| match value {
        Value::Number(n) => f(acc, *n),
        _ => acc,
    })
}

/// Two numbers as a `[smaller, larger]` list.
fn minmax(args: &[Value], span: Span) -> EvalResult<Value> {
    let a = number_arg(args, 0, "minmax", span)?;
    let b = number_arg(args, 1, "minmax", span)?;
    Ok(vec![Value::Number(a.min(b)), Value::Number(a.max(b))].into())
}

/// Clamps the first argument between the second and third.
fn clamp(args: &[Value], span: Span) -> EvalResult<Value> {
    let n = number_arg(args, 0, "clamp", span)?;
    let min = number_arg(args, 1, "clamp", span)?;
    let max = number_arg(args, 2, "clamp", span)?;
    Ok(Value::Number(n.max(min).min(max)))
}

/// Linear interpolation between the first two arguments by the third.
fn lerp(args: &[Value], span: Span) -> EvalResult<Value> {
    let min = number_arg(args, 0, "lerp", span)?;
    let max = number_arg(args, 1, "lerp", span)?;
    let t = number_arg(args, 2, "lerp", span)?;
    Ok(Value::Number((max - min).mul_add(t, min)))
}

/// The greatest common divisor, by the Euclidean algorithm.
fn gcd(args: &[Value], span: Span) -> EvalResult<Value> {
    let mut a = number_arg(args, 0, "gcd", span)?;
    let mut b = number_arg(args, 1, "gcd", span)?;
    while b != 0.0 {
        (a, b) = (b, a % b);
    }
    Ok(Value::Number(a))
}

/// The logistic sigmoid.
fn sigmoid(args: &[Value], span: Span) -> EvalResult<Value> {
    let x = number_arg(args, 0, "σ", span)?;
    Ok(Value::Number(1.0 / (1.0 + (-x).exp())))
}

fn zeros(args: &[Value], span: Span) -> EvalResult<Value> {
    Ok(Value::Vector(vec![0.0; vector_len(args, "zeros", span)?]))
}

fn ones(args: &[Value], span: Span) -> EvalResult<Value> {
    Ok(Value::Vector(vec![1.0; vector_len(args, "ones", span)?]))
}

fn vector_len(args: &[Value], name: &str, span: Span) -> EvalResult<usize> {
    let n = number_arg(args, 0, name, span)?;
    if n.fract() != 0.0 || n < 0.0 {
        return Err(RuntimeError::TypeError {
            details: format!("{name}() expects a non-negative whole number"),
            span,
        });
    }
    Ok(n as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Span;

    const SPAN: Span = Span::new(0, 0);

    #[test]
    fn round_keeps_the_requested_precision() {
        let r = round(&[Value::Number(1.26), Value::Number(10.0)], SPAN).unwrap();
        assert_eq!(r, Value::Number(1.3));
        let r = round(&[Value::Number(1.5)], SPAN).unwrap();
        assert_eq!(r, Value::Number(2.0));
    }

    #[test]
    fn len_measures_lists_and_complex_moduli() {
        let list: Value = vec![Value::Number(1.0), Value::Number(2.0)].into();
        assert_eq!(len(&[list], SPAN).unwrap(), Value::Number(2.0));
        let c = Value::Complex(Complex::new(3.0, 4.0));
        assert_eq!(len(&[c], SPAN).unwrap(), Value::Number(5.0));
        assert!(len(&[Value::Boolean(true)], SPAN).is_err());
    }

    #[test]
    fn min_accepts_varargs_or_a_list() {
        let spread = min(&[Value::Number(3.0), Value::Number(1.0)], SPAN).unwrap();
        assert_eq!(spread, Value::Number(1.0));
        let list: Value = vec![Value::Number(3.0), Value::Str("x".to_string()), Value::Number(1.0)].into();
        assert_eq!(min(&[list], SPAN).unwrap(), Value::Number(1.0));
    }

    #[test]
    fn gcd_is_euclidean() {
        let r = gcd(&[Value::Number(54.0), Value::Number(24.0)], SPAN).unwrap();
        assert_eq!(r, Value::Number(6.0));
    }

    #[test]
    fn int_truncates_and_parses() {
        assert_eq!(int(&[Value::Number(-2.7)], SPAN).unwrap(), Value::Number(-2.0));
        assert_eq!(
            int(&[Value::Str("41.9".to_string())], SPAN).unwrap(),
            Value::Number(41.0)
        );
    }
}
