use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::{
    ast::{BinaryOp, GroupOp, UnaryOp},
    interpreter::value::Value,
};

/// A complex number with real and imaginary parts.
///
/// Produced by even roots of negative numbers and by arithmetic with the
/// imaginary constant `i`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Complex {
    /// The real part.
    pub re: f64,
    /// The imaginary part.
    pub im: f64,
}

impl Complex {
    /// Creates a complex number from its parts.
    #[must_use]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// The modulus, `√(re² + im²)`.
    #[must_use]
    pub fn abs(self) -> f64 {
        self.re.hypot(self.im)
    }

    /// Raises the number to a real exponent through the polar form.
    #[must_use]
    pub fn powf(self, exponent: f64) -> Self {
        let r = self.abs().powf(exponent);
        let theta = self.im.atan2(self.re) * exponent;
        Self::new(r * theta.cos(), r * theta.sin())
    }
}

impl Add for Complex {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.re + other.re, self.im + other.im)
    }
}

impl Sub for Complex {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.re - other.re, self.im - other.im)
    }
}

impl Mul for Complex {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        Self::new(
            self.re * other.re - self.im * other.im,
            self.re * other.im + self.im * other.re,
        )
    }
}

impl Mul<f64> for Complex {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self::new(self.re * scalar, self.im * scalar)
    }
}

impl Neg for Complex {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.re, -self.im)
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}i", self.re, self.im)
    }
}

/// Applies a unary operator to a complex number.
pub(crate) fn unary(c: Complex, op: UnaryOp) -> Option<Value> {
    Some(match op {
        UnaryOp::Pos => c.into(),
        UnaryOp::Neg => (-c).into(),
        UnaryOp::Sqrt => c.powf(0.5).into(),
        UnaryOp::Cbrt => c.powf(1.0 / 3.0).into(),
        UnaryOp::FourthRoot => c.powf(0.25).into(),
        _ => return None,
    })
}

/// Applies a binary operator with a complex number on the left.
pub(crate) fn binary(c: Complex, op: BinaryOp, rhs: &Value) -> Option<Value> {
    match (op, rhs) {
        (BinaryOp::Add, Value::Complex(o)) => Some((c + *o).into()),
        (BinaryOp::Add, Value::Number(o)) => Some(Complex::new(c.re + o, c.im).into()),
        (BinaryOp::Sub, Value::Complex(o)) => Some((c - *o).into()),
        (BinaryOp::Sub, Value::Number(o)) => Some(Complex::new(c.re - o, c.im).into()),
        (BinaryOp::Mul | BinaryOp::Cross, Value::Complex(o)) => Some((c * *o).into()),
        (BinaryOp::Mul | BinaryOp::Cross, Value::Number(o)) => Some((c * *o).into()),
        (BinaryOp::Pow, Value::Number(o)) => Some(c.powf(*o).into()),
        (BinaryOp::Eq, Value::Complex(o)) => Some(Value::Boolean(c == *o)),
        (BinaryOp::Ne, Value::Complex(o)) => Some(Value::Boolean(c != *o)),
        _ => None,
    }
}

/// Applies a bracket-pair operator componentwise.
pub(crate) fn grouping(c: Complex, op: GroupOp) -> Value {
    match op {
        GroupOp::Abs => Complex::new(c.re.abs(), c.im.abs()),
        GroupOp::Floor => Complex::new(c.re.floor(), c.im.floor()),
        GroupOp::Ceil => Complex::new(c.re.ceil(), c.im.ceil()),
    }
    .into()
}
