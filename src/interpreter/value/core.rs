use std::rc::Rc;

use crate::{
    ast::{BinaryOp, GroupOp, UnaryOp},
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{
            complex, complex::Complex, function::Function, future::Future, list, matrix,
            matrix::Matrix, number, range, range::Range, string, vector,
        },
    },
    position::Span,
};

/// Represents a runtime value in the interpreter.
///
/// This enum models all the possible types that can appear in expressions,
/// assignments, function returns, and conditional evaluations. The set is
/// closed: operator dispatch matches exhaustively over it, and an operator a
/// kind does not support is a reported error, never a fallthrough.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A numeric value (double precision floating-point).
    Number(f64),
    /// A boolean value (`true` or `false`).
    /// Produced by comparison operators (`<`, `==`, `!=`, etc.) and logical
    /// operations; any value can serve as a condition through its truthiness.
    Boolean(bool),
    /// A string value.
    Str(String),
    /// A complex number (real and imaginary parts).
    Complex(Complex),
    /// A list of values of any kind.
    List(Rc<Vec<Self>>),
    /// A fixed-length vector of numbers.
    Vector(Vec<f64>),
    /// A two-dimensional matrix of numbers.
    Matrix(Matrix),
    /// A half-open numeric range with a step.
    Range(Range),
    /// A callable function.
    Function(Rc<Function>),
    /// A deferred value; only `await` can get the value out.
    Future(Rc<Future>),
    /// The canonical no-value, produced by statements with nothing to say.
    None,
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<Complex> for Value {
    fn from(v: Complex) -> Self {
        Self::Complex(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::List(Rc::new(v))
    }
}

impl From<Vec<f64>> for Value {
    fn from(v: Vec<f64>) -> Self {
        Self::Vector(v)
    }
}

impl From<Matrix> for Value {
    fn from(v: Matrix) -> Self {
        Self::Matrix(v)
    }
}

impl From<Range> for Value {
    fn from(v: Range) -> Self {
        Self::Range(v)
    }
}

impl From<Function> for Value {
    fn from(v: Function) -> Self {
        Self::Function(Rc::new(v))
    }
}

impl Value {
    /// The value's kind, as diagnostics name it.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Boolean(_) => "boolean",
            Self::Str(_) => "string",
            Self::Complex(_) => "complex number",
            Self::List(_) => "list",
            Self::Vector(_) => "vector",
            Self::Matrix(_) => "matrix",
            Self::Range(_) => "range",
            Self::Function(_) => "function",
            Self::Future(_) => "future",
            Self::None => "none",
        }
    }

    /// Whether the value counts as true in a condition.
    ///
    /// Zero, the empty string, the empty list, and `none` are false;
    /// everything else is true.
    #[must_use]
    pub fn truthy(&self) -> bool {
        match self {
            Self::Number(n) => *n != 0.0,
            Self::Boolean(b) => *b,
            Self::Str(s) => !s.is_empty(),
            Self::Complex(c) => c.re != 0.0 || c.im != 0.0,
            Self::List(items) => !items.is_empty(),
            Self::None => false,
            Self::Vector(_) | Self::Matrix(_) | Self::Range(_) | Self::Function(_)
            | Self::Future(_) => true,
        }
    }

    /// Applies a prefix or postfix operator to the value.
    ///
    /// `not` works on every kind through truthiness; the rest dispatch to
    /// the operand's kind.
    ///
    /// # Parameters
    /// - `op`: The operator being applied.
    /// - `span`: The span of the whole operation, for error reporting.
    ///
    /// # Errors
    /// - [`RuntimeError::IllegalUnaryOperation`]: If the kind has no entry
    ///   for the operator.
    pub fn unary(&self, op: UnaryOp, span: Span) -> EvalResult<Self> {
        if op == UnaryOp::Not {
            return Ok(Self::Boolean(!self.truthy()));
        }
        let result = match self {
            Self::Number(n) => number::unary(*n, op),
            Self::Complex(c) => complex::unary(*c, op),
            Self::Str(s) => string::unary(s, op),
            Self::List(items) => list::unary(items, op),
            Self::Vector(v) => vector::unary(v, op),
            Self::Matrix(m) => matrix::unary(m, op),
            Self::Boolean(_) | Self::Range(_) | Self::Function(_) | Self::Future(_)
            | Self::None => None,
        };
        result.ok_or_else(|| RuntimeError::IllegalUnaryOperation {
            op: op.to_string(),
            kind: self.kind(),
            span,
        })
    }

    /// Applies a binary operator with the value on the left.
    ///
    /// `and`/`or` work on every pair of kinds through truthiness. A number
    /// combined with a function curries: the result is a new function that
    /// calls the original and then applies the operator. Everything else
    /// dispatches to the left operand's kind.
    ///
    /// # Parameters
    /// - `op`: The operator being applied.
    /// - `rhs`: The right operand.
    /// - `span`: The span of the whole operation, for error reporting.
    ///
    /// # Errors
    /// - [`RuntimeError::IllegalBinaryOperation`]: If the pair of kinds has
    ///   no entry for the operator.
    /// - [`RuntimeError::ShapeMismatch`]: If vector or matrix dimensions do
    ///   not line up.
    pub fn binary(&self, op: BinaryOp, rhs: &Self, span: Span) -> EvalResult<Self> {
        match op {
            BinaryOp::And => return Ok(Self::Boolean(self.truthy() && rhs.truthy())),
            BinaryOp::Or => return Ok(Self::Boolean(self.truthy() || rhs.truthy())),
            _ => {}
        }
        if let (Self::Number(_), Self::Function(inner)) = (self, rhs) {
            if matches!(
                op,
                BinaryOp::Add
                    | BinaryOp::Sub
                    | BinaryOp::Mul
                    | BinaryOp::Cross
                    | BinaryOp::Div
                    | BinaryOp::Rem
                    | BinaryOp::Pow
            ) {
                return Ok(Function::curried(self.clone(), op, inner).into());
            }
        }
        let result = match self {
            Self::Number(n) => number::binary(*n, op, rhs),
            Self::Boolean(b) => match (op, rhs) {
                (BinaryOp::Eq, Self::Boolean(o)) => Some(Self::Boolean(b == o)),
                (BinaryOp::Ne, Self::Boolean(o)) => Some(Self::Boolean(b != o)),
                _ => None,
            },
            Self::Str(s) => string::binary(s, op, rhs),
            Self::Complex(c) => complex::binary(*c, op, rhs),
            Self::List(items) => list::binary(items, op, rhs, span)?,
            Self::Vector(v) => vector::binary(v, op, rhs, span)?,
            Self::Matrix(m) => matrix::binary(m, op, rhs, span)?,
            Self::Range(r) => range::binary(*r, op, rhs),
            Self::None => match op {
                BinaryOp::Eq => Some(Self::Boolean(matches!(rhs, Self::None))),
                BinaryOp::Ne => Some(Self::Boolean(!matches!(rhs, Self::None))),
                _ => None,
            },
            Self::Function(_) | Self::Future(_) => None,
        };
        result.ok_or_else(|| RuntimeError::IllegalBinaryOperation {
            op: op.to_string(),
            lhs: self.kind(),
            rhs: rhs.kind(),
            span,
        })
    }

    /// Applies a bracket-pair operator (`|x|`, `⌊x⌋`, `⌈x⌉`) to the value.
    ///
    /// # Errors
    /// - [`RuntimeError::IllegalUnaryOperation`]: If the kind has no entry
    ///   for the operator.
    pub fn grouping(&self, op: GroupOp, span: Span) -> EvalResult<Self> {
        let result = match self {
            Self::Number(n) => Some(Self::Number(match op {
                GroupOp::Abs => n.abs(),
                GroupOp::Floor => n.floor(),
                GroupOp::Ceil => n.ceil(),
            })),
            Self::Complex(c) => Some(complex::grouping(*c, op)),
            Self::Vector(v) => Some(vector::grouping(v, op)),
            _ => None,
        };
        result.ok_or_else(|| RuntimeError::IllegalUnaryOperation {
            op: op.to_string(),
            kind: self.kind(),
            span,
        })
    }

    /// Applies a trailing `[prop]` access to the value.
    ///
    /// Strings, lists, and ranges are indexable by number; nothing else is.
    ///
    /// # Errors
    /// - [`RuntimeError::IndexOutOfBounds`]: If the index is past the end.
    /// - [`RuntimeError::TypeError`]: If the index is fractional.
    /// - [`RuntimeError::IllegalBinaryOperation`]: If the kind is not
    ///   indexable or the index is not a number.
    pub fn index(&self, prop: &Self, span: Span) -> EvalResult<Self> {
        let result = match (self, prop) {
            (Self::Str(s), Self::Number(i)) => Some(string::index(s, *i, span)?),
            (Self::List(items), Self::Number(i)) => Some(list::index(items, *i, span)?),
            (Self::Range(r), Self::Number(i)) => Some(range::index(*r, *i, span)?),
            _ => None,
        };
        result.ok_or_else(|| RuntimeError::IllegalBinaryOperation {
            op: "[]".to_string(),
            lhs: self.kind(),
            rhs: prop.kind(),
            span,
        })
    }

    /// Converts a fractional-free numeric index into `usize`, checking it
    /// against `len`.
    pub(crate) fn checked_index(i: f64, len: usize, span: Span) -> EvalResult<usize> {
        if i.fract() != 0.0 {
            return Err(RuntimeError::TypeError {
                details: format!("index must be a whole number, found {i}"),
                span,
            });
        }
        #[allow(clippy::cast_possible_truncation)]
        let index = i as i64;
        match usize::try_from(index) {
            Ok(index_usize) if index_usize < len => Ok(index_usize),
            _ => Err(RuntimeError::IndexOutOfBounds { index, len, span }),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Complex(c) => write!(f, "{c}"),
            Self::List(items) => {
                write!(f, "[")?;
                for (index, value) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, "]")
            }
            Self::Vector(v) => {
                write!(f, "⟨")?;
                for (index, x) in v.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{x}")?;
                }
                write!(f, "⟩")
            }
            Self::Matrix(m) => write!(f, "{m}"),
            Self::Range(r) => write!(f, "{r}"),
            Self::Function(func) => write!(f, "{func}"),
            Self::Future(_) => write!(f, "future"),
            Self::None => write!(f, "none"),
        }
    }
}
