/// Complex number support.
///
/// Defines the `Complex` type produced by roots of negative numbers and the
/// imaginary constant `i`. Supports addition, subtraction, multiplication,
/// real exponents via the polar form, and componentwise grouping operators.
pub mod complex;
/// Function values.
///
/// Defines the `Function` type: user definitions that close over their
/// defining scope, host builtins, and functions curried from an operator
/// applied to another function.
pub mod function;
/// Deferred values.
///
/// Defines the `Future` type produced by the `fs` module. A future holds
/// either a pending computation or the value it resolved to; `await` forces
/// it.
pub mod future;
/// List values and their elementwise operators.
pub mod list;
/// Matrix values: shape-checked addition and true matrix multiplication.
pub mod matrix;
/// Scalar numbers and their operator table.
pub mod number;
/// Half-open numeric ranges with an explicit step.
pub mod range;
/// String values: indexing, concatenation, repetition, length ordering.
pub mod string;
/// Fixed-length numeric vectors: elementwise math, dot and cross products.
pub mod vector;

pub mod core;

pub use complex::Complex;
pub use core::Value;
pub use function::{Builtin, FnKind, Function};
pub use future::Future;
pub use matrix::Matrix;
pub use range::Range;
