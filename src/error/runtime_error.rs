use thiserror::Error;

use crate::position::Span;

/// Represents all errors that can be raised during evaluation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuntimeError {
    /// Referenced a name with no binding in any enclosing scope.
    #[error("'{name}' is not defined")]
    UndefinedIdentifier {
        /// The name that was looked up.
        name: String,
        /// Where it was referenced.
        span: Span,
    },
    /// Called a value that is not a function.
    #[error("'{name}' is not a function")]
    NotAFunction {
        /// The name that was called.
        name: String,
        /// The span of the call.
        span: Span,
    },
    /// Awaited a value that is not a future.
    #[error("cannot await a {kind}")]
    NotAFuture {
        /// The kind of value that was awaited.
        kind: &'static str,
        /// The span of the `await` expression.
        span: Span,
    },
    /// Applied a unary operator to a value kind that does not support it.
    #[error("cannot apply '{op}' to a {kind}")]
    IllegalUnaryOperation {
        /// The operator, as written.
        op: String,
        /// The operand's kind.
        kind: &'static str,
        /// The span of the whole operation.
        span: Span,
    },
    /// Applied a binary operator to a pair of kinds that do not support it.
    #[error("cannot apply '{op}' to a {lhs} and a {rhs}")]
    IllegalBinaryOperation {
        /// The operator, as written.
        op: String,
        /// The left operand's kind.
        lhs: &'static str,
        /// The right operand's kind.
        rhs: &'static str,
        /// The span of the whole operation.
        span: Span,
    },
    /// Vector or matrix operands have incompatible dimensions.
    #[error("shape mismatch: {details}")]
    ShapeMismatch {
        /// The dimensions involved and what was required of them.
        details: String,
        /// The span of the operation.
        span: Span,
    },
    /// Imported a module that does not exist.
    #[error("no module named '{name}'")]
    ModuleNotFound {
        /// The module name as written.
        name: String,
        /// The span of the import statement.
        span: Span,
    },
    /// Imported a module that the current sandbox forbids.
    #[error("module '{name}' is not available in safe mode")]
    CapabilityDenied {
        /// The module name as written.
        name: String,
        /// The span of the import statement.
        span: Span,
    },
    /// Indexed past the end of a list, vector, matrix, or range.
    #[error("index {index} is out of bounds for length {len}")]
    IndexOutOfBounds {
        /// The requested index.
        index: i64,
        /// The number of elements actually present.
        len: usize,
        /// The span of the access.
        span: Span,
    },
    /// A value had the wrong kind for the operation at hand.
    #[error("{details}")]
    TypeError {
        /// What was expected and what turned up.
        details: String,
        /// The span of the offending expression.
        span: Span,
    },
    /// A file system operation failed.
    #[error("io error: {details}")]
    Io {
        /// The underlying error, rendered.
        details: String,
        /// The span of the call that attempted it.
        span: Span,
    },
}

impl RuntimeError {
    /// The source span the error points at.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::UndefinedIdentifier { span, .. }
            | Self::NotAFunction { span, .. }
            | Self::NotAFuture { span, .. }
            | Self::IllegalUnaryOperation { span, .. }
            | Self::IllegalBinaryOperation { span, .. }
            | Self::ShapeMismatch { span, .. }
            | Self::ModuleNotFound { span, .. }
            | Self::CapabilityDenied { span, .. }
            | Self::IndexOutOfBounds { span, .. }
            | Self::TypeError { span, .. }
            | Self::Io { span, .. } => *span,
        }
    }
}
