use thiserror::Error;

use crate::position::Span;

/// A parse failure: the parser expected one construct and found another.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("expected {expected}")]
pub struct SyntaxError {
    /// A description of what would have been valid here.
    pub expected: String,
    /// The span of the token that did not fit.
    pub span: Span,
}

impl SyntaxError {
    /// Builds an error from anything printable.
    pub fn new(expected: impl Into<String>, span: Span) -> Self {
        Self {
            expected: expected.into(),
            span,
        }
    }

    /// The source span the error points at.
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }
}
