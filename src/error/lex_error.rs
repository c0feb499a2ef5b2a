use thiserror::Error;

use crate::position::Span;

/// Represents all errors that can occur while scanning source text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LexError {
    /// Encountered a character the language does not use.
    #[error("illegal character '{ch}'")]
    IllegalCharacter {
        /// The offending character.
        ch: char,
        /// Where it sits in the source.
        span: Span,
    },
    /// A string literal was opened but never closed.
    #[error("unterminated string literal")]
    UnterminatedString {
        /// From the opening quote to the end of input.
        span: Span,
    },
    /// A `{` inside a string literal was never matched by a `}`.
    #[error("unterminated interpolation in string literal")]
    UnterminatedInterpolation {
        /// From the opening brace to the end of the string.
        span: Span,
    },
}

impl LexError {
    /// The source span the error points at.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::IllegalCharacter { span, .. }
            | Self::UnterminatedString { span }
            | Self::UnterminatedInterpolation { span } => *span,
        }
    }
}
