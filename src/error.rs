use thiserror::Error;

use crate::position::Span;

/// Lexing errors.
///
/// Defines all error types that can occur while scanning source text into
/// tokens, such as characters the language has no use for or string literals
/// that never close.
pub mod lex_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation. Runtime
/// errors include undefined names, operators applied to value kinds that do
/// not support them, shape mismatches, and denied capabilities.
pub mod runtime_error;
/// Syntax errors.
///
/// Defines the error type produced while parsing tokens into a syntax tree,
/// carrying what the parser expected and where it gave up.
pub mod syntax_error;

pub use lex_error::LexError;
pub use runtime_error::RuntimeError;
pub use syntax_error::SyntaxError;

/// Any error a program can fail with, from scanning through evaluation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The source text could not be scanned into tokens.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// The token stream did not form a valid program.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// Evaluation failed.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// The source span the error points at.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Lex(e) => e.span(),
            Self::Syntax(e) => e.span(),
            Self::Runtime(e) => e.span(),
        }
    }

    /// A short category title for diagnostics.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Lex(_) => "Char Error",
            Self::Syntax(_) => "Syntax Error",
            Self::Runtime(_) => "Runtime Error",
        }
    }
}
