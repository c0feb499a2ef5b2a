/// Parse entry points and the expression ladder's top.
///
/// Holds the `parse` entry point, the shared result alias, and the
/// expression dispatcher the rest of the ladder hangs off.
pub mod core;

/// Statement parsing.
///
/// Handles statement sequences, `return` and `import`, declarations, and
/// assignment lookahead.
pub mod statement;

/// Binary operator parsing.
///
/// The left-associative middle of the precedence ladder: word comparisons,
/// symbolic comparisons and ranges, additive, and multiplicative levels.
pub mod binary;

/// Unary, power, postfix, call, and atom parsing.
///
/// The tight end of the ladder, including superscript exponents, implicit
/// multiplication, and literal forms.
pub mod unary;

/// Block and control-flow parsing.
///
/// Braced statement blocks, single-statement `:` bodies, and the
/// `if`/`for`/`while`/`loop`/`fn` constructs.
pub mod block;

/// Shared parsing helpers.
///
/// Comma-separated lists, identifier extraction, and error construction.
pub mod utils;

pub use core::{parse, ParseResult};
