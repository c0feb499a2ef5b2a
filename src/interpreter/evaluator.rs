/// Control flow evaluation.
///
/// Implements `if`/`else`, the three loop forms, and how an early `return`
/// travels out of them.
pub mod control;

/// Core evaluation logic and the interpreter context.
///
/// Contains the main evaluation engine: literals, names, assignment,
/// operator application, string interpolation, `await`, and `import`.
pub mod core;

/// Function evaluation.
///
/// Handles definitions, user and built-in calls, operator-curried functions,
/// and the `print` builtin's path to the configured output sink.
pub mod function;

pub use core::{EvalResult, Flow, Interpreter};
