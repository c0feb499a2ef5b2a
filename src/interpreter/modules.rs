//! Host modules made available through `import`.
//!
//! Each module is a flat list of named values declared into the importing
//! scope. `std` and `physics` are pure; `fs` touches the host filesystem
//! and is refused in safe mode.

pub mod fs;
pub mod physics;
pub mod stdlib;

use std::rc::Rc;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::EvalResult,
        value::{Builtin, Function, Value},
    },
    position::Span,
};

/// A module's bindings, in export order.
pub type Exports = Vec<(&'static str, Value)>;

/// Looks a module up by name.
///
/// # Errors
/// - [`RuntimeError::ModuleNotFound`]: No module has this name.
/// - [`RuntimeError::CapabilityDenied`]: The module needs ambient authority
///   and the interpreter is in safe mode.
pub fn resolve(name: &str, safe: bool, span: Span) -> EvalResult<Exports> {
    match name {
        "std" => Ok(stdlib::exports()),
        "physics" => Ok(physics::exports()),
        "fs" if safe => Err(RuntimeError::CapabilityDenied {
            name: name.to_string(),
            span,
        }),
        "fs" => Ok(fs::exports()),
        _ => Err(RuntimeError::ModuleNotFound {
            name: name.to_string(),
            span,
        }),
    }
}

/// Wraps a host closure as an export entry.
pub(crate) fn builtin(
    name: &'static str,
    run: impl Fn(&[Value], Span) -> EvalResult<Value> + 'static,
) -> (&'static str, Value) {
    (
        name,
        Value::Function(Rc::new(Function::builtin(Builtin::new(name, run)))),
    )
}

/// Fetches argument `index` as a number.
///
/// # Errors
/// - [`RuntimeError::TypeError`]: The argument is missing or not a number.
pub(crate) fn number_arg(args: &[Value], index: usize, name: &str, span: Span) -> EvalResult<f64> {
    match args.get(index) {
        Some(Value::Number(n)) => Ok(*n),
        _ => Err(RuntimeError::TypeError {
            details: format!("{name}() expects a number for argument {}", index + 1),
            span,
        }),
    }
}

/// Fetches argument `index` as a string.
///
/// # Errors
/// - [`RuntimeError::TypeError`]: The argument is missing or not a string.
pub(crate) fn string_arg<'a>(
    args: &'a [Value],
    index: usize,
    name: &str,
    span: Span,
) -> EvalResult<&'a str> {
    match args.get(index) {
        Some(Value::Str(s)) => Ok(s),
        _ => Err(RuntimeError::TypeError {
            details: format!("{name}() expects a string for argument {}", index + 1),
            span,
        }),
    }
}
