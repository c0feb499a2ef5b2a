//! # vesper
//!
//! vesper is a small dynamically-typed expression language with a
//! tree-walking interpreter. It supports numbers, booleans, interpolated
//! strings, complex numbers, vectors and matrices, lists, ranges, closures,
//! control flow, cooperative futures, and capability-gated module imports.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(
    clippy::missing_errors_doc,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation
)]

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use crate::{
    error::Error,
    interpreter::{
        evaluator::Interpreter,
        lexer::lex,
        modules,
        parser::parse,
        scope::{Scope, ScopeRef},
        value::Value,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Node` enum and related types that represent
/// the syntactic structure of source code as a tree. The AST is built by
/// the parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines node types for all language constructs.
/// - Attaches source spans to nodes for error reporting.
/// - Defines the operator vocabularies shared by the parser and evaluator.
pub mod ast;

/// Provides unified error types for lexing, parsing, and evaluation.
///
/// This module defines all errors that can be raised while running a
/// program. Every error carries the span of the failing construct so
/// diagnostics can point at the exact slice of source.
///
/// # Responsibilities
/// - Defines error enums for each pipeline phase.
/// - Attaches spans and descriptive messages.
/// - Unifies the phases behind a single `Error` type.
pub mod error;

/// Orchestrates the entire process of code execution.
///
/// This module ties together the lexer, parser, evaluator, value model,
/// scope chain, and host modules to provide the complete runtime.
///
/// # Responsibilities
/// - Coordinates all core components.
/// - Provides the pipeline the crate-level entry points drive.
pub mod interpreter;

/// Source spans and diagnostic rendering.
///
/// Byte-range spans, row/column derivation, and the source snippet shown
/// above a diagnostic.
pub mod position;

/// A reusable evaluation session.
///
/// Holds the global scope and the interpreter context, so several programs
/// can run against the same bindings. The `std` module is imported
/// automatically when the session is created.
pub struct Runtime {
    interpreter: Interpreter,
    globals: ScopeRef,
}

impl Runtime {
    /// Creates a session writing `print` output to `out`.
    ///
    /// With `safe` set, modules carrying ambient authority (`fs`) refuse to
    /// import.
    #[must_use]
    pub fn new(safe: bool, out: Rc<RefCell<dyn Write>>) -> Self {
        let globals = Scope::global();
        {
            let mut scope = globals.borrow_mut();
            for (name, value) in modules::stdlib::exports() {
                scope.declare(name, value);
            }
        }
        Self {
            interpreter: Interpreter::new(out, safe),
            globals,
        }
    }

    /// Runs a program against the session's global scope.
    ///
    /// # Returns
    /// The value of the last statement, or of a top-level `return`.
    ///
    /// # Errors
    /// - [`Error`]: The first lexical, syntax, or runtime failure.
    pub fn eval(&self, source: &str) -> Result<Value, Error> {
        let tokens = lex(source)?;
        let program = parse(&tokens)?;
        let flow = self.interpreter.eval(&program, &self.globals)?;
        Ok(flow.value())
    }
}

/// Evaluates a program with full capabilities, printing to stdout.
///
/// # Errors
/// Returns the first lexical, syntax, or runtime failure.
///
/// # Examples
/// ```
/// use vesper::{evaluate, interpreter::value::Value};
///
/// assert_eq!(evaluate("1 + 2 * 3").unwrap(), Value::Number(7.0));
/// assert_eq!(evaluate("let x = 5\n2x").unwrap(), Value::Number(10.0));
/// ```
pub fn evaluate(source: &str) -> Result<Value, Error> {
    evaluate_with(source, false, Rc::new(RefCell::new(std::io::stdout())))
}

/// Evaluates a program with an explicit capability flag and output sink.
///
/// # Errors
/// Returns the first lexical, syntax, or runtime failure.
pub fn evaluate_with(
    source: &str,
    safe: bool,
    out: Rc<RefCell<dyn Write>>,
) -> Result<Value, Error> {
    Runtime::new(safe, out).eval(source)
}
