//! The `fs` module: filesystem access behind futures.
//!
//! Each builtin captures its arguments and returns a pending future; the
//! actual filesystem call happens when the future is awaited. The module
//! carries ambient authority and is refused in safe mode.

use std::rc::Rc;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::EvalResult,
        modules::{builtin, string_arg, Exports},
        value::{Future, Value},
    },
    position::Span,
};

/// Builds the module's bindings.
#[must_use]
pub fn exports() -> Exports {
    vec![
        builtin("readfile", readfile),
        builtin("writefile", writefile),
        builtin("mkdir", mkdir),
        builtin("delete", delete),
    ]
}

fn io_error(err: &std::io::Error, span: Span) -> RuntimeError {
    RuntimeError::Io {
        details: err.to_string(),
        span,
    }
}

/// Reads a file to a string.
fn readfile(args: &[Value], span: Span) -> EvalResult<Value> {
    let path = string_arg(args, 0, "readfile", span)?.to_string();
    Ok(Value::Future(Rc::new(Future::deferred(move || {
        let text = std::fs::read_to_string(&path).map_err(|err| io_error(&err, span))?;
        Ok(Value::Str(text))
    }))))
}

/// Writes a string to a file, replacing its contents.
fn writefile(args: &[Value], span: Span) -> EvalResult<Value> {
    let path = string_arg(args, 0, "writefile", span)?.to_string();
    let data = string_arg(args, 1, "writefile", span)?.to_string();
    Ok(Value::Future(Rc::new(Future::deferred(move || {
        std::fs::write(&path, &data).map_err(|err| io_error(&err, span))?;
        Ok(Value::None)
    }))))
}

/// Creates a directory.
fn mkdir(args: &[Value], span: Span) -> EvalResult<Value> {
    let path = string_arg(args, 0, "mkdir", span)?.to_string();
    Ok(Value::Future(Rc::new(Future::deferred(move || {
        std::fs::create_dir(&path).map_err(|err| io_error(&err, span))?;
        Ok(Value::None)
    }))))
}

/// Removes a file or an empty directory.
fn delete(args: &[Value], span: Span) -> EvalResult<Value> {
    let path = string_arg(args, 0, "delete", span)?.to_string();
    Ok(Value::Future(Rc::new(Future::deferred(move || {
        let result = if std::fs::metadata(&path)
            .map_err(|err| io_error(&err, span))?
            .is_dir()
        {
            std::fs::remove_dir(&path)
        } else {
            std::fs::remove_file(&path)
        };
        result.map_err(|err| io_error(&err, span))?;
        Ok(Value::None)
    }))))
}
