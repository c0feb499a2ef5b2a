use std::io::Write;
use std::rc::Rc;

use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{flow, EvalResult, Flow, Interpreter},
        scope::{Scope, ScopeRef},
        value::{FnKind, Function, Value},
    },
    position::Span,
};

impl Interpreter {
    /// Evaluates `fn name(params) ...`, binding the function in the
    /// enclosing scope. The statement's value is the function itself.
    pub(crate) fn eval_func_def(
        name: &str,
        params: &[String],
        body: &Rc<Node>,
        scope: &ScopeRef,
    ) -> EvalResult<Flow> {
        let function = Value::Function(Rc::new(Function::user(
            name,
            params.to_vec(),
            Rc::clone(body),
            Rc::clone(scope),
        )));
        scope.borrow_mut().declare(name, function.clone());
        Ok(Flow::Value(function))
    }

    /// Evaluates a call. `print` is handled here rather than looked up, so
    /// it cannot be shadowed or passed around.
    pub(crate) fn eval_func_call(
        &self,
        name: &str,
        name_span: Span,
        args: &[Node],
        span: Span,
        scope: &ScopeRef,
    ) -> EvalResult<Flow> {
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(flow!(self.eval(arg, scope)?));
        }

        if name == "print" {
            self.print(&values, span)?;
            return Ok(Flow::Value(Value::None));
        }

        let callee = scope.borrow().get(name);
        match callee {
            Some(Value::Function(function)) => {
                Ok(Flow::Value(self.call(&function, &values, span)?))
            }
            _ => Err(RuntimeError::NotAFunction {
                name: name.to_string(),
                span: name_span,
            }),
        }
    }

    /// Calls a function value with already-evaluated arguments.
    ///
    /// # Errors
    /// - [`RuntimeError`]: The function's body (or host implementation)
    ///   failed.
    pub fn call(&self, function: &Rc<Function>, args: &[Value], span: Span) -> EvalResult<Value> {
        match &function.kind {
            FnKind::User {
                params,
                body,
                scope,
            } => {
                let frame = Scope::nested(function.name.clone(), scope);
                {
                    let mut frame = frame.borrow_mut();
                    for (i, param) in params.iter().enumerate() {
                        let value = args.get(i).cloned().unwrap_or(Value::None);
                        frame.declare(param.clone(), value);
                    }
                }
                let result = self.eval(body, &frame)?;
                // A block body only produces a value through `return`; an
                // expression body is the value itself.
                if matches!(**body, Node::Block { .. }) {
                    match result {
                        Flow::Return(value) => Ok(value),
                        Flow::Value(_) => Ok(Value::None),
                    }
                } else {
                    Ok(result.value())
                }
            }
            FnKind::Builtin(builtin) => (builtin.run)(args, span),
            FnKind::Curried { lhs, op, inner } => {
                let result = self.call(inner, args, span)?;
                lhs.binary(*op, &result, span)
            }
        }
    }

    /// Writes the space-joined arguments and a newline to the output sink.
    fn print(&self, args: &[Value], span: Span) -> EvalResult<()> {
        let line = args
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(self.out.borrow_mut(), "{line}").map_err(|err| RuntimeError::Io {
            details: err.to_string(),
            span,
        })
    }
}
