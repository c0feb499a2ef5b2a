use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{flow, EvalResult, Flow, Interpreter},
        scope::ScopeRef,
        value::{Range, Value},
    },
    position::Span,
};

impl Interpreter {
    /// Evaluates `if`/`else`. The statement's value is the taken branch's
    /// value, or `none` when the condition is falsy and there is no `else`.
    pub(crate) fn eval_if(
        &self,
        condition: &Node,
        body: &Node,
        else_body: Option<&Node>,
        scope: &ScopeRef,
    ) -> EvalResult<Flow> {
        if flow!(self.eval(condition, scope)?).truthy() {
            self.eval(body, scope)
        } else if let Some(else_body) = else_body {
            self.eval(else_body, scope)
        } else {
            Ok(Flow::Value(Value::None))
        }
    }

    /// Evaluates a `for` loop over a list, a range, or a number `n`
    /// (shorthand for the range `0:n`). The binding lives in the enclosing
    /// scope and stays visible after the loop.
    pub(crate) fn eval_for(
        &self,
        binding: &str,
        iterable: &Node,
        body: &Node,
        span: Span,
        scope: &ScopeRef,
    ) -> EvalResult<Flow> {
        let items: Vec<Value> = match flow!(self.eval(iterable, scope)?) {
            Value::List(items) => items.iter().cloned().collect(),
            Value::Range(range) => range.iter().map(Value::Number).collect(),
            Value::Number(n) => Range::new(0.0, n, 1.0).iter().map(Value::Number).collect(),
            other => {
                return Err(RuntimeError::TypeError {
                    details: format!("cannot iterate over a {}", other.kind()),
                    span,
                })
            }
        };

        for item in items {
            scope.borrow_mut().declare(binding, item);
            flow!(self.eval(body, scope)?);
        }
        Ok(Flow::Value(Value::None))
    }

    /// Evaluates a `while` loop; the condition is re-evaluated before every
    /// iteration.
    pub(crate) fn eval_while(
        &self,
        condition: &Node,
        body: &Node,
        scope: &ScopeRef,
    ) -> EvalResult<Flow> {
        while flow!(self.eval(condition, scope)?).truthy() {
            flow!(self.eval(body, scope)?);
        }
        Ok(Flow::Value(Value::None))
    }

    /// Evaluates `loop`, which runs until a `return` travels out of the
    /// body.
    pub(crate) fn eval_loop(&self, body: &Node, scope: &ScopeRef) -> EvalResult<Flow> {
        loop {
            flow!(self.eval(body, scope)?);
        }
    }
}
