use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use crate::{
    ast::{AssignOp, BinaryOp, GroupOp, Node, StrPiece, UnaryOp},
    error::RuntimeError,
    interpreter::{
        modules,
        scope::ScopeRef,
        value::{Matrix, Value},
    },
    position::Span,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// How a value leaves an evaluation step.
///
/// Most expressions produce `Value`. A `return` statement produces `Return`,
/// which every enclosing construct passes outward untouched until a function
/// call (or the program entry point) unwraps it.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// An ordinary result; evaluation continues.
    Value(Value),
    /// An early `return` travelling out to the nearest call boundary.
    Return(Value),
}

impl Flow {
    /// The carried value, whichever way it is travelling.
    #[must_use]
    pub fn value(self) -> Value {
        match self {
            Self::Value(value) | Self::Return(value) => value,
        }
    }
}

/// Unwraps a [`Flow`], propagating an early `return` out of the enclosing
/// evaluation function.
macro_rules! flow {
    ($flow:expr) => {
        match $flow {
            $crate::interpreter::evaluator::core::Flow::Return(value) => {
                return Ok($crate::interpreter::evaluator::core::Flow::Return(value));
            }
            $crate::interpreter::evaluator::core::Flow::Value(value) => value,
        }
    };
}
pub(crate) use flow;

/// Stores the runtime evaluation context for one program run.
///
/// Holds everything evaluation needs besides the scope chain: the sink
/// `print` writes to and the capability switch for ambient-authority
/// modules. Nothing here is global; two interpreters never share state.
pub struct Interpreter {
    /// Where `print` writes.
    pub out: Rc<RefCell<dyn Write>>,
    /// When set, modules with ambient authority refuse to import.
    pub safe: bool,
}

impl Interpreter {
    /// Creates an interpreter writing to `out`.
    #[must_use]
    pub fn new(out: Rc<RefCell<dyn Write>>, safe: bool) -> Self {
        Self { out, safe }
    }

    /// Evaluates a node and returns the resulting flow.
    ///
    /// This is the main entry point for evaluation. The evaluator
    /// dispatches based on node variant: literals, names, assignment,
    /// operator application, control flow, functions, `await`, and
    /// `import`.
    ///
    /// # Parameters
    /// - `node`: The node to evaluate.
    /// - `scope`: The innermost scope frame.
    ///
    /// # Errors
    /// - [`RuntimeError`]: The first failure anywhere beneath the node.
    pub fn eval(&self, node: &Node, scope: &ScopeRef) -> EvalResult<Flow> {
        match node {
            Node::Number { value, .. } => Ok(Flow::Value(Value::Number(*value))),
            Node::Boolean { value, .. } => Ok(Flow::Value(Value::Boolean(*value))),
            Node::Str { pieces, .. } => self.eval_str(pieces, scope),
            Node::List { items, .. } => self.eval_list(items, scope),
            Node::Vector { components, span } => self.eval_vector(components, *span, scope),
            Node::Matrix { rows, span } => self.eval_matrix(rows, *span, scope),
            Node::Identifier { name, span } => Self::eval_identifier(name, *span, scope),
            Node::Declaration { name, value, .. } => self.eval_declaration(name, value, scope),
            Node::Assignment {
                name,
                op,
                value,
                span,
            } => self.eval_assignment(name, *op, value.as_deref(), *span, scope),
            Node::Unary { op, operand, span } => self.eval_unary(*op, operand, *span, scope),
            Node::Binary { lhs, op, rhs, span } => self.eval_binary(lhs, *op, rhs, *span, scope),
            Node::Grouping { op, operand, span } => {
                self.eval_grouping(*op, operand, *span, scope)
            }
            Node::If {
                condition,
                body,
                else_body,
                ..
            } => self.eval_if(condition, body, else_body.as_deref(), scope),
            Node::For {
                binding,
                iterable,
                body,
                span,
            } => self.eval_for(binding, iterable, body, *span, scope),
            Node::While {
                condition, body, ..
            } => self.eval_while(condition, body, scope),
            Node::Loop { body, .. } => self.eval_loop(body, scope),
            Node::FuncDef {
                name,
                params,
                body,
                ..
            } => Self::eval_func_def(name, params, body, scope),
            Node::FuncCall {
                name,
                name_span,
                args,
                span,
            } => self.eval_func_call(name, *name_span, args, *span, scope),
            Node::Return { value, .. } => self.eval_return(value.as_deref(), scope),
            Node::Await { operand, span } => self.eval_await(operand, *span, scope),
            Node::PropAccess { target, prop, span } => {
                self.eval_prop_access(target, prop, *span, scope)
            }
            Node::Import { module, span } => self.eval_import(module, *span, scope),
            Node::Block { statements, .. } => self.eval_block(statements, scope),
        }
    }

    /// Evaluates a statement sequence; the block's value is the last
    /// statement's, or `none` for an empty block.
    pub(crate) fn eval_block(&self, statements: &[Node], scope: &ScopeRef) -> EvalResult<Flow> {
        let mut last = Value::None;
        for statement in statements {
            last = flow!(self.eval(statement, scope)?);
        }
        Ok(Flow::Value(last))
    }

    fn eval_str(&self, pieces: &[StrPiece], scope: &ScopeRef) -> EvalResult<Flow> {
        let mut text = String::new();
        for piece in pieces {
            match piece {
                StrPiece::Literal(literal) => text.push_str(literal),
                StrPiece::Expr(expr) => {
                    let value = flow!(self.eval(expr, scope)?);
                    text.push_str(&value.to_string());
                }
            }
        }
        Ok(Flow::Value(Value::Str(text)))
    }

    fn eval_list(&self, items: &[Node], scope: &ScopeRef) -> EvalResult<Flow> {
        let mut values = Vec::with_capacity(items.len());
        for item in items {
            values.push(flow!(self.eval(item, scope)?));
        }
        Ok(Flow::Value(values.into()))
    }

    fn eval_vector(
        &self,
        components: &[Node],
        span: Span,
        scope: &ScopeRef,
    ) -> EvalResult<Flow> {
        let mut numbers = Vec::with_capacity(components.len());
        for component in components {
            numbers.push(self.eval_number(component, span, scope, "vectors")?);
        }
        Ok(Flow::Value(numbers.into()))
    }

    fn eval_matrix(
        &self,
        rows: &[Vec<Node>],
        span: Span,
        scope: &ScopeRef,
    ) -> EvalResult<Flow> {
        let mut data = Vec::with_capacity(rows.len());
        for row in rows {
            let mut numbers = Vec::with_capacity(row.len());
            for element in row {
                numbers.push(self.eval_number(element, span, scope, "matrices")?);
            }
            data.push(numbers);
        }
        let matrix = Matrix::from_rows(data).ok_or(RuntimeError::ShapeMismatch {
            details: "matrix rows must all have the same, non-zero length".to_string(),
            span,
        })?;
        Ok(Flow::Value(matrix.into()))
    }

    /// Evaluates an element that must come out numeric, as vector and
    /// matrix literals require.
    fn eval_number(
        &self,
        node: &Node,
        span: Span,
        scope: &ScopeRef,
        container: &str,
    ) -> EvalResult<f64> {
        match self.eval(node, scope)?.value() {
            Value::Number(n) => Ok(n),
            other => Err(RuntimeError::TypeError {
                details: format!("{container} can only take numbers, found a {}", other.kind()),
                span,
            }),
        }
    }

    fn eval_identifier(name: &str, span: Span, scope: &ScopeRef) -> EvalResult<Flow> {
        scope
            .borrow()
            .get(name)
            .map(Flow::Value)
            .ok_or_else(|| RuntimeError::UndefinedIdentifier {
                name: name.to_string(),
                span,
            })
    }

    fn eval_declaration(&self, name: &str, value: &Node, scope: &ScopeRef) -> EvalResult<Flow> {
        let value = flow!(self.eval(value, scope)?);
        scope.borrow_mut().declare(name, value.clone());
        Ok(Flow::Value(value))
    }

    /// Evaluates `name = expr`, the compound forms, and `++`/`--`.
    ///
    /// Plain and compound assignment yield the value written; `++` and `--`
    /// yield the value the name held before.
    fn eval_assignment(
        &self,
        name: &str,
        op: AssignOp,
        value: Option<&Node>,
        span: Span,
        scope: &ScopeRef,
    ) -> EvalResult<Flow> {
        let rhs = match value {
            Some(node) => flow!(self.eval(node, scope)?),
            None => Value::Number(1.0),
        };

        let written = match op.binary_op() {
            None => rhs,
            Some(binary) => {
                let old = scope.borrow().get(name).ok_or_else(|| {
                    RuntimeError::UndefinedIdentifier {
                        name: name.to_string(),
                        span,
                    }
                })?;
                let new = old.binary(binary, &rhs, span)?;
                if matches!(op, AssignOp::Inc | AssignOp::Dec) {
                    if !scope.borrow_mut().assign(name, new) {
                        return Err(RuntimeError::UndefinedIdentifier {
                            name: name.to_string(),
                            span,
                        });
                    }
                    return Ok(Flow::Value(old));
                }
                new
            }
        };

        if !scope.borrow_mut().assign(name, written.clone()) {
            return Err(RuntimeError::UndefinedIdentifier {
                name: name.to_string(),
                span,
            });
        }
        Ok(Flow::Value(written))
    }

    fn eval_unary(
        &self,
        op: UnaryOp,
        operand: &Node,
        span: Span,
        scope: &ScopeRef,
    ) -> EvalResult<Flow> {
        let value = flow!(self.eval(operand, scope)?);
        Ok(Flow::Value(value.unary(op, span)?))
    }

    fn eval_binary(
        &self,
        lhs: &Node,
        op: BinaryOp,
        rhs: &Node,
        span: Span,
        scope: &ScopeRef,
    ) -> EvalResult<Flow> {
        let left = flow!(self.eval(lhs, scope)?);
        let right = flow!(self.eval(rhs, scope)?);
        Ok(Flow::Value(left.binary(op, &right, span)?))
    }

    fn eval_grouping(
        &self,
        op: GroupOp,
        operand: &Node,
        span: Span,
        scope: &ScopeRef,
    ) -> EvalResult<Flow> {
        let value = flow!(self.eval(operand, scope)?);
        Ok(Flow::Value(value.grouping(op, span)?))
    }

    fn eval_return(&self, value: Option<&Node>, scope: &ScopeRef) -> EvalResult<Flow> {
        let value = match value {
            Some(node) => flow!(self.eval(node, scope)?),
            None => Value::None,
        };
        Ok(Flow::Return(value))
    }

    fn eval_await(&self, operand: &Node, span: Span, scope: &ScopeRef) -> EvalResult<Flow> {
        let value = flow!(self.eval(operand, scope)?);
        match value {
            Value::Future(future) => Ok(Flow::Value(future.resolve()?)),
            other => Err(RuntimeError::NotAFuture {
                kind: other.kind(),
                span,
            }),
        }
    }

    fn eval_prop_access(
        &self,
        target: &Node,
        prop: &Node,
        span: Span,
        scope: &ScopeRef,
    ) -> EvalResult<Flow> {
        let target = flow!(self.eval(target, scope)?);
        let prop = flow!(self.eval(prop, scope)?);
        Ok(Flow::Value(target.index(&prop, span)?))
    }

    fn eval_import(&self, module: &str, span: Span, scope: &ScopeRef) -> EvalResult<Flow> {
        let exports = modules::resolve(module, self.safe, span)?;
        let mut scope = scope.borrow_mut();
        for (name, value) in exports {
            scope.declare(name, value);
        }
        Ok(Flow::Value(Value::None))
    }
}
