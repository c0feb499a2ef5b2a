use std::fmt;
use std::rc::Rc;

use crate::{
    ast::{BinaryOp, Node},
    interpreter::{evaluator::core::EvalResult, scope::ScopeRef, value::Value},
    position::Span,
};

/// The signature of a host-provided function.
pub type BuiltinFn = dyn Fn(&[Value], Span) -> EvalResult<Value>;

/// A function provided by a host module, such as `round` or `readfile`.
#[derive(Clone)]
pub struct Builtin {
    /// The exported name.
    pub name: &'static str,
    /// The host implementation; the span is that of the call, for errors.
    pub run: Rc<BuiltinFn>,
}

impl Builtin {
    /// Wraps a host closure as a builtin.
    pub fn new(name: &'static str, run: impl Fn(&[Value], Span) -> EvalResult<Value> + 'static) -> Self {
        Self {
            name,
            run: Rc::new(run),
        }
    }
}

/// What a function does when called.
pub enum FnKind {
    /// A function defined in the language. The body is shared with its AST
    /// node and the scope is the one the definition closed over.
    User {
        params: Vec<String>,
        body: Rc<Node>,
        scope: ScopeRef,
    },
    /// A host-provided function.
    Builtin(Builtin),
    /// A function built by applying an operator to another function:
    /// `5 * double` calls `double`, then multiplies the result by 5.
    Curried {
        lhs: Value,
        op: BinaryOp,
        inner: Rc<Function>,
    },
}

/// A callable value.
pub struct Function {
    /// The name it was defined or exported under.
    pub name: String,
    pub kind: FnKind,
}

impl Function {
    /// Creates a function defined in the language, closing over `scope`.
    #[must_use]
    pub fn user(name: impl Into<String>, params: Vec<String>, body: Rc<Node>, scope: ScopeRef) -> Self {
        Self {
            name: name.into(),
            kind: FnKind::User {
                params,
                body,
                scope,
            },
        }
    }

    /// Wraps a builtin as a function value.
    #[must_use]
    pub fn builtin(builtin: Builtin) -> Self {
        Self {
            name: builtin.name.to_string(),
            kind: FnKind::Builtin(builtin),
        }
    }

    /// Builds the curried form of `lhs op inner(..)`.
    #[must_use]
    pub fn curried(lhs: Value, op: BinaryOp, inner: &Rc<Self>) -> Self {
        Self {
            name: inner.name.clone(),
            kind: FnKind::Curried {
                lhs,
                op,
                inner: Rc::clone(inner),
            },
        }
    }
}

// Functions compare by identity: two values are equal only when they are the
// same definition.
impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

// A user function's captured scope can reach the function itself, so Debug
// must not recurse into it.
impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function {}>", self.name)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function {}>", self.name)
    }
}
