use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::interpreter::value::Value;

/// A shared handle to a scope; functions keep one to their defining scope so
/// closures stay alive after the defining frame exits.
pub type ScopeRef = Rc<RefCell<Scope>>;

/// One frame of the lexical scope chain.
///
/// Lookups walk from the innermost frame outwards. `declare` always writes
/// the current frame; `assign` overwrites the nearest frame that already
/// holds the name.
#[derive(Debug)]
pub struct Scope {
    /// A label for debugging, such as `"global"` or the function's name.
    pub name: String,
    /// The enclosing frame, if any.
    pub parent: Option<ScopeRef>,
    symbols: HashMap<String, Value>,
}

impl Scope {
    /// Creates the outermost frame.
    #[must_use]
    pub fn global() -> ScopeRef {
        Rc::new(RefCell::new(Self {
            name: "global".to_string(),
            parent: None,
            symbols: HashMap::new(),
        }))
    }

    /// Creates a frame nested inside `parent`.
    #[must_use]
    pub fn nested(name: impl Into<String>, parent: &ScopeRef) -> ScopeRef {
        Rc::new(RefCell::new(Self {
            name: name.into(),
            parent: Some(Rc::clone(parent)),
            symbols: HashMap::new(),
        }))
    }

    /// Looks a name up, walking the chain outwards.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.symbols.get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|p| p.borrow().get(name))
    }

    /// Binds a name in this frame, shadowing any outer binding.
    pub fn declare(&mut self, name: impl Into<String>, value: Value) {
        self.symbols.insert(name.into(), value);
    }

    /// Overwrites the nearest enclosing binding of `name`.
    ///
    /// # Returns
    /// - `true` if a binding was found and replaced.
    /// - `false` if no enclosing frame holds the name.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        if let Some(slot) = self.symbols.get_mut(name) {
            *slot = value;
            return true;
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().assign(name, value),
            None => false,
        }
    }
}
