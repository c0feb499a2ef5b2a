use std::cell::RefCell;
use std::fmt;

use crate::interpreter::{evaluator::core::EvalResult, value::Value};

type Thunk = Box<dyn FnOnce() -> EvalResult<Value>>;

enum State {
    /// The computation has not run yet.
    Pending(Thunk),
    /// The computation ran and produced this value.
    Resolved(Value),
}

/// A deferred value, produced by host modules whose work is worth delaying.
///
/// The deferred computation runs the first time the future is awaited; the
/// result is kept, so awaiting again hands back the same value without
/// re-running anything.
pub struct Future {
    state: RefCell<State>,
}

impl Future {
    /// Wraps a deferred computation.
    #[must_use]
    pub fn deferred(thunk: impl FnOnce() -> EvalResult<Value> + 'static) -> Self {
        Self {
            state: RefCell::new(State::Pending(Box::new(thunk))),
        }
    }

    /// A future that is already fulfilled.
    #[must_use]
    pub fn resolved(value: Value) -> Self {
        Self {
            state: RefCell::new(State::Resolved(value)),
        }
    }

    /// Forces the future, running the deferred computation if it has not
    /// run yet.
    ///
    /// # Errors
    /// Whatever the deferred computation fails with, on its first run. A
    /// failed future settles to `none`.
    pub fn resolve(&self) -> EvalResult<Value> {
        let state = self.state.replace(State::Resolved(Value::None));
        match state {
            State::Pending(thunk) => {
                let value = thunk()?;
                self.state.replace(State::Resolved(value.clone()));
                Ok(value)
            }
            State::Resolved(value) => {
                self.state.replace(State::Resolved(value.clone()));
                Ok(value)
            }
        }
    }
}

// Futures compare by identity, like functions.
impl PartialEq for Future {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl fmt::Debug for Future {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &*self.state.borrow() {
            State::Pending(_) => "pending",
            State::Resolved(_) => "resolved",
        };
        write!(f, "<future {state}>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn deferred_work_runs_once() {
        let runs = Rc::new(Cell::new(0));
        let counter = Rc::clone(&runs);
        let future = Future::deferred(move || {
            counter.set(counter.get() + 1);
            Ok(Value::Number(7.0))
        });
        assert_eq!(future.resolve().unwrap(), Value::Number(7.0));
        assert_eq!(future.resolve().unwrap(), Value::Number(7.0));
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn resolved_futures_hand_back_their_value() {
        let future = Future::resolved(Value::Boolean(true));
        assert_eq!(future.resolve().unwrap(), Value::Boolean(true));
    }
}
