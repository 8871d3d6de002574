//! Name-to-value bindings with an enclosing-scope chain for closures.
//!
//! Environments form a parent-pointer tree: a child is created only when
//! entering a new scope and is never re-parented, so the graph is acyclic
//! even though multiple closures may share a parent. `Env` is a cheap
//! `Rc<RefCell<_>>` handle — cloning it shares the same underlying scope,
//! which is what gives closures and recursive calls true reference
//! semantics rather than snapshot-at-capture-time semantics.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::value::Value;

#[derive(Debug, Default)]
struct EnvironmentData {
    store: HashMap<String, Value>,
    outer: Option<Env>,
}

#[derive(Debug, Clone)]
pub struct Env(Rc<RefCell<EnvironmentData>>);

impl PartialEq for Env {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Env {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(EnvironmentData::default())))
    }

    /// Create a new scope enclosed by `self` — the handle a `Func` expression
    /// captures when it evaluates.
    pub fn new_enclosed(&self) -> Self {
        Self(Rc::new(RefCell::new(EnvironmentData {
            store: HashMap::new(),
            outer: Some(self.clone()),
        })))
    }

    /// Look up `name` in this scope, then each enclosing scope in turn.
    /// Does *not* consult the builtin table — callers fall back to that
    /// themselves, matching the evaluator's identifier-resolution order.
    pub fn get(&self, name: &str) -> Option<Value> {
        let data = self.0.borrow();
        if let Some(value) = data.store.get(name) {
            return Some(value.clone());
        }
        data.outer.as_ref().and_then(|outer| outer.get(name))
    }

    /// Bind `name` in *this* scope. Never mutates an enclosing scope, so a
    /// callee's `let` can't clobber the caller's bindings.
    pub fn set(&self, name: impl Into<String>, value: Value) {
        self.0.borrow_mut().store.insert(name.into(), value);
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_through_enclosing_scope() {
        let outer = Env::new();
        outer.set("x", Value::Integer(1));

        let inner = outer.new_enclosed();
        assert_eq!(inner.get("x"), Some(Value::Integer(1)));
    }

    #[test]
    fn local_define_does_not_leak_to_outer() {
        let outer = Env::new();
        let inner = outer.new_enclosed();
        inner.set("y", Value::Integer(2));

        assert_eq!(outer.get("y"), None);
        assert_eq!(inner.get("y"), Some(Value::Integer(2)));
    }

    #[test]
    fn shared_handle_observes_nested_mutation() {
        let env = Env::new();
        let alias = env.clone();
        alias.set("z", Value::Integer(3));

        assert_eq!(env.get("z"), Some(Value::Integer(3)));
    }

    #[test]
    fn missing_name_resolves_to_none() {
        let env = Env::new();
        assert_eq!(env.get("missing"), None);
    }
}
