//! The runtime value system: a closed set of tagged variants, each with a
//! truthiness rule, an `inspect()` rendering and (for three of them) a
//! stable [`HashKey`].

mod hashkey;

pub use hashkey::HashKey;

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::ast::{Block, Identifier};
use crate::environment::Env;
use crate::error::EvalError;

/// A function value: its parameters, its body, and the environment that was
/// active when the `fn` expression evaluated — the closure. Held behind an
/// `Rc` so every invocation (and every nested closure created inside it)
/// shares one copy rather than deep-cloning the AST per call.
#[derive(Debug)]
pub struct Function {
    pub params: Vec<Identifier>,
    pub body: Block,
    pub env: Env,
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.params == other.params && self.body == other.body && self.env == other.env
    }
}

/// A builtin callable. Plain function pointers (no captured state), matching
/// the process-wide, read-only-after-init builtin table.
#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: fn(&[Value]) -> Result<Value, EvalError>,
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && std::ptr::eq(self.func as *const (), other.func as *const ())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    String(Rc<str>),
    Array(Rc<Vec<Value>>),
    Hash(Rc<HashMap<HashKey, Value>>),
    Nil,
    ReturnValue(Box<Value>),
    Function(Rc<Function>),
    Builtin(Builtin),
    /// Internal-only: the reference implementation carries this variant but
    /// never returns it from evaluation, since errors propagate as a host
    /// failure (`Result::Err`) instead. Kept for parity with the closed
    /// variant set; nothing in this crate constructs it as a dispatch result.
    Error(Rc<str>),
}

/// The `ObjectType`/variant tag, used in error messages and `UnexpectedObjectType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Integer,
    Boolean,
    String,
    Array,
    Hash,
    Nil,
    ReturnValue,
    Function,
    Builtin,
    Error,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Integer => "INTEGER",
            ValueKind::Boolean => "BOOLEAN",
            ValueKind::String => "STRING",
            ValueKind::Array => "ARRAY",
            ValueKind::Hash => "HASH",
            ValueKind::Nil => "NIL",
            ValueKind::ReturnValue => "RETURN_VALUE",
            ValueKind::Function => "FUNCTION",
            ValueKind::Builtin => "BUILTIN",
            ValueKind::Error => "ERROR",
        };
        write!(f, "{name}")
    }
}

pub const TRUE: Value = Value::Boolean(true);
pub const FALSE: Value = Value::Boolean(false);
pub const NIL: Value = Value::Nil;

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Integer(_) => ValueKind::Integer,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Hash(_) => ValueKind::Hash,
            Value::Nil => ValueKind::Nil,
            Value::ReturnValue(_) => ValueKind::ReturnValue,
            Value::Function(_) => ValueKind::Function,
            Value::Builtin(_) => ValueKind::Builtin,
            Value::Error(_) => ValueKind::Error,
        }
    }

    /// Per-variant truthiness, used by `if` and the `!` operator.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Integer(n) => *n != 0,
            Value::Boolean(b) => *b,
            Value::String(s) => !s.is_empty(),
            Value::Array(elements) => !elements.is_empty(),
            Value::Hash(pairs) => !pairs.is_empty(),
            Value::Nil => false,
            Value::ReturnValue(inner) => inner.is_truthy(),
            Value::Function(_) | Value::Builtin(_) | Value::Error(_) => false,
        }
    }

    /// Derive this value's `HashKey`, or `None` if its variant isn't hashable.
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Value::Integer(n) => Some(HashKey::integer(*n)),
            Value::Boolean(b) => Some(HashKey::boolean(*b)),
            Value::String(s) => Some(HashKey::string(s)),
            _ => None,
        }
    }

    pub fn inspect(&self) -> String {
        match self {
            Value::Integer(n) => n.to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::String(s) => s.to_string(),
            Value::Array(elements) => {
                let rendered: Vec<_> = elements.iter().map(Value::inspect).collect();
                format!("[{}]", rendered.join(", "))
            }
            Value::Hash(pairs) => {
                let rendered: Vec<_> = pairs
                    .values()
                    .zip(pairs.keys())
                    .map(|(value, key)| format!("{}: {}", key.original.inspect(), value.inspect()))
                    .collect();
                format!("{{{}}}", rendered.join(", "))
            }
            Value::Nil => "nil".to_string(),
            Value::ReturnValue(inner) => inner.inspect(),
            Value::Function(func) => {
                let params: Vec<_> = func.params.iter().map(|p| p.name.clone()).collect();
                format!("fn({}) {{ {} }}", params.join(", "), func.body)
            }
            Value::Builtin(_) => "builtin function".to_string(),
            Value::Error(msg) => format!("ERROR: {msg}"),
        }
    }

    /// Deep structural equality, used by `==`/`!=` across mismatched or
    /// otherwise-unhandled operand variants.
    pub fn structurally_equal(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Nil, Value::Nil) => true,
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b.iter())
                        .all(|(x, y)| x.structurally_equal(y))
            }
            (Value::Hash(a), Value::Hash(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(key, value)| b.get(key).is_some_and(|v| v.structurally_equal(value)))
            }
            (Value::ReturnValue(a), Value::ReturnValue(b)) => a.structurally_equal(b),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness_matches_spec_table() {
        assert!(Value::Integer(1).is_truthy());
        assert!(!Value::Integer(0).is_truthy());
        assert!(Value::Boolean(true).is_truthy());
        assert!(!Value::Boolean(false).is_truthy());
        assert!(!Value::String("".into()).is_truthy());
        assert!(Value::String("x".into()).is_truthy());
        assert!(!Value::Nil.is_truthy());
        assert!(!Value::Array(Rc::new(vec![])).is_truthy());
        assert!(Value::Array(Rc::new(vec![Value::Nil])).is_truthy());
    }

    #[test]
    fn inspect_renders_primitives() {
        assert_eq!(Value::Integer(42).inspect(), "42");
        assert_eq!(Value::Boolean(true).inspect(), "true");
        assert_eq!(Value::Nil.inspect(), "nil");
        assert_eq!(Value::String("hi".into()).inspect(), "hi");
    }

    #[test]
    fn structural_equality_ignores_identity() {
        let a = Value::Array(Rc::new(vec![Value::Integer(1), Value::Integer(2)]));
        let b = Value::Array(Rc::new(vec![Value::Integer(1), Value::Integer(2)]));
        assert!(a.structurally_equal(&b));
    }
}
