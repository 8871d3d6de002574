//! The process-wide builtin function table, consulted by identifier lookup
//! only after both the local and enclosing environments miss.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::error::EvalError;
use crate::value::{Builtin, Value};

static BUILTINS: Lazy<HashMap<&'static str, Builtin>> = Lazy::new(|| {
    let mut table = HashMap::new();
    for builtin in ALL {
        table.insert(builtin.name, *builtin);
    }
    table
});

const ALL: &[Builtin] = &[
    Builtin { name: "len", func: len },
    Builtin { name: "print", func: print },
    Builtin { name: "first", func: first },
    Builtin { name: "last", func: last },
    Builtin { name: "rest", func: rest },
    Builtin { name: "push", func: push },
];

pub fn lookup(name: &str) -> Option<Value> {
    BUILTINS.get(name).copied().map(Value::Builtin)
}

fn expect_arity(args: &[Value], n: usize) -> Result<(), EvalError> {
    if args.len() != n {
        return Err(EvalError::WrongNumberArguments {
            expected: n,
            got: args.len(),
        });
    }
    Ok(())
}

/// `len(x)` — byte length of a string, element count of an array.
fn len(args: &[Value]) -> Result<Value, EvalError> {
    expect_arity(args, 1)?;

    match &args[0] {
        Value::String(s) => Ok(Value::Integer(s.len() as i64)),
        Value::Array(elements) => Ok(Value::Integer(elements.len() as i64)),
        other => Err(EvalError::UnsupportedArgumentType {
            builtin: "len",
            got: other.kind(),
        }),
    }
}

/// `print(x...)` — write each argument's inspection form, space-separated,
/// followed by a newline. The only place this crate performs I/O outside of
/// the CLI binary.
fn print(args: &[Value]) -> Result<Value, EvalError> {
    let rendered: Vec<_> = args.iter().map(Value::inspect).collect();
    println!("{}", rendered.join(" "));
    Ok(Value::Nil)
}

/// `first(arr)` — the first element, or `nil` for an empty array.
fn first(args: &[Value]) -> Result<Value, EvalError> {
    expect_arity(args, 1)?;

    match &args[0] {
        Value::Array(elements) => Ok(elements.first().cloned().unwrap_or(Value::Nil)),
        other => Err(EvalError::UnsupportedArgumentType {
            builtin: "first",
            got: other.kind(),
        }),
    }
}

/// `last(arr)` — the last element, or `nil` for an empty array.
fn last(args: &[Value]) -> Result<Value, EvalError> {
    expect_arity(args, 1)?;

    match &args[0] {
        Value::Array(elements) => Ok(elements.last().cloned().unwrap_or(Value::Nil)),
        other => Err(EvalError::UnsupportedArgumentType {
            builtin: "last",
            got: other.kind(),
        }),
    }
}

/// `rest(arr)` — a new array holding every element but the first, or `nil`
/// for an empty array.
fn rest(args: &[Value]) -> Result<Value, EvalError> {
    expect_arity(args, 1)?;

    match &args[0] {
        Value::Array(elements) => {
            if elements.is_empty() {
                Ok(Value::Nil)
            } else {
                Ok(Value::Array(std::rc::Rc::new(elements[1..].to_vec())))
            }
        }
        other => Err(EvalError::UnsupportedArgumentType {
            builtin: "rest",
            got: other.kind(),
        }),
    }
}

/// `push(arr, x)` — a new array with `x` appended. Does not mutate `arr`,
/// consistent with arrays otherwise behaving as immutable values.
fn push(args: &[Value]) -> Result<Value, EvalError> {
    expect_arity(args, 2)?;

    match &args[0] {
        Value::Array(elements) => {
            let mut copy = elements.as_ref().clone();
            copy.push(args[1].clone());
            Ok(Value::Array(std::rc::Rc::new(copy)))
        }
        other => Err(EvalError::UnsupportedArgumentType {
            builtin: "push",
            got: other.kind(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueKind;

    #[test]
    fn len_over_string_and_array() {
        assert_eq!(
            len(&[Value::String("hello world".into())]),
            Ok(Value::Integer(11))
        );
        assert_eq!(
            len(&[Value::Array(std::rc::Rc::new(vec![Value::Integer(1)]))]),
            Ok(Value::Integer(1))
        );
    }

    #[test]
    fn len_rejects_unsupported_types() {
        assert_eq!(
            len(&[Value::Integer(1)]),
            Err(EvalError::UnsupportedArgumentType {
                builtin: "len",
                got: ValueKind::Integer
            })
        );
    }

    #[test]
    fn len_rejects_wrong_arity() {
        assert_eq!(
            len(&[]),
            Err(EvalError::WrongNumberArguments { expected: 1, got: 0 })
        );
    }

    #[test]
    fn push_does_not_mutate_original() {
        let original = std::rc::Rc::new(vec![Value::Integer(1)]);
        let arr = Value::Array(original.clone());
        let pushed = push(&[arr, Value::Integer(2)]).unwrap();

        assert_eq!(original.len(), 1);
        match pushed {
            Value::Array(elements) => assert_eq!(elements.len(), 2),
            _ => panic!("expected array"),
        }
    }

    #[test]
    fn rest_and_first_and_last_on_empty_array_are_nil() {
        let empty = Value::Array(std::rc::Rc::new(vec![]));
        assert_eq!(first(std::slice::from_ref(&empty)), Ok(Value::Nil));
        assert_eq!(last(std::slice::from_ref(&empty)), Ok(Value::Nil));
        assert_eq!(rest(&[empty]), Ok(Value::Nil));
    }
}
