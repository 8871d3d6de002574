//! Evaluate-time error taxonomy: a flat set of sentinel kinds, rendered as
//! `Error: <kind>` the way the reference implementation's REPL/CLI does.

use std::fmt;

use crate::value::ValueKind;

#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    EmptyNodeInput,
    UnexpectedNodeType,
    UnexpectedObjectType { expected: &'static str, got: ValueKind },
    UnexpectedOperatorType { operator: String, operand_type: ValueKind },
    IdentifierNotFound { name: String },
    NotAFunction { got: ValueKind },
    IndexOutOfRange { index: i64, len: usize },
    UnhashableType { got: ValueKind },
    KeyNotFound,
    WrongNumberArguments { expected: usize, got: usize },
    UnsupportedArgumentType { builtin: &'static str, got: ValueKind },
    DivisionByZero,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::EmptyNodeInput => write!(f, "Error: empty node input"),
            EvalError::UnexpectedNodeType => write!(f, "Error: unexpected node type"),
            EvalError::UnexpectedObjectType { expected, got } => {
                write!(f, "Error: unexpected object type (expected {expected}, got {got})")
            }
            EvalError::UnexpectedOperatorType { operator, operand_type } => write!(
                f,
                "Error: unexpected operator type ('{operator}' on {operand_type})"
            ),
            EvalError::IdentifierNotFound { name } => {
                write!(f, "Error: identifier not found: {name}")
            }
            EvalError::NotAFunction { got } => write!(f, "Error: not a function: {got}"),
            EvalError::IndexOutOfRange { index, len } => {
                write!(f, "Error: index out of range: {index} (len {len})")
            }
            EvalError::UnhashableType { got } => write!(f, "Error: unhashable type: {got}"),
            EvalError::KeyNotFound => write!(f, "Error: key not found"),
            EvalError::WrongNumberArguments { expected, got } => write!(
                f,
                "Error: wrong number of arguments: expected {expected}, got {got}"
            ),
            EvalError::UnsupportedArgumentType { builtin, got } => write!(
                f,
                "Error: unsupported argument type for '{builtin}': {got}"
            ),
            EvalError::DivisionByZero => write!(f, "Error: division by zero"),
        }
    }
}

impl std::error::Error for EvalError {}
