//! The tree-walking evaluator: walks a [`Program`] directly, without
//! compiling to any intermediate bytecode.
//!
//! `Value::ReturnValue` is used internally as a short-circuiting wrapper —
//! [`eval_block`] propagates it unopened so a `return` inside nested `if`s
//! escapes every enclosing block, while [`eval_program`] is the one place
//! that unwraps it back into a plain value.

use std::rc::Rc;

use crate::ast::{Block, Expression, Identifier, Program, Statement};
use crate::builtins;
use crate::environment::Env;
use crate::error::EvalError;
use crate::value::{Function, Value, FALSE, TRUE};

pub fn eval_program(program: &Program, env: &Env) -> Result<Value, EvalError> {
    let mut result = Value::Nil;

    for statement in &program.statements {
        result = eval_statement(statement, env)?;

        if let Value::ReturnValue(value) = result {
            return Ok(*value);
        }
    }

    Ok(result)
}

fn eval_block(block: &Block, env: &Env) -> Result<Value, EvalError> {
    let mut result = Value::Nil;

    for statement in &block.statements {
        result = eval_statement(statement, env)?;

        if matches!(result, Value::ReturnValue(_)) {
            return Ok(result);
        }
    }

    Ok(result)
}

fn eval_statement(statement: &Statement, env: &Env) -> Result<Value, EvalError> {
    match statement {
        Statement::Let { name, value, .. } => {
            let value = eval_expression(value, env)?;
            env.set(name.name.clone(), value);
            Ok(Value::Nil)
        }
        Statement::Return { value, .. } => {
            let value = eval_expression(value, env)?;
            Ok(Value::ReturnValue(Box::new(value)))
        }
        Statement::Expression { expression, .. } => match expression {
            Some(expression) => eval_expression(expression, env),
            None => Ok(Value::Nil),
        },
        Statement::Block(block) => eval_block(block, env),
    }
}

fn eval_expression(expression: &Expression, env: &Env) -> Result<Value, EvalError> {
    match expression {
        Expression::Identifier(identifier) => eval_identifier(identifier, env),
        Expression::Integer { value, .. } => Ok(Value::Integer(*value)),
        Expression::Boolean { value, .. } => Ok(if *value { TRUE } else { FALSE }),
        Expression::String { value, .. } => Ok(Value::String(Rc::from(value.as_str()))),
        Expression::Array { elements, .. } => {
            let values = eval_expressions(elements, env)?;
            Ok(Value::Array(Rc::new(values)))
        }
        Expression::Hash { pairs, .. } => eval_hash(pairs, env),
        Expression::Index { target, index, .. } => {
            let target = eval_expression(target, env)?;
            let index = eval_expression(index, env)?;
            eval_index(target, index)
        }
        Expression::If {
            condition,
            consequence,
            alternative,
            ..
        } => eval_if(condition, consequence, alternative.as_ref(), env),
        Expression::Func { params, body, .. } => Ok(Value::Function(Rc::new(Function {
            params: params.clone(),
            body: body.clone(),
            env: env.clone(),
        }))),
        Expression::Call {
            callee, arguments, ..
        } => {
            let callee = eval_expression(callee, env)?;
            let arguments = eval_expressions(arguments, env)?;
            apply_function(callee, arguments)
        }
        Expression::Prefix {
            operator, operand, ..
        } => {
            let operand = eval_expression(operand, env)?;
            eval_prefix(operator, operand)
        }
        Expression::Infix {
            operator,
            left,
            right,
            ..
        } => {
            let left = eval_expression(left, env)?;
            let right = eval_expression(right, env)?;
            eval_infix(operator, left, right)
        }
    }
}

fn eval_identifier(identifier: &Identifier, env: &Env) -> Result<Value, EvalError> {
    if let Some(value) = env.get(&identifier.name) {
        return Ok(value);
    }
    if let Some(builtin) = builtins::lookup(&identifier.name) {
        return Ok(builtin);
    }
    Err(EvalError::IdentifierNotFound {
        name: identifier.name.clone(),
    })
}

fn eval_expressions(expressions: &[Expression], env: &Env) -> Result<Vec<Value>, EvalError> {
    expressions.iter().map(|e| eval_expression(e, env)).collect()
}

// HashKey equality/hashing only ever look at `tag`+`bits` (see
// value::hashkey), never at the interior-mutable `original` field clippy
// is warning about here.
#[allow(clippy::mutable_key_type)]
fn eval_hash(
    pairs: &[(Expression, Expression)],
    env: &Env,
) -> Result<Value, EvalError> {
    let mut map = std::collections::HashMap::new();

    for (key_expr, value_expr) in pairs {
        let key = eval_expression(key_expr, env)?;
        let value = eval_expression(value_expr, env)?;

        let hash_key = key.hash_key().ok_or_else(|| EvalError::UnhashableType {
            got: key.kind(),
        })?;

        map.insert(hash_key, value);
    }

    Ok(Value::Hash(Rc::new(map)))
}

fn eval_index(target: Value, index: Value) -> Result<Value, EvalError> {
    match (&target, &index) {
        (Value::Array(elements), Value::Integer(i)) => {
            if *i < 0 || *i as usize >= elements.len() {
                return Err(EvalError::IndexOutOfRange {
                    index: *i,
                    len: elements.len(),
                });
            }
            Ok(elements[*i as usize].clone())
        }
        (Value::Hash(map), _) => {
            let key = index.hash_key().ok_or_else(|| EvalError::UnhashableType {
                got: index.kind(),
            })?;
            map.get(&key).cloned().ok_or(EvalError::KeyNotFound)
        }
        _ => Err(EvalError::UnexpectedObjectType {
            expected: "ARRAY or HASH",
            got: target.kind(),
        }),
    }
}

fn eval_if(
    condition: &Expression,
    consequence: &Block,
    alternative: Option<&Block>,
    env: &Env,
) -> Result<Value, EvalError> {
    let condition = eval_expression(condition, env)?;

    if condition.is_truthy() {
        eval_block(consequence, env)
    } else if let Some(alternative) = alternative {
        eval_block(alternative, env)
    } else {
        Ok(Value::Nil)
    }
}

fn apply_function(callee: Value, arguments: Vec<Value>) -> Result<Value, EvalError> {
    match callee {
        Value::Function(func) => {
            if func.params.len() != arguments.len() {
                return Err(EvalError::WrongNumberArguments {
                    expected: func.params.len(),
                    got: arguments.len(),
                });
            }

            let call_env = func.env.new_enclosed();
            for (param, argument) in func.params.iter().zip(arguments) {
                call_env.set(param.name.clone(), argument);
            }

            let result = eval_block(&func.body, &call_env)?;
            Ok(unwrap_return(result))
        }
        Value::Builtin(builtin) => (builtin.func)(&arguments),
        other => Err(EvalError::NotAFunction { got: other.kind() }),
    }
}

fn unwrap_return(value: Value) -> Value {
    match value {
        Value::ReturnValue(inner) => *inner,
        other => other,
    }
}

fn eval_prefix(operator: &str, operand: Value) -> Result<Value, EvalError> {
    match operator {
        "!" => Ok(match operand {
            Value::Boolean(false) | Value::Integer(0) => TRUE,
            _ => FALSE,
        }),
        "-" => match operand {
            Value::Integer(n) => Ok(Value::Integer(-n)),
            other => Err(EvalError::UnexpectedOperatorType {
                operator: operator.to_string(),
                operand_type: other.kind(),
            }),
        },
        _ => Err(EvalError::UnexpectedOperatorType {
            operator: operator.to_string(),
            operand_type: operand.kind(),
        }),
    }
}

fn eval_infix(operator: &str, left: Value, right: Value) -> Result<Value, EvalError> {
    match (&left, &right) {
        (Value::Integer(a), Value::Integer(b)) => eval_integer_infix(operator, *a, *b),
        (Value::String(a), Value::String(b)) if operator == "+" => {
            Ok(Value::String(Rc::from(format!("{a}{b}").as_str())))
        }
        _ if operator == "==" => Ok(if left.structurally_equal(&right) {
            TRUE
        } else {
            FALSE
        }),
        _ if operator == "!=" => Ok(if left.structurally_equal(&right) {
            FALSE
        } else {
            TRUE
        }),
        _ if left.kind() != right.kind() => Err(EvalError::UnexpectedObjectType {
            expected: "matching operand types",
            got: right.kind(),
        }),
        _ => Err(EvalError::UnexpectedOperatorType {
            operator: operator.to_string(),
            operand_type: left.kind(),
        }),
    }
}

fn eval_integer_infix(operator: &str, a: i64, b: i64) -> Result<Value, EvalError> {
    match operator {
        "+" => Ok(Value::Integer(a.wrapping_add(b))),
        "-" => Ok(Value::Integer(a.wrapping_sub(b))),
        "*" => Ok(Value::Integer(a.wrapping_mul(b))),
        "/" => {
            if b == 0 {
                Err(EvalError::DivisionByZero)
            } else {
                Ok(Value::Integer(a.wrapping_div(b)))
            }
        }
        "<" => Ok(if a < b { TRUE } else { FALSE }),
        "<=" => Ok(if a <= b { TRUE } else { FALSE }),
        ">" => Ok(if a > b { TRUE } else { FALSE }),
        ">=" => Ok(if a >= b { TRUE } else { FALSE }),
        "==" => Ok(if a == b { TRUE } else { FALSE }),
        "!=" => Ok(if a != b { TRUE } else { FALSE }),
        _ => Err(EvalError::UnexpectedOperatorType {
            operator: operator.to_string(),
            operand_type: crate::value::ValueKind::Integer,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn eval(text: &str) -> Result<Value, EvalError> {
        let (program, errors) = Parser::new().parse_program(text);
        assert!(errors.is_empty(), "{errors:?}");
        eval_program(&program, &Env::new())
    }

    #[test]
    fn evaluates_arithmetic_with_precedence() {
        assert_eq!(eval("5 + 5 - 2 + 10 * 3 / 5;"), Ok(Value::Integer(14)));
    }

    #[test]
    fn division_by_zero_is_an_evaluate_error() {
        assert_eq!(eval("1 / 0;"), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn string_concatenation() {
        assert_eq!(
            eval(r#""foo" + "bar";"#),
            Ok(Value::String(Rc::from("foobar")))
        );
    }

    #[test]
    fn array_indexing() {
        assert_eq!(eval("[1, 2, 3][1];"), Ok(Value::Integer(2)));
    }

    #[test]
    fn array_index_out_of_range_is_an_error() {
        assert_eq!(
            eval("[1, 2, 3][10];"),
            Err(EvalError::IndexOutOfRange { index: 10, len: 3 })
        );
    }

    #[test]
    fn function_call() {
        assert_eq!(
            eval("let add = fn(x, y) { x + y; }; add(2, 3);"),
            Ok(Value::Integer(5))
        );
    }

    #[test]
    fn nested_if_return_short_circuits() {
        let text = r#"
            if (10 > 1) {
                if (10 > 1) {
                    return 10;
                }
                return 1;
            }
        "#;
        assert_eq!(eval(text), Ok(Value::Integer(10)));
    }

    #[test]
    fn closures_capture_by_reference() {
        let text = "let make = fn(x) { fn(y) { x + y } }; let addTwo = make(2); addTwo(3);";
        assert_eq!(eval(text), Ok(Value::Integer(5)));
    }

    #[test]
    fn truthiness_operators() {
        assert_eq!(eval("!0;"), Ok(Value::Boolean(true)));
        assert_eq!(eval("!false;"), Ok(Value::Boolean(true)));
        assert_eq!(eval("!5;"), Ok(Value::Boolean(false)));
        assert_eq!(eval("!!5;"), Ok(Value::Boolean(true)));
    }

    /// `!` only flips `FALSE` and `Integer(0)` to `TRUE`; every other value
    /// (including an empty string, array, or hash) is `FALSE` under `!`,
    /// even though those same values are falsy under `if`.
    #[test]
    fn bang_operator_is_narrower_than_if_truthiness() {
        assert_eq!(eval(r#"!"";"#), Ok(Value::Boolean(false)));
        assert_eq!(eval("![];"), Ok(Value::Boolean(false)));
        assert_eq!(eval("!{};"), Ok(Value::Boolean(false)));
    }

    #[test]
    fn len_builtin_over_string_and_wrong_type() {
        assert_eq!(eval(r#"len("hello world");"#), Ok(Value::Integer(11)));
        assert_eq!(
            eval("len(1);"),
            Err(EvalError::UnsupportedArgumentType {
                builtin: "len",
                got: crate::value::ValueKind::Integer
            })
        );
    }

    #[test]
    fn identifier_not_found_is_an_error() {
        assert_eq!(
            eval("foobar;"),
            Err(EvalError::IdentifierNotFound {
                name: "foobar".to_string()
            })
        );
    }

    #[test]
    fn hash_literal_and_index() {
        assert_eq!(
            eval(r#"let h = {"one": 1, "two": 2}; h["one"];"#),
            Ok(Value::Integer(1))
        );
    }

    #[test]
    fn calling_a_non_function_is_an_error() {
        assert_eq!(
            eval("let x = 5; x();"),
            Err(EvalError::NotAFunction {
                got: crate::value::ValueKind::Integer
            })
        );
    }
}
