//! Debug-oriented re-serialization of the AST (the `String()` method from the
//! reference implementation). Used by parser precedence tests and by
//! `Value::Function::inspect`, which embeds a function's source text.

use std::fmt;

use crate::ast::{Block, Expression, Identifier, Statement};

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let { name, value, .. } => write!(f, "let {name} = {value};"),
            Statement::Return { value, .. } => write!(f, "return {value};"),
            Statement::Expression { expression, .. } => match expression {
                Some(expr) => write!(f, "{expr}"),
                None => Ok(()),
            },
            Statement::Block(block) => write!(f, "{block}"),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(ident) => write!(f, "{ident}"),
            Expression::Integer { token, .. } => write!(f, "{}", token.literal),
            Expression::Boolean { token, .. } => write!(f, "{}", token.literal),
            Expression::String { value, .. } => write!(f, "{value}"),
            Expression::Array { elements, .. } => {
                let rendered: Vec<_> = elements.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
            Expression::Hash { pairs, .. } => {
                let rendered: Vec<_> = pairs
                    .iter()
                    .map(|(key, value)| format!("{key}: {value}"))
                    .collect();
                write!(f, "{{{}}}", rendered.join(", "))
            }
            Expression::Index { target, index, .. } => write!(f, "({target}[{index}])"),
            Expression::If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                write!(f, "if {condition} {{ {consequence} }}")?;
                if let Some(alt) = alternative {
                    write!(f, " else {{ {alt} }}")?;
                }
                Ok(())
            }
            Expression::Func { params, body, .. } => {
                let rendered: Vec<_> = params.iter().map(ToString::to_string).collect();
                write!(f, "fn({}) {{ {body} }}", rendered.join(", "))
            }
            Expression::Call {
                callee, arguments, ..
            } => {
                let rendered: Vec<_> = arguments.iter().map(ToString::to_string).collect();
                write!(f, "{callee}({})", rendered.join(", "))
            }
            Expression::Prefix {
                operator, operand, ..
            } => write!(f, "({operator}{operand})"),
            Expression::Infix {
                operator,
                left,
                right,
                ..
            } => write!(f, "({left} {operator} {right})"),
        }
    }
}
