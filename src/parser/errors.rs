use std::fmt;

use crate::token::TokenKind;

/// Flat taxonomy of parse-time failures. The parser never aborts on one of
/// these; it records it and resynchronizes at the next statement boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    UnexpectedTokenType {
        expected: TokenKind,
        got: TokenKind,
        literal: String,
    },
    PrefixParseFnNotFound {
        kind: TokenKind,
        literal: String,
    },
    InfixParseFnNotFound {
        kind: TokenKind,
        literal: String,
    },
    InvalidIntegerLiteral {
        literal: String,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedTokenType {
                expected,
                got,
                literal,
            } => write!(
                f,
                "expected next token to be {expected:?}, got {got:?} ('{literal}') instead"
            ),
            ParseError::PrefixParseFnNotFound { kind, literal } => write!(
                f,
                "no prefix parse function for {kind:?} ('{literal}') found"
            ),
            ParseError::InfixParseFnNotFound { kind, literal } => write!(
                f,
                "no infix parse function for {kind:?} ('{literal}') found"
            ),
            ParseError::InvalidIntegerLiteral { literal } => {
                write!(f, "could not parse '{literal}' as integer")
            }
        }
    }
}

impl std::error::Error for ParseError {}
