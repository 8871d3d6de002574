//! Token kinds, the `Token` struct and the operator precedence table.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// The closed set of token kinds the lexer can ever produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Illegal,
    Eof,

    Ident,
    Int,
    String,

    Assign,
    Plus,
    Minus,
    Bang,
    Asterisk,
    Slash,
    Lt,
    Lte,
    Gt,
    Gte,
    Eq,
    NotEq,

    Comma,
    Semicolon,
    Colon,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    Function,
    Let,
    True,
    False,
    If,
    Else,
    Return,
}

/// A single lexed token: its kind, and the exact source lexeme it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>) -> Self {
        Self {
            kind,
            literal: literal.into(),
        }
    }

    pub fn eof() -> Self {
        Self::new(TokenKind::Eof, "eof")
    }
}

static KEYWORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    HashMap::from([
        ("fn", TokenKind::Function),
        ("let", TokenKind::Let),
        ("true", TokenKind::True),
        ("false", TokenKind::False),
        ("if", TokenKind::If),
        ("else", TokenKind::Else),
        ("return", TokenKind::Return),
    ])
});

static OPERATORS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    HashMap::from([
        ("=", TokenKind::Assign),
        ("+", TokenKind::Plus),
        ("-", TokenKind::Minus),
        ("!", TokenKind::Bang),
        ("*", TokenKind::Asterisk),
        ("/", TokenKind::Slash),
        ("<", TokenKind::Lt),
        ("<=", TokenKind::Lte),
        (">", TokenKind::Gt),
        (">=", TokenKind::Gte),
        ("==", TokenKind::Eq),
        ("!=", TokenKind::NotEq),
    ])
});

static DELIMITERS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    HashMap::from([
        (",", TokenKind::Comma),
        (";", TokenKind::Semicolon),
        (":", TokenKind::Colon),
        ("(", TokenKind::LParen),
        (")", TokenKind::RParen),
        ("{", TokenKind::LBrace),
        ("}", TokenKind::RBrace),
        ("[", TokenKind::LBracket),
        ("]", TokenKind::RBracket),
    ])
});

/// Classify a literal: keyword, then operator, then delimiter, then
/// integer-shaped, falling back to a plain identifier.
pub fn lookup_token_kind(literal: &str) -> TokenKind {
    if let Some(kind) = KEYWORDS.get(literal) {
        return *kind;
    }

    if let Some(kind) = OPERATORS.get(literal) {
        return *kind;
    }

    if let Some(kind) = DELIMITERS.get(literal) {
        return *kind;
    }

    if !literal.is_empty() && literal.bytes().all(|b| b.is_ascii_digit()) {
        return TokenKind::Int;
    }

    TokenKind::Ident
}

/// Operator precedence levels, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
}

pub fn precedence_of(kind: TokenKind) -> Precedence {
    use TokenKind::*;
    match kind {
        Eq | NotEq => Precedence::Equals,
        Lt | Lte | Gt | Gte => Precedence::LessGreater,
        Plus | Minus => Precedence::Sum,
        Asterisk | Slash => Precedence::Product,
        LParen | LBracket => Precedence::Call,
        _ => Precedence::Lowest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_classify_as_themselves() {
        assert_eq!(lookup_token_kind("fn"), TokenKind::Function);
        assert_eq!(lookup_token_kind("let"), TokenKind::Let);
        assert_eq!(lookup_token_kind("true"), TokenKind::True);
        assert_eq!(lookup_token_kind("false"), TokenKind::False);
        assert_eq!(lookup_token_kind("if"), TokenKind::If);
        assert_eq!(lookup_token_kind("else"), TokenKind::Else);
        assert_eq!(lookup_token_kind("return"), TokenKind::Return);
    }

    #[test]
    fn digit_runs_classify_as_int() {
        assert_eq!(lookup_token_kind("0"), TokenKind::Int);
        assert_eq!(lookup_token_kind("1337"), TokenKind::Int);
    }

    #[test]
    fn alphabetic_non_keywords_classify_as_ident() {
        assert_eq!(lookup_token_kind("foobar"), TokenKind::Ident);
        assert_eq!(lookup_token_kind("x"), TokenKind::Ident);
    }

    #[test]
    fn precedence_table_matches_spec() {
        assert!(precedence_of(TokenKind::Eq) > Precedence::Lowest);
        assert!(precedence_of(TokenKind::Plus) < precedence_of(TokenKind::Asterisk));
        assert!(precedence_of(TokenKind::Asterisk) < precedence_of(TokenKind::LParen));
        assert_eq!(precedence_of(TokenKind::Semicolon), Precedence::Lowest);
    }
}
