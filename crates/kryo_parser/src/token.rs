//! Lexer token types (§4.4, §6).

use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum TokenKind {
    Identifier(String),
    String(String),
    /// Decimal number; `is_percentage` is set by a trailing `%`.
    Number { value: f64, is_percentage: bool },
    /// A raw, brace-balanced expression body (the content between `{` and
    /// the matching `}`), captured verbatim rather than parsed further.
    ExpressionBody(String),

    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Semicolon,
    Colon,
    Comma,
    Dot,
    Equals,
    Arrow,

    KwConst,
    KwLet,
    KwVar,
    KwState,
    KwImport,
    KwFrom,
    KwStatic,
    KwFor,
    KwEach,
    KwIf,
    KwElse,
    KwStyle,
    KwFunc,
    KwReturn,
    KwStruct,
    KwPlatform(String),

    Eof,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: Position,
}
