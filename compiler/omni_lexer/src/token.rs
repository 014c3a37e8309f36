//! Cooked tokens handed to the parser.

use std::fmt;

use omni_ir::Span;

use crate::lex_error::LexErrorKind;
use crate::raw_token::RawToken;

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Str(String),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    True,
    False,
    Key(String),
    Include,
    /// Retired `#include` directive; always rejected by the parser.
    HashInclude,

    Eq,
    Tilde,
    Semi,
    Comma,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Caret,

    Error(LexErrorKind),
    Eof,
}

impl From<RawToken> for TokenKind {
    fn from(raw: RawToken) -> Self {
        match raw {
            RawToken::HashInclude => TokenKind::HashInclude,
            RawToken::Include => TokenKind::Include,
            RawToken::True => TokenKind::True,
            RawToken::False => TokenKind::False,
            RawToken::Eq => TokenKind::Eq,
            RawToken::Tilde => TokenKind::Tilde,
            RawToken::Semi => TokenKind::Semi,
            RawToken::Comma => TokenKind::Comma,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBracket => TokenKind::LBracket,
            RawToken::RBracket => TokenKind::RBracket,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::Caret => TokenKind::Caret,
            RawToken::Str(s) => TokenKind::Str(s),
            RawToken::Int(n) => TokenKind::Int(n),
            RawToken::Long(n) => TokenKind::Long(n),
            RawToken::Double(n) => TokenKind::Double(n),
            RawToken::Float(n) => TokenKind::Float(n),
            RawToken::Key(k) => TokenKind::Key(k),
            RawToken::BlockComment => TokenKind::Error(LexErrorKind::UnterminatedComment),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Str(s) => write!(f, "string \"{s}\""),
            TokenKind::Int(n) => write!(f, "'{n}'"),
            TokenKind::Long(n) => write!(f, "'{n}L'"),
            TokenKind::Float(n) => write!(f, "'{n}f'"),
            TokenKind::Double(n) => write!(f, "'{n}'"),
            TokenKind::True => f.write_str("'true'"),
            TokenKind::False => f.write_str("'false'"),
            TokenKind::Key(k) => write!(f, "'{k}'"),
            TokenKind::Include => f.write_str("'include'"),
            TokenKind::HashInclude => f.write_str("'#include'"),
            TokenKind::Eq => f.write_str("'='"),
            TokenKind::Tilde => f.write_str("'~'"),
            TokenKind::Semi => f.write_str("';'"),
            TokenKind::Comma => f.write_str("','"),
            TokenKind::LParen => f.write_str("'('"),
            TokenKind::RParen => f.write_str("')'"),
            TokenKind::LBracket => f.write_str("'['"),
            TokenKind::RBracket => f.write_str("']'"),
            TokenKind::LBrace => f.write_str("'{'"),
            TokenKind::RBrace => f.write_str("'}'"),
            TokenKind::Caret => f.write_str("'^'"),
            TokenKind::Error(err) => write!(f, "invalid token ({err})"),
            TokenKind::Eof => f.write_str("end of input"),
        }
    }
}
