//! `logos`-generated scanner.

use logos::{Filter, FilterResult, Lexer, Logos};

use crate::cook;
use crate::lex_error::LexErrorKind;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
pub(crate) enum RawToken {
    // `#` starts a line comment, except for the retired `#include` directive
    #[regex(r"#[^\n]*", hash_line)]
    HashInclude,

    // Never emitted: the callback skips the comment or reports it unterminated
    #[token("/*", block_comment)]
    BlockComment,

    #[token("include")]
    Include,
    #[token("true")]
    True,
    #[token("false")]
    False,

    #[token("=")]
    Eq,
    #[token("~")]
    Tilde,
    #[token(";")]
    Semi,
    #[token(",")]
    Comma,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("^")]
    Caret,

    #[regex(r#""([^"\\]|\\(.|\n)|"")*""#, |lex| cook::string(lex.slice(), '"'))]
    #[regex(r#"'([^'\\]|\\(.|\n)|'')*'"#, |lex| cook::string(lex.slice(), '\''))]
    Str(String),

    #[regex(r"-?[0-9]+", |lex| cook::int(lex.slice()), priority = 3)]
    Int(i32),

    #[regex(r"-?[0-9]+[lL]", |lex| cook::long(lex.slice()), priority = 3)]
    Long(i64),

    #[regex(
        r"-?([0-9]+\.[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?|-?[0-9]+[eE][+-]?[0-9]+",
        |lex| cook::double(lex.slice()),
        priority = 3
    )]
    Double(f64),

    #[regex(
        r"-?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?[fF]",
        |lex| cook::float(lex.slice()),
        priority = 3
    )]
    Float(f32),

    // Keys are deliberately permissive: `@-.5.Hallo.@` is a valid key
    #[regex(r"[A-Za-z0-9_$@.\-]+", |lex| lex.slice().to_owned(), priority = 1)]
    Key(String),
}

fn hash_line(lex: &mut Lexer<'_, RawToken>) -> Filter<()> {
    match lex.slice().split_whitespace().next() {
        Some("#include") => Filter::Emit(()),
        _ => Filter::Skip,
    }
}

fn block_comment(lex: &mut Lexer<'_, RawToken>) -> FilterResult<(), LexErrorKind> {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            FilterResult::Skip
        }
        None => {
            lex.bump(lex.remainder().len());
            FilterResult::Error(LexErrorKind::UnterminatedComment)
        }
    }
}
