//! Lexer for the OmniProps configuration language.
//!
//! Raw scanning is done by a `logos` DFA ([`raw_token`]); literal cooking
//! (escapes, numeric ranges) happens in the token callbacks so the parser
//! only ever sees finished values.
//!
//! Lexing never fails as a whole: malformed input becomes a
//! [`TokenKind::Error`] token that the parser reports at its position.

mod cook;
mod lex_error;
mod raw_token;
mod token;

use logos::Logos;
use omni_ir::Span;

pub use lex_error::LexErrorKind;
pub use token::{Token, TokenKind};

use raw_token::RawToken;

/// Tokenize `source`. The result always ends with [`TokenKind::Eof`].
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut logos = RawToken::lexer(source);

    while let Some(result) = logos.next() {
        let span = Span::from_range(logos.span());
        let kind = match result {
            Ok(raw) => TokenKind::from(raw),
            Err(LexErrorKind::UnexpectedChar) if starts_string(logos.slice()) => {
                TokenKind::Error(LexErrorKind::UnterminatedString)
            }
            Err(err) => TokenKind::Error(err),
        };
        tokens.push(Token::new(kind, span));
    }

    let end = u32::try_from(source.len()).unwrap_or(u32::MAX);
    tokens.push(Token::new(TokenKind::Eof, Span::point(end)));
    tokens
}

fn starts_string(slice: &str) -> bool {
    slice.starts_with('"') || slice.starts_with('\'')
}
