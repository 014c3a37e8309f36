//! Lexer error kinds.

/// What went wrong while scanning a token.
///
/// Doubles as the `logos` error type, hence `Default`.
#[derive(Clone, Debug, Default, PartialEq, Eq, thiserror::Error)]
pub enum LexErrorKind {
    #[default]
    #[error("unexpected character")]
    UnexpectedChar,
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated block comment")]
    UnterminatedComment,
    #[error("invalid escape sequence '\\{0}'")]
    InvalidEscape(char),
    #[error("integer literal does not fit into int; add an 'L' suffix for long values")]
    IntOverflow,
    #[error("long literal out of range")]
    LongOverflow,
    #[error("malformed number literal")]
    InvalidNumber,
}
