//! Location-tagged parse errors.

use omni_ir::{LineOffsetTable, Span};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A syntax or evaluation failure at a position in a configuration source.
///
/// Line and column are 1-based. Errors raised while evaluating a statement
/// (unknown variables, failed constructions) are reported as `ParseError`s
/// too, with the underlying failure kept as [`source`](std::error::Error::source).
#[derive(Debug, thiserror::Error)]
#[error("Error in line {line}, character {column}: {message}")]
pub struct ParseError {
    pub line: u32,
    pub column: u32,
    pub span: Span,
    pub message: String,
    #[source]
    cause: Option<BoxError>,
}

impl ParseError {
    /// Build an error at `span`, resolving its line and column in `source`.
    pub fn at(source: &str, span: Span, message: impl Into<String>) -> Self {
        Self::with_table(&LineOffsetTable::build(source), source, span, message)
    }

    pub fn with_table(
        lines: &LineOffsetTable,
        source: &str,
        span: Span,
        message: impl Into<String>,
    ) -> Self {
        let (line, column) = lines.offset_to_line_col(source, span.start);
        ParseError {
            line,
            column,
            span,
            message: message.into(),
            cause: None,
        }
    }

    /// Attach the failure that caused this error.
    #[must_use]
    pub fn caused_by(mut self, cause: impl Into<BoxError>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }
}
