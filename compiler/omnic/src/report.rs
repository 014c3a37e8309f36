//! Rendering of load errors for the terminal.

use std::error::Error;
use std::fmt::Write as _;

use ariadne::{Config, Label, Report, ReportKind, Source};
use omni_parse::ParseError;

/// Render `error` against the text it was raised in, with its causes as notes.
pub fn render_parse_error(name: &str, text: &str, error: &ParseError) -> String {
    let range = clamp(error.span.to_range(), text.len());
    let mut report = Report::build(ReportKind::Error, (name, range.clone()))
        .with_config(Config::default().with_color(false))
        .with_message(format!("line {}, character {}", error.line, error.column))
        .with_label(Label::new((name, range)).with_message(&error.message));
    for cause in causes(error.cause().map(|c| c as &(dyn Error + 'static))) {
        report = report.with_note(cause.to_string());
    }

    let mut bytes = Vec::new();
    match report.finish().write((name, Source::from(text)), &mut bytes) {
        Ok(()) => String::from_utf8_lossy(&bytes).into_owned(),
        // Fall back to the one-line form if the snippet cannot be drawn.
        Err(_) => format!("{name}: {error}\n"),
    }
}

/// `error` followed by each of its sources, one per line.
pub fn format_error_chain(error: &dyn Error) -> String {
    let mut out = format!("error: {error}");
    for cause in causes(error.source()) {
        let _ = write!(out, "\n  caused by: {cause}");
    }
    out
}

fn causes<'e>(
    first: Option<&'e (dyn Error + 'static)>,
) -> impl Iterator<Item = &'e (dyn Error + 'static)> {
    std::iter::successors(first, |&e| e.source())
}

fn clamp(range: std::ops::Range<usize>, len: usize) -> std::ops::Range<usize> {
    let start = range.start.min(len);
    start..range.end.clamp(start, len)
}
