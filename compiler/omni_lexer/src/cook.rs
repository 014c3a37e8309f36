//! Literal cooking: escape processing and numeric range checks.

use crate::lex_error::LexErrorKind;

/// Unescape a quoted literal including its delimiters.
///
/// Supports `\n \r \t \b \f \0 \\ \" \'`, `\uXXXX`, and a doubled delimiter
/// standing for one literal delimiter.
pub(crate) fn string(quoted: &str, delim: char) -> Result<String, LexErrorKind> {
    let content = quoted
        .strip_prefix(delim)
        .and_then(|s| s.strip_suffix(delim))
        .unwrap_or(quoted);

    if !content.contains('\\') && !content.contains(delim) {
        return Ok(content.to_owned());
    }

    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars();
    while let Some(c) = chars.next() {
        if c == delim {
            // the scanner only admits delimiters in doubled form
            chars.next();
            result.push(delim);
            continue;
        }
        if c != '\\' {
            result.push(c);
            continue;
        }
        let escaped = match chars.next() {
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('b') => '\u{8}',
            Some('f') => '\u{c}',
            Some('0') => '\0',
            Some(c @ ('\\' | '"' | '\'')) => c,
            Some('u') => unicode_escape(&mut chars)?,
            Some(other) => return Err(LexErrorKind::InvalidEscape(other)),
            None => return Err(LexErrorKind::InvalidEscape('\\')),
        };
        result.push(escaped);
    }
    Ok(result)
}

fn unicode_escape(chars: &mut impl Iterator<Item = char>) -> Result<char, LexErrorKind> {
    let hex: String = chars.take(4).collect();
    if hex.len() != 4 {
        return Err(LexErrorKind::InvalidEscape('u'));
    }
    u32::from_str_radix(&hex, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or(LexErrorKind::InvalidEscape('u'))
}

pub(crate) fn int(slice: &str) -> Result<i32, LexErrorKind> {
    slice.parse().map_err(|_| LexErrorKind::IntOverflow)
}

pub(crate) fn long(slice: &str) -> Result<i64, LexErrorKind> {
    slice[..slice.len() - 1]
        .parse()
        .map_err(|_| LexErrorKind::LongOverflow)
}

pub(crate) fn double(slice: &str) -> Result<f64, LexErrorKind> {
    slice.parse().map_err(|_| LexErrorKind::InvalidNumber)
}

pub(crate) fn float(slice: &str) -> Result<f32, LexErrorKind> {
    slice[..slice.len() - 1]
        .parse()
        .map_err(|_| LexErrorKind::InvalidNumber)
}

#[cfg(test)]
mod tests;
