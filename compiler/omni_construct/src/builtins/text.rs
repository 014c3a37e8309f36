//! String array builders.

use omni_ir::{Kind, Value};
use regex::Regex;

use super::collections::ValueList;
use crate::constructible::{Constructible, Factory};
use crate::error::ConstructError;
use crate::validate::{Constraints, ValidationError};

/// Builder: split a string on a regex, trimming items by default.
///
/// Splitting follows the familiar `String.split` contract: a string without
/// any match yields itself, a zero-width match at the start does not produce
/// an empty first item, and trailing empty items are dropped.
#[derive(Debug)]
pub struct StringSplitter {
    input: String,
    delimiter: String,
    trim: bool,
}

impl StringSplitter {
    fn new(input: String, delimiter: Option<String>, trim: Option<bool>) -> Self {
        StringSplitter {
            input,
            delimiter: delimiter.unwrap_or_else(|| ",".to_owned()),
            trim: trim.unwrap_or(true),
        }
    }
}

impl Constructible for StringSplitter {
    const TYPE_NAME: &'static str = "omni.text.StringSplitter";

    fn factories() -> Vec<Factory<Self>> {
        vec![
            Factory::new(vec![Kind::Str], |args| {
                Ok(StringSplitter::new(args.arg()?, None, None))
            }),
            Factory::new(vec![Kind::Str, Kind::Bool], |args| {
                Ok(StringSplitter::new(args.arg()?, None, Some(args.arg()?)))
            }),
            Factory::new(vec![Kind::Str, Kind::Str], |args| {
                Ok(StringSplitter::new(args.arg()?, Some(args.arg()?), None))
            }),
            Factory::new(vec![Kind::Str, Kind::Str, Kind::Bool], |args| {
                Ok(StringSplitter::new(args.arg()?, Some(args.arg()?), Some(args.arg()?)))
            }),
        ]
    }

    fn finish(self) -> Result<Value, ConstructError> {
        let regex = Regex::new(&self.delimiter).map_err(|e| {
            ConstructError::instantiation_with(
                Self::TYPE_NAME,
                format!("invalid delimiter pattern '{}'", self.delimiter),
                e,
            )
        })?;
        let parts = split(&regex, &self.input);
        let items = parts
            .into_iter()
            .map(|part| if self.trim { part.trim() } else { part });
        Ok(Value::string_array(items))
    }
}

fn split<'a>(regex: &Regex, input: &'a str) -> Vec<&'a str> {
    let Some(first) = regex.find(input) else {
        return vec![input];
    };
    let mut parts: Vec<&str> = regex.split(input).collect();
    if first.start() == 0 && first.is_empty() && parts.first() == Some(&"") {
        parts.remove(0);
    }
    while parts.last() == Some(&"") {
        parts.pop();
    }
    parts
}

/// Builder: join strings with a delimiter, optionally quoting each item.
///
/// Occurrences of `quote` inside an item are prefixed with `escape`.
#[derive(Debug)]
pub struct JoinStrings {
    strings: Vec<String>,
    delimiter: String,
    quote: String,
    escape: String,
}

fn list_strings(list: &ValueList) -> Option<Vec<String>> {
    list.items()
        .iter()
        .map(|item| item.as_str().map(str::to_owned))
        .collect()
}

impl Constructible for JoinStrings {
    const TYPE_NAME: &'static str = "omni.text.JoinStrings";

    fn factories() -> Vec<Factory<Self>> {
        let strings = Kind::array(Kind::Str);
        let list = Kind::object(ValueList::TYPE_NAME);
        vec![
            Factory::new(vec![strings.clone(), Kind::Str], |args| {
                Ok(JoinStrings {
                    strings: args.arg()?,
                    delimiter: args.arg()?,
                    quote: String::new(),
                    escape: String::new(),
                })
            }),
            Factory::new(vec![strings, Kind::Str, Kind::Str, Kind::Str], |args| {
                Ok(JoinStrings {
                    strings: args.arg()?,
                    delimiter: args.arg()?,
                    quote: args.arg()?,
                    escape: args.arg()?,
                })
            }),
            Factory::new(vec![list, Kind::Str], |args| {
                let list: omni_ir::ObjectRef = args.arg()?;
                let strings = list
                    .downcast_ref::<ValueList>()
                    .and_then(list_strings)
                    .ok_or_else(|| {
                        ConstructError::instantiation(Self::TYPE_NAME, "list items must be strings")
                    })?;
                Ok(JoinStrings {
                    strings,
                    delimiter: args.arg()?,
                    quote: String::new(),
                    escape: String::new(),
                })
            }),
        ]
    }

    fn finish(self) -> Result<Value, ConstructError> {
        let violations = Constraints::new()
            .not_empty("strings", self.strings.is_empty())
            .not_empty("delimiter", self.delimiter.is_empty())
            .finish();
        if !violations.is_empty() {
            return Err(ValidationError {
                subject: Self::TYPE_NAME.to_owned(),
                violations,
            }
            .into());
        }
        let quoted: Vec<String> = self
            .strings
            .iter()
            .map(|s| {
                let escaped = if self.quote.is_empty() {
                    s.clone()
                } else {
                    s.replace(&self.quote, &format!("{}{}", self.escape, self.quote))
                };
                format!("{q}{escaped}{q}", q = self.quote)
            })
            .collect();
        Ok(Value::str(quoted.join(&self.delimiter)))
    }
}

/// Builder: `prefix + item + postfix` for each item.
#[derive(Debug)]
pub struct ModifyStringArray {
    strings: Vec<String>,
    prefix: String,
    postfix: String,
}

impl Constructible for ModifyStringArray {
    const TYPE_NAME: &'static str = "omni.text.ModifyStringArray";

    fn factories() -> Vec<Factory<Self>> {
        vec![Factory::new(
            vec![Kind::array(Kind::Str), Kind::Str, Kind::Str],
            |args| {
                Ok(ModifyStringArray {
                    strings: args.arg()?,
                    prefix: args.arg()?,
                    postfix: args.arg()?,
                })
            },
        )]
    }

    fn finish(self) -> Result<Value, ConstructError> {
        Ok(Value::string_array(
            self.strings
                .iter()
                .map(|s| format!("{}{s}{}", self.prefix, self.postfix)),
        ))
    }
}
