//! Process environment and platform.

use omni_ir::{Kind, PropertyMap, Value};
use regex::Regex;

use crate::constructible::{Constructible, Factory};
use crate::error::ConstructError;

/// Builder: environment variables as a map, optionally restricted to names
/// fully matching a regex.
#[derive(Debug)]
pub struct Environment {
    filter: Option<String>,
}

impl Constructible for Environment {
    const TYPE_NAME: &'static str = "omni.sys.Environment";

    fn factories() -> Vec<Factory<Self>> {
        vec![
            Factory::new(vec![], |_| Ok(Environment { filter: None })),
            Factory::new(vec![Kind::Str], |args| {
                Ok(Environment {
                    filter: Some(args.arg()?),
                })
            }),
        ]
    }

    fn finish(self) -> Result<Value, ConstructError> {
        let filter = self
            .filter
            .as_deref()
            .map(|pattern| {
                Regex::new(&format!("^(?:{pattern})$")).map_err(|e| {
                    ConstructError::instantiation_with(
                        Self::TYPE_NAME,
                        format!("invalid filter '{pattern}'"),
                        e,
                    )
                })
            })
            .transpose()?;
        let map: PropertyMap = std::env::vars_os()
            .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
            .filter(|(name, _)| filter.as_ref().map_or(true, |re| re.is_match(name)))
            .map(|(name, value)| (name, Value::str(value)))
            .collect();
        Ok(Value::object(map))
    }
}

/// Builder: `linux`, `mac`, `windows`, or `unknown`.
#[derive(Debug)]
pub struct Os;

impl Os {
    pub fn current() -> &'static str {
        match std::env::consts::OS {
            "linux" => "linux",
            "macos" => "mac",
            "windows" => "windows",
            _ => "unknown",
        }
    }
}

impl Constructible for Os {
    const TYPE_NAME: &'static str = "omni.sys.Os";

    fn factories() -> Vec<Factory<Self>> {
        vec![Factory::new(vec![], |_| Ok(Os))]
    }

    fn finish(self) -> Result<Value, ConstructError> {
        Ok(Value::str(Os::current()))
    }
}
