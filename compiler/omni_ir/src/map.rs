//! String-keyed map object, produced by `HashMap(...)` and by `self`.

use std::collections::BTreeMap;
use std::fmt;

use crate::object::{eq_as, Object};
use crate::value::Value;

/// An ordered key/value map carried as a constructed object.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyMap {
    entries: BTreeMap<String, Value>,
}

impl PropertyMap {
    pub const TYPE_NAME: &'static str = "omni.collections.HashMap";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, Value)> for PropertyMap {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        PropertyMap {
            entries: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for PropertyMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}={value}")?;
        }
        f.write_str("}")
    }
}

impl Object for PropertyMap {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn capabilities(&self) -> &'static [&'static str] {
        &["Map"]
    }

    fn dyn_eq(&self, other: &dyn Object) -> bool {
        eq_as(self, other)
    }

    fn as_map(&self) -> Option<&PropertyMap> {
        Some(self)
    }
}

#[cfg(test)]
mod tests;
