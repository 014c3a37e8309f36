//! The flat, hash-backed store.

use std::fmt;

use omni_ir::{Object, Value};
use omni_parse::SELF_KEY;
use rustc_hash::FxHashMap;

use crate::properties::Properties;

/// Marker stored under `self`. Evaluating `self` in a source yields a
/// snapshot of the store instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelfMarker;

impl SelfMarker {
    pub const TYPE_NAME: &'static str = "omni.store.Self";
}

impl fmt::Display for SelfMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(SELF_KEY)
    }
}

impl Object for SelfMarker {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn dyn_eq(&self, other: &dyn Object) -> bool {
        omni_ir::eq_as(self, other)
    }
}

/// A plain store.
///
/// ```
/// use omni_store::{MapProperties, Properties};
///
/// let mut props = MapProperties::new();
/// props.read_from_str("port = 8080; host = 'localhost';")?;
/// assert_eq!(props.get_int("port")?, 8080);
/// assert_eq!(props.get_str("host")?, "localhost");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct MapProperties {
    entries: FxHashMap<String, Value>,
}

impl MapProperties {
    pub fn new() -> Self {
        let mut entries = FxHashMap::default();
        entries.insert(SELF_KEY.to_owned(), Value::object(SelfMarker));
        MapProperties { entries }
    }
}

impl Default for MapProperties {
    fn default() -> Self {
        Self::new()
    }
}

impl Properties for MapProperties {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: &str, value: Value) -> Option<Value> {
        self.entries.insert(key.to_owned(), value)
    }

    fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn clear(&mut self) {
        self.entries.retain(|key, _| key == SELF_KEY);
    }

    fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort_unstable();
        keys
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Display for MapProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.entries().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}={value}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests;
