//! A store shareable across threads.

use std::io::Read;
use std::path::Path;

use omni_ir::Value;
use parking_lot::RwLock;

use crate::error::LoadError;
use crate::properties::Properties;

/// Wraps a store in a reader/writer lock.
///
/// All methods take `&self`. Lookups share the read lock and return owned
/// values; mutations and every load hold the write lock for their whole
/// duration, so a load is never observed half applied.
pub struct LockedProperties<P> {
    inner: RwLock<P>,
}

impl<P: Properties> LockedProperties<P> {
    pub fn new(inner: P) -> Self {
        LockedProperties {
            inner: RwLock::new(inner),
        }
    }

    pub fn into_inner(self) -> P {
        self.inner.into_inner()
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.read().get(key)
    }

    pub fn put(&self, key: &str, value: Value) -> Option<Value> {
        self.inner.write().put(key, value)
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.inner.write().remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.read().contains_key(key)
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    pub fn keys(&self) -> Vec<String> {
        self.inner.read().keys()
    }

    pub fn values(&self) -> Vec<Value> {
        self.inner.read().values()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn put_all(&self, entries: Vec<(String, Value)>) {
        self.inner.write().put_all(entries);
    }

    /// Entries other than `self`, taken under one read lock.
    pub fn snapshot(&self) -> Vec<(String, Value)> {
        self.inner.read().entries()
    }

    pub fn read_from_str(&self, source: &str) -> Result<(), LoadError> {
        self.inner.write().read_from_str(source)
    }

    pub fn read_from_reader(&self, reader: &mut dyn Read) -> Result<(), LoadError> {
        self.inner.write().read_from_reader(reader)
    }

    pub fn read_from_resource(&self, name: &str) -> Result<(), LoadError> {
        self.inner.write().read_from_resource(name)
    }

    pub fn read_from_path(&self, path: &Path) -> Result<(), LoadError> {
        self.inner.write().read_from_path(path)
    }

    pub fn read_from_url(&self, url: &str) -> Result<(), LoadError> {
        self.inner.write().read_from_url(url)
    }

    /// Run `f` with shared access, e.g. for several typed reads that must agree.
    pub fn with_read<R>(&self, f: impl FnOnce(&P) -> R) -> R {
        f(&self.inner.read())
    }

    pub fn with_write<R>(&self, f: impl FnOnce(&mut P) -> R) -> R {
        f(&mut self.inner.write())
    }
}

// Exclusive access needs no locking.
impl<P: Properties> Properties for LockedProperties<P> {
    fn get(&self, key: &str) -> Option<Value> {
        self.inner.read().get(key)
    }

    fn put(&mut self, key: &str, value: Value) -> Option<Value> {
        self.inner.get_mut().put(key, value)
    }

    fn remove(&mut self, key: &str) -> Option<Value> {
        self.inner.get_mut().remove(key)
    }

    fn contains_key(&self, key: &str) -> bool {
        self.inner.read().contains_key(key)
    }

    fn clear(&mut self) {
        self.inner.get_mut().clear();
    }

    fn keys(&self) -> Vec<String> {
        self.inner.read().keys()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::map::MapProperties;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_shared_reads_and_writes() {
        let props = LockedProperties::new(MapProperties::new());
        std::thread::scope(|scope| {
            for i in 0..4 {
                let props = &props;
                scope.spawn(move || props.put(&format!("k{i}"), Value::Int(i)));
            }
        });
        assert_eq!(props.len(), 5);
        assert_eq!(props.get("k3"), Some(Value::Int(3)));
    }

    #[test]
    fn test_load_under_write_lock() {
        let props = LockedProperties::new(MapProperties::new());
        props.read_from_str("a = 1; b = a;").unwrap();
        let (a, b) = props.with_read(|p| (p.get_int("a").unwrap(), p.get_int("b").unwrap()));
        assert_eq!((a, b), (1, 1));
        assert_eq!(props.snapshot().len(), 2);
    }

    #[test]
    fn test_clear_and_remove() {
        let props = LockedProperties::new(MapProperties::new());
        props.put_all(vec![("a".to_owned(), Value::Int(1)), ("b".to_owned(), Value::Int(2))]);
        assert_eq!(props.remove("a"), Some(Value::Int(1)));
        assert!(!props.contains_key("a"));
        props.clear();
        assert_eq!(props.keys(), vec!["self"]);
        assert!(!props.is_empty());
    }

    #[test]
    fn test_exclusive_access_as_store() {
        let mut props = LockedProperties::new(MapProperties::new());
        Properties::read_from_str(&mut props, "s = 'x';").unwrap();
        props.with_write(|p| p.put("t", Value::str("y")));
        let inner = props.into_inner();
        assert_eq!(inner.get_str("s").unwrap(), "x");
        assert_eq!(inner.get_str("t").unwrap(), "y");
    }
}
