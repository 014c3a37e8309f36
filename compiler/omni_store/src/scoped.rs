//! Inner/outer overlay store.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use omni_ir::{ArrayValue, ObjectRef, Value};

use crate::map::MapProperties;
use crate::error::PropertyError;
use crate::properties::Properties;

/// Shared handle to an outer store.
pub type SharedProperties = Rc<RefCell<dyn Properties>>;

/// A scope over a shared outer store.
///
/// Reads check the inner store first. Typed reads fall back to the outer
/// store whenever the inner one has no value of the requested kind, so a
/// `contains_*` query is true when either store satisfies it. Writes and `clear` go to the inner
/// store, shadowing the outer. `remove` takes the key from the inner store
/// when it is there, and from the outer store otherwise.
pub struct ScopedProperties {
    inner: MapProperties,
    outer: SharedProperties,
}

impl ScopedProperties {
    pub fn new(outer: SharedProperties) -> Self {
        ScopedProperties {
            inner: MapProperties::new(),
            outer,
        }
    }

    pub fn inner(&self) -> &MapProperties {
        &self.inner
    }

    pub fn outer(&self) -> &SharedProperties {
        &self.outer
    }

    fn key_set(&self) -> BTreeSet<String> {
        let mut keys: BTreeSet<String> = self.inner.keys().into_iter().collect();
        keys.extend(self.outer.borrow().keys());
        keys
    }

    /// Typed read from the inner store, then the outer one. A type mismatch
    /// in the inner store wins over a missing key in the outer.
    fn either<T>(
        &self,
        read: impl Fn(&dyn Properties) -> Result<T, PropertyError>,
    ) -> Result<T, PropertyError> {
        let inner: &dyn Properties = &self.inner;
        let inner = match read(inner) {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };
        read(&*self.outer.borrow()).map_err(|outer| match inner {
            PropertyError::NotFound(_) => outer,
            mismatch => mismatch,
        })
    }
}

impl Properties for ScopedProperties {
    fn get(&self, key: &str) -> Option<Value> {
        self.inner.get(key).or_else(|| self.outer.borrow().get(key))
    }

    fn put(&mut self, key: &str, value: Value) -> Option<Value> {
        self.inner.put(key, value)
    }

    fn remove(&mut self, key: &str) -> Option<Value> {
        if self.inner.contains_key(key) {
            self.inner.remove(key)
        } else {
            self.outer.borrow_mut().remove(key)
        }
    }

    fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key) || self.outer.borrow().contains_key(key)
    }

    fn clear(&mut self) {
        self.inner.clear();
    }

    fn keys(&self) -> Vec<String> {
        self.key_set().into_iter().collect()
    }

    fn len(&self) -> usize {
        self.key_set().len()
    }

    fn get_int(&self, key: &str) -> Result<i32, PropertyError> {
        self.either(|props| props.get_int(key))
    }

    fn get_long(&self, key: &str) -> Result<i64, PropertyError> {
        self.either(|props| props.get_long(key))
    }

    fn get_float(&self, key: &str) -> Result<f32, PropertyError> {
        self.either(|props| props.get_float(key))
    }

    fn get_double(&self, key: &str) -> Result<f64, PropertyError> {
        self.either(|props| props.get_double(key))
    }

    fn get_bool(&self, key: &str) -> Result<bool, PropertyError> {
        self.either(|props| props.get_bool(key))
    }

    fn get_str(&self, key: &str) -> Result<String, PropertyError> {
        self.either(|props| props.get_str(key))
    }

    fn get_array(&self, key: &str) -> Result<ArrayValue, PropertyError> {
        self.either(|props| props.get_array(key))
    }

    fn get_tagged(&self, key: &str, tag: &str) -> Result<ObjectRef, PropertyError> {
        self.either(|props| props.get_tagged(key, tag))
    }
}
