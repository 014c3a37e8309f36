//! The store interface shared by every store and decorator.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use omni_construct::{BoxError, CollectedErrors, Validator};
use omni_ir::{ArrayValue, Kind, Object, ObjectRef, PropertyMap, Value};
use omni_parse::SELF_KEY;

use crate::error::{LoadError, PropertyError};
use crate::loader::Loader;

/// A mutable mapping from keys to typed values.
///
/// Implementors provide the core map operations; typed access, flattening,
/// and loading are built on top of them. Every store holds the reserved
/// `self` entry from creation on.
pub trait Properties {
    fn get(&self, key: &str) -> Option<Value>;

    /// Store `value` under `key`, returning the previous value.
    fn put(&mut self, key: &str, value: Value) -> Option<Value>;

    fn remove(&mut self, key: &str) -> Option<Value>;

    fn contains_key(&self, key: &str) -> bool;

    /// Remove every entry except `self`.
    fn clear(&mut self);

    /// All keys, sorted.
    fn keys(&self) -> Vec<String>;

    /// Values in key order.
    fn values(&self) -> Vec<Value> {
        self.keys().iter().filter_map(|key| self.get(key)).collect()
    }

    fn len(&self) -> usize {
        self.keys().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn put_all(&mut self, entries: Vec<(String, Value)>) {
        for (key, value) in entries {
            self.put(&key, value);
        }
    }

    /// Entries other than `self`, in key order.
    fn entries(&self) -> Vec<(String, Value)> {
        self.keys()
            .into_iter()
            .filter(|key| key != SELF_KEY)
            .filter_map(|key| self.get(&key).map(|value| (key, value)))
            .collect()
    }

    fn get_int(&self, key: &str) -> Result<i32, PropertyError> {
        typed(self, key, &Kind::Int, Value::as_int)
    }

    fn get_int_or(&self, key: &str, default: i32) -> Result<i32, PropertyError> {
        or_default(self.get_int(key), default)
    }

    fn contains_int(&self, key: &str) -> bool {
        self.get_int(key).is_ok()
    }

    /// Accepts stored ints.
    fn get_long(&self, key: &str) -> Result<i64, PropertyError> {
        typed(self, key, &Kind::Long, Value::as_long)
    }

    fn get_long_or(&self, key: &str, default: i64) -> Result<i64, PropertyError> {
        or_default(self.get_long(key), default)
    }

    fn contains_long(&self, key: &str) -> bool {
        self.get_long(key).is_ok()
    }

    fn get_float(&self, key: &str) -> Result<f32, PropertyError> {
        typed(self, key, &Kind::Float, |value| match value {
            Value::Float(f) => Some(*f),
            _ => None,
        })
    }

    fn get_float_or(&self, key: &str, default: f32) -> Result<f32, PropertyError> {
        or_default(self.get_float(key), default)
    }

    fn contains_float(&self, key: &str) -> bool {
        self.get_float(key).is_ok()
    }

    /// Accepts stored floats.
    fn get_double(&self, key: &str) -> Result<f64, PropertyError> {
        typed(self, key, &Kind::Double, Value::as_double)
    }

    fn get_double_or(&self, key: &str, default: f64) -> Result<f64, PropertyError> {
        or_default(self.get_double(key), default)
    }

    fn contains_double(&self, key: &str) -> bool {
        self.get_double(key).is_ok()
    }

    fn get_bool(&self, key: &str) -> Result<bool, PropertyError> {
        typed(self, key, &Kind::Bool, Value::as_bool)
    }

    fn get_bool_or(&self, key: &str, default: bool) -> Result<bool, PropertyError> {
        or_default(self.get_bool(key), default)
    }

    fn contains_bool(&self, key: &str) -> bool {
        self.get_bool(key).is_ok()
    }

    fn get_str(&self, key: &str) -> Result<String, PropertyError> {
        typed(self, key, &Kind::Str, |value| value.as_str().map(str::to_owned))
    }

    fn get_str_or(&self, key: &str, default: &str) -> Result<String, PropertyError> {
        or_default(self.get_str(key), default.to_owned())
    }

    fn contains_str(&self, key: &str) -> bool {
        self.get_str(key).is_ok()
    }

    /// An array of any element kind.
    fn get_array(&self, key: &str) -> Result<ArrayValue, PropertyError> {
        typed(self, key, &Kind::array(Kind::Any), |value| value.as_array().cloned())
    }

    fn contains_array(&self, key: &str) -> bool {
        self.get_array(key).is_ok()
    }

    /// An object whose type name or capabilities include `tag`.
    fn get_tagged(&self, key: &str, tag: &str) -> Result<ObjectRef, PropertyError> {
        let value = self
            .get(key)
            .ok_or_else(|| PropertyError::NotFound(key.to_owned()))?;
        match value.as_object() {
            Some(obj) if obj.is_a(tag) => Ok(obj.clone()),
            _ => Err(PropertyError::wrong_type(key, tag, value.kind())),
        }
    }

    fn contains_tagged(&self, key: &str, tag: &str) -> bool {
        self.get_tagged(key, tag).is_ok()
    }

    /// Entries other than `self` as a map object.
    fn to_property_map(&self) -> PropertyMap {
        self.entries().into_iter().collect()
    }

    /// Entries other than `self`, rendered as strings.
    fn to_flat_map(&self) -> BTreeMap<String, String> {
        self.entries()
            .into_iter()
            .map(|(key, value)| (key, value.to_string()))
            .collect()
    }

    /// Run `validator` over every entry, collecting all failures.
    fn validate_entries(&self, validator: &dyn Validator) -> Result<(), CollectedErrors> {
        self.entries()
            .iter()
            .filter_map(|(_, value)| validator.validate(value).err())
            .map(|error| -> BoxError { Box::new(error) })
            .collect::<CollectedErrors>()
            .into_result()
    }

    /// Evaluate `source` into this store.
    fn read_from_str(&mut self, source: &str) -> Result<(), LoadError> {
        Loader::standard().read_str(self, source)
    }

    fn read_from_reader(&mut self, reader: &mut dyn Read) -> Result<(), LoadError> {
        Loader::standard().read_reader(self, reader)
    }

    /// Read a named resource from the resource path.
    fn read_from_resource(&mut self, name: &str) -> Result<(), LoadError> {
        Loader::standard().read_resource(self, name)
    }

    /// Read a file; afterwards `OPROPS_LOCATION` holds the file.
    fn read_from_path(&mut self, path: &Path) -> Result<(), LoadError> {
        Loader::standard().read_path(self, path)
    }

    /// Read a `file:`, `http:` or `https:` URL.
    fn read_from_url(&mut self, url: &str) -> Result<(), LoadError> {
        Loader::standard().read_url(self, url)
    }
}

/// Typed object access; not object safe, so kept apart from [`Properties`].
pub trait PropertiesExt: Properties {
    /// The object under `key` if it is a `T`.
    fn get_object<T: Object + Clone>(&self, key: &str) -> Result<T, PropertyError> {
        let value = self
            .get(key)
            .ok_or_else(|| PropertyError::NotFound(key.to_owned()))?;
        value
            .as_object()
            .and_then(|obj| obj.downcast_ref::<T>())
            .cloned()
            .ok_or_else(|| PropertyError::wrong_type(key, std::any::type_name::<T>(), value.kind()))
    }

    fn contains_object<T: Object>(&self, key: &str) -> bool {
        self.get(key)
            .and_then(|value| value.as_object().map(|obj| obj.downcast_ref::<T>().is_some()))
            .unwrap_or(false)
    }
}

impl<P: Properties + ?Sized> PropertiesExt for P {}

fn typed<P, T>(
    store: &P,
    key: &str,
    kind: &Kind,
    extract: impl FnOnce(&Value) -> Option<T>,
) -> Result<T, PropertyError>
where
    P: Properties + ?Sized,
{
    let value = store
        .get(key)
        .ok_or_else(|| PropertyError::NotFound(key.to_owned()))?;
    extract(&value).ok_or_else(|| PropertyError::wrong_type(key, kind, value.kind()))
}

fn or_default<T>(result: Result<T, PropertyError>, default: T) -> Result<T, PropertyError> {
    match result {
        Err(PropertyError::NotFound(_)) => Ok(default),
        other => other,
    }
}
