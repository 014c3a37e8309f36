//! Extraction of Rust values from [`Value`]s for factories and slots.

use std::path::PathBuf;
use std::sync::Arc;

use omni_ir::{ArrayValue, ObjectRef, PropertyMap, Value};

use crate::error::ConstructError;

/// Conversion out of a [`Value`]; `None` when the value has another kind.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Option<Self>;
}

impl FromValue for Value {
    fn from_value(value: Value) -> Option<Self> {
        Some(value)
    }
}

impl FromValue for i32 {
    fn from_value(value: Value) -> Option<Self> {
        value.as_int()
    }
}

impl FromValue for i64 {
    fn from_value(value: Value) -> Option<Self> {
        value.as_long()
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> Option<Self> {
        value.as_double()
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl FromValue for Arc<str> {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl FromValue for PathBuf {
    fn from_value(value: Value) -> Option<Self> {
        value.as_str().map(PathBuf::from)
    }
}

impl FromValue for ObjectRef {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }
}

impl FromValue for ArrayValue {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }
}

/// Items of a `String[]`.
impl FromValue for Vec<String> {
    fn from_value(value: Value) -> Option<Self> {
        let arr = value.as_array()?;
        arr.strings()
            .map(|items| items.into_iter().map(str::to_owned).collect())
    }
}

/// Any object with the `Map` capability, copied.
impl FromValue for PropertyMap {
    fn from_value(value: Value) -> Option<Self> {
        value.as_object()?.get().as_map().cloned()
    }
}

/// Convert an injected slot value, reporting a mismatch as an injection error.
pub fn slot_value<T: FromValue>(
    type_name: &'static str,
    key: &str,
    value: Value,
) -> Result<T, ConstructError> {
    let kind = value.kind();
    T::from_value(value).ok_or_else(|| {
        ConstructError::injection(type_name, key, format!("unexpected value of kind {kind}"))
    })
}
