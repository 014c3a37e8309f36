//! Value kinds and the widening rule shared by factories, injection, and getters.

use std::fmt;
use std::sync::Arc;

use crate::value::{ArrayValue, Value};

/// The static kind of a [`Value`], or a parameter/slot type that accepts values.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Int,
    Long,
    Float,
    Double,
    Bool,
    Str,
    /// A constructed object with the given canonical type name or capability tag.
    Object(Arc<str>),
    Array(Box<Kind>),
    /// Accepts every value; used for generic `put(key, value)` slots.
    Any,
}

impl Kind {
    pub fn object(tag: impl Into<Arc<str>>) -> Self {
        Kind::Object(tag.into())
    }

    pub fn array(elem: Kind) -> Self {
        Kind::Array(Box::new(elem))
    }

    /// Map a primitive type tag (`int`, `Integer`, `String`, ...) to its kind.
    ///
    /// Returns `None` for tags that name constructed types.
    pub fn from_primitive_tag(tag: &str) -> Option<Self> {
        let kind = match tag {
            "int" | "Integer" => Kind::Int,
            "long" | "Long" => Kind::Long,
            "float" | "Float" => Kind::Float,
            "double" | "Double" => Kind::Double,
            "boolean" | "Boolean" | "bool" => Kind::Bool,
            "String" | "string" => Kind::Str,
            _ => return None,
        };
        Some(kind)
    }

    /// Whether a value of kind `other` may be stored where `self` is expected.
    ///
    /// Widening is asymmetric: `long` accepts `int` and `double` accepts `float`,
    /// never the reverse.
    pub fn accepts_kind(&self, other: &Kind) -> bool {
        match (self, other) {
            (Kind::Any, _)
            | (Kind::Long, Kind::Int)
            | (Kind::Double, Kind::Float) => true,
            (Kind::Array(want), Kind::Array(have)) => want.accepts_kind(have),
            _ => self == other,
        }
    }

    /// Whether `value` may be stored where `self` is expected.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (Kind::Any, _)
            | (Kind::Int, Value::Int(_))
            | (Kind::Long, Value::Int(_) | Value::Long(_))
            | (Kind::Float, Value::Float(_))
            | (Kind::Double, Value::Float(_) | Value::Double(_))
            | (Kind::Bool, Value::Bool(_))
            | (Kind::Str, Value::Str(_)) => true,
            (Kind::Object(tag), Value::Object(obj)) => obj.is_a(tag),
            (Kind::Array(elem), Value::Array(arr)) => {
                if arr.is_empty() {
                    *arr.elem() == Kind::Any || elem.accepts_kind(arr.elem())
                } else {
                    arr.iter().all(|item| elem.accepts(item))
                }
            }
            _ => false,
        }
    }

    /// Convert `value` to this kind, applying widening; `None` if not accepted.
    pub fn coerce(&self, value: Value) -> Option<Value> {
        if !self.accepts(&value) {
            return None;
        }
        let coerced = match (self, value) {
            (Kind::Long, Value::Int(i)) => Value::Long(i64::from(i)),
            (Kind::Double, Value::Float(f)) => Value::Double(f64::from(f)),
            (Kind::Array(elem), Value::Array(arr)) if **elem != Kind::Any && arr.elem() != &**elem => {
                let items = arr
                    .iter()
                    .cloned()
                    .map(|item| elem.coerce(item))
                    .collect::<Option<Vec<_>>>()?;
                Value::Array(ArrayValue::new((**elem).clone(), items))
            }
            (_, value) => value,
        };
        Some(coerced)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Int => f.write_str("int"),
            Kind::Long => f.write_str("long"),
            Kind::Float => f.write_str("float"),
            Kind::Double => f.write_str("double"),
            Kind::Bool => f.write_str("boolean"),
            Kind::Str => f.write_str("String"),
            Kind::Object(tag) => f.write_str(tag),
            Kind::Array(elem) => write!(f, "{elem}[]"),
            Kind::Any => f.write_str("any"),
        }
    }
}

#[cfg(test)]
mod tests;
