//! The typed value model.

use std::fmt;
use std::sync::Arc;

use crate::kind::Kind;
use crate::object::{Object, ObjectRef};

/// A configuration value.
///
/// Cheap to clone: strings, objects, and array contents are reference counted.
#[derive(Clone, Debug)]
pub enum Value {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    Str(Arc<str>),
    Object(ObjectRef),
    Array(ArrayValue),
}

impl Value {
    pub fn str(s: impl Into<Arc<str>>) -> Self {
        Value::Str(s.into())
    }

    pub fn object<T: Object>(object: T) -> Self {
        Value::Object(ObjectRef::new(object))
    }

    pub fn array(elem: Kind, items: Vec<Value>) -> Self {
        Value::Array(ArrayValue::new(elem, items))
    }

    /// Build a `String[]` value.
    pub fn string_array<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        let items = items.into_iter().map(|s| Value::Str(s.into())).collect();
        Value::array(Kind::Str, items)
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Int(_) => Kind::Int,
            Value::Long(_) => Kind::Long,
            Value::Float(_) => Kind::Float,
            Value::Double(_) => Kind::Double,
            Value::Bool(_) => Kind::Bool,
            Value::Str(_) => Kind::Str,
            Value::Object(obj) => Kind::object(obj.type_name()),
            Value::Array(arr) => Kind::array(arr.elem().clone()),
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The value as `i64`, widening ints.
    pub fn as_long(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(i64::from(*i)),
            Value::Long(l) => Some(*l),
            _ => None,
        }
    }

    /// The value as `f64`, widening floats.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(f64::from(*f)),
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayValue> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            _ => false,
        }
    }
}

/// Render a float the way configuration authors wrote it: `1.0`, not `1`.
/// Magnitudes outside `[1e-3, 1e7)` use `1.0E20` notation.
fn fmt_float<T>(f: &mut fmt::Formatter<'_>, v: T, wide: f64) -> fmt::Result
where
    T: fmt::Display + fmt::LowerExp,
{
    if wide.is_nan() {
        return f.write_str("NaN");
    }
    if wide.is_infinite() {
        return f.write_str(if wide < 0.0 { "-Infinity" } else { "Infinity" });
    }
    let magnitude = wide.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        let text = v.to_string();
        if text.contains('.') {
            f.write_str(&text)
        } else {
            write!(f, "{text}.0")
        }
    } else {
        let text = format!("{v:e}");
        let (mantissa, exponent) = text.split_once('e').unwrap_or((text.as_str(), "0"));
        if mantissa.contains('.') {
            write!(f, "{mantissa}E{exponent}")
        } else {
            write!(f, "{mantissa}.0E{exponent}")
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Long(l) => write!(f, "{l}"),
            Value::Float(v) => fmt_float(f, v, f64::from(*v)),
            Value::Double(v) => fmt_float(f, v, *v),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => f.write_str(s),
            Value::Object(obj) => write!(f, "{obj}"),
            Value::Array(arr) => write!(f, "{arr}"),
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v.into())
    }
}

impl From<ObjectRef> for Value {
    fn from(v: ObjectRef) -> Self {
        Value::Object(v)
    }
}

impl From<ArrayValue> for Value {
    fn from(v: ArrayValue) -> Self {
        Value::Array(v)
    }
}

/// A homogeneous array with a fixed element kind.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayValue {
    elem: Kind,
    items: Arc<[Value]>,
}

impl ArrayValue {
    pub fn new(elem: Kind, items: Vec<Value>) -> Self {
        ArrayValue {
            elem,
            items: items.into(),
        }
    }

    pub fn elem(&self) -> &Kind {
        &self.elem
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// String items; `None` unless this is a `String[]`.
    pub fn strings(&self) -> Option<Vec<&str>> {
        if self.elem != Kind::Str {
            return None;
        }
        self.items.iter().map(Value::as_str).collect()
    }

    /// Append `other`; element kinds must match exactly, except that an
    /// empty untyped array takes the kind of the other operand.
    pub fn concat(&self, other: &ArrayValue) -> Option<ArrayValue> {
        let elem = if self.elem == other.elem || other.is_untyped_empty() {
            &self.elem
        } else if self.is_untyped_empty() {
            &other.elem
        } else {
            return None;
        };
        let items = self.items.iter().chain(other.items.iter()).cloned().collect();
        Some(ArrayValue::new(elem.clone(), items))
    }

    fn is_untyped_empty(&self) -> bool {
        self.elem == Kind::Any && self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a ArrayValue {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for ArrayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests;
