//! The `Constructible` trait: what a type exposes to configuration files.

use omni_ir::{Kind, Value};

use crate::error::ConstructError;
use crate::value_conv::FromValue;

/// A type that construction expressions can create.
///
/// Implementors list their factories (constructor equivalents) with typed
/// parameter lists and the named slots that `[key = value]` clauses may
/// target. The engine checks kinds before calling into the type, so
/// implementations receive already-coerced values.
///
/// ```text
/// Bean("x")[a = "A", c = "C"]
///   factories() -> [Factory(String)]     picks the one-string factory
///   setters()   -> [a: String]           `a` goes through the setter
///   fields()    -> [c: String]           `c` is assigned directly
/// ```
pub trait Constructible: Sized + 'static {
    /// Canonical type id, e.g. `omni.io.File`.
    const TYPE_NAME: &'static str;

    fn factories() -> Vec<Factory<Self>>;

    /// Setter-style slots; tried first.
    fn setters() -> Vec<Slot> {
        Vec::new()
    }

    /// Directly assignable fields; tried after setters.
    fn fields() -> Vec<Slot> {
        Vec::new()
    }

    /// Value kind accepted by a generic `put(key, value)`; tried last.
    fn put_kind() -> Option<Kind> {
        None
    }

    /// Store `value` through `target`. Only called for targets advertised by
    /// [`setters`](Self::setters), [`fields`](Self::fields), or
    /// [`put_kind`](Self::put_kind).
    fn inject(&mut self, target: Target<'_>, _value: Value) -> Result<(), ConstructError> {
        Err(ConstructError::injection(
            Self::TYPE_NAME,
            target.key(),
            "no injectable slot",
        ))
    }

    /// Post-injection lifecycle hook.
    fn init(&mut self) -> Result<(), ConstructError> {
        Ok(())
    }

    /// Produce the final value. Builders compute their result here.
    fn finish(self) -> Result<Value, ConstructError>;
}

/// A named, typed slot.
#[derive(Clone, Debug, PartialEq)]
pub struct Slot {
    pub name: &'static str,
    pub kind: Kind,
}

impl Slot {
    pub fn new(name: &'static str, kind: Kind) -> Self {
        Slot { name, kind }
    }
}

/// Where a named argument is being injected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target<'a> {
    Setter(&'a str),
    Field(&'a str),
    Put(&'a str),
}

impl<'a> Target<'a> {
    pub fn key(&self) -> &'a str {
        match self {
            Target::Setter(key) | Target::Field(key) | Target::Put(key) => key,
        }
    }
}

/// A constructor equivalent: parameter kinds plus the function that builds.
pub struct Factory<T> {
    params: Vec<Kind>,
    pub(crate) create: fn(&mut Args) -> Result<T, ConstructError>,
}

impl<T> Factory<T> {
    pub fn new(params: Vec<Kind>, create: fn(&mut Args) -> Result<T, ConstructError>) -> Self {
        Factory { params, create }
    }

    pub fn params(&self) -> &[Kind] {
        &self.params
    }
}

/// Positional arguments handed to a factory, already coerced to its
/// parameter kinds.
pub struct Args {
    type_name: &'static str,
    values: std::vec::IntoIter<Value>,
}

impl Args {
    pub(crate) fn new(type_name: &'static str, values: Vec<Value>) -> Self {
        Args {
            type_name,
            values: values.into_iter(),
        }
    }

    /// Take the next argument as `T`.
    pub fn arg<T: FromValue>(&mut self) -> Result<T, ConstructError> {
        let value = self.values.next().ok_or_else(|| {
            ConstructError::instantiation(self.type_name, "factory read more arguments than given")
        })?;
        let kind = value.kind();
        T::from_value(value).ok_or_else(|| {
            ConstructError::instantiation(
                self.type_name,
                format!("factory cannot use an argument of kind {kind}"),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_in_order() {
        let mut args = Args::new("t", vec![Value::str("a"), Value::Int(3)]);
        assert_eq!(args.arg::<String>().ok(), Some("a".to_owned()));
        assert_eq!(args.arg::<i32>().ok(), Some(3));
        assert!(args.arg::<i32>().is_err());
    }

    #[test]
    fn test_args_wrong_kind() {
        let mut args = Args::new("t", vec![Value::Bool(true)]);
        let err = args.arg::<String>().err().map(|e| e.to_string());
        assert_eq!(
            err.as_deref(),
            Some("cannot create 't': factory cannot use an argument of kind boolean")
        );
    }

    #[test]
    fn test_target_key() {
        assert_eq!(Target::Setter("a").key(), "a");
        assert_eq!(Target::Put("b").key(), "b");
    }
}
