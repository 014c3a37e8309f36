//! Stores that report every operation to an observer.
//!
//! [`ObservableProperties`] wraps any store and calls
//! [`PropertyObserver::before`] and [`PropertyObserver::after`] around each
//! operation. Loads are reported as one [`Operation::Read`] with the
//! individual `put`s of the evaluated statements nested inside it.

use std::fmt;
use std::io::Read;
use std::path::Path;

use omni_construct::Validator;
use omni_ir::Value;

use crate::error::LoadError;
use crate::loader::Loader;
use crate::properties::Properties;

/// One store operation as seen by an observer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Operation<'a> {
    Get { key: &'a str },
    Put { key: &'a str, value: &'a Value },
    Remove { key: &'a str },
    ContainsKey { key: &'a str },
    Clear,
    Keys,
    PutAll { count: usize },
    /// A `read_from_*` call; `origin` names the source.
    Read { origin: &'a str },
}

impl fmt::Display for Operation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Get { key } => write!(f, "get {key}"),
            Operation::Put { key, value } => write!(f, "put {key} = {value}"),
            Operation::Remove { key } => write!(f, "remove {key}"),
            Operation::ContainsKey { key } => write!(f, "contains {key}"),
            Operation::Clear => f.write_str("clear"),
            Operation::Keys => f.write_str("keys"),
            Operation::PutAll { count } => write!(f, "put all ({count} entries)"),
            Operation::Read { origin } => write!(f, "read {origin}"),
        }
    }
}

/// Callbacks around store operations. Both default to doing nothing.
pub trait PropertyObserver {
    fn before(&self, _operation: &Operation<'_>) {}

    fn after(&self, _operation: &Operation<'_>) {}
}

/// A store decorated with an observer.
pub struct ObservableProperties<P, O> {
    inner: P,
    observer: O,
}

impl<P: Properties, O: PropertyObserver> ObservableProperties<P, O> {
    pub fn new(inner: P, observer: O) -> Self {
        ObservableProperties { inner, observer }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_inner(self) -> P {
        self.inner
    }

    fn observed<R>(&mut self, operation: &Operation<'_>, f: impl FnOnce(&mut Self) -> R) -> R {
        self.observer.before(operation);
        let result = f(self);
        self.observer.after(operation);
        result
    }
}

impl<P: Properties, O: PropertyObserver> Properties for ObservableProperties<P, O> {
    fn get(&self, key: &str) -> Option<Value> {
        let operation = Operation::Get { key };
        self.observer.before(&operation);
        let value = self.inner.get(key);
        self.observer.after(&operation);
        value
    }

    fn put(&mut self, key: &str, value: Value) -> Option<Value> {
        self.observer.before(&Operation::Put { key, value: &value });
        let previous = self.inner.put(key, value.clone());
        self.observer.after(&Operation::Put { key, value: &value });
        previous
    }

    fn remove(&mut self, key: &str) -> Option<Value> {
        self.observed(&Operation::Remove { key }, |this| this.inner.remove(key))
    }

    fn contains_key(&self, key: &str) -> bool {
        let operation = Operation::ContainsKey { key };
        self.observer.before(&operation);
        let found = self.inner.contains_key(key);
        self.observer.after(&operation);
        found
    }

    fn clear(&mut self) {
        self.observed(&Operation::Clear, |this| this.inner.clear());
    }

    fn keys(&self) -> Vec<String> {
        self.observer.before(&Operation::Keys);
        let keys = self.inner.keys();
        self.observer.after(&Operation::Keys);
        keys
    }

    fn put_all(&mut self, entries: Vec<(String, Value)>) {
        let operation = Operation::PutAll {
            count: entries.len(),
        };
        self.observed(&operation, |this| {
            for (key, value) in entries {
                this.put(&key, value);
            }
        });
    }

    fn read_from_str(&mut self, source: &str) -> Result<(), LoadError> {
        self.observed(&Operation::Read { origin: "string" }, |this| {
            Loader::standard().read_str(this, source)
        })
    }

    fn read_from_reader(&mut self, reader: &mut dyn Read) -> Result<(), LoadError> {
        self.observed(&Operation::Read { origin: "stream" }, |this| {
            Loader::standard().read_reader(this, reader)
        })
    }

    fn read_from_resource(&mut self, name: &str) -> Result<(), LoadError> {
        self.observed(&Operation::Read { origin: name }, |this| {
            Loader::standard().read_resource(this, name)
        })
    }

    fn read_from_path(&mut self, path: &Path) -> Result<(), LoadError> {
        let origin = path.display().to_string();
        self.observed(&Operation::Read { origin: &origin }, |this| {
            Loader::standard().read_path(this, path)
        })
    }

    fn read_from_url(&mut self, url: &str) -> Result<(), LoadError> {
        self.observed(&Operation::Read { origin: url }, |this| {
            Loader::standard().read_url(this, url)
        })
    }
}

/// Logs operations with `tracing`: mutations and loads at debug, reads at trace.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingObserver;

impl PropertyObserver for LoggingObserver {
    fn before(&self, operation: &Operation<'_>) {
        if let Operation::Read { origin } = operation {
            tracing::debug!(origin, "reading properties");
        }
    }

    fn after(&self, operation: &Operation<'_>) {
        match operation {
            Operation::Get { .. } | Operation::ContainsKey { .. } | Operation::Keys => {
                tracing::trace!(%operation, "property access");
            }
            Operation::Read { origin } => tracing::debug!(origin, "read properties"),
            _ => tracing::debug!(%operation, "property update"),
        }
    }
}

/// Runs each stored value through a validator and warns about violations.
///
/// The value is stored regardless; this only reports.
pub struct ValidationObserver<'v> {
    validator: &'v dyn Validator,
}

impl<'v> ValidationObserver<'v> {
    pub fn new(validator: &'v dyn Validator) -> Self {
        ValidationObserver { validator }
    }
}

impl PropertyObserver for ValidationObserver<'_> {
    fn after(&self, operation: &Operation<'_>) {
        if let Operation::Put { key, value } = operation {
            if let Err(error) = self.validator.validate(value) {
                tracing::warn!(key, %error, "stored value violates constraints");
            }
        }
    }
}

impl<T: PropertyObserver + ?Sized> PropertyObserver for &T {
    fn before(&self, operation: &Operation<'_>) {
        (**self).before(operation);
    }

    fn after(&self, operation: &Operation<'_>) {
        (**self).after(operation);
    }
}

#[cfg(test)]
mod tests;
