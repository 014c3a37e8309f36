//! Opaque handles to constructed objects.
//!
//! Constructed values (files, timezones, maps, runnables) are stored behind
//! [`ObjectRef`], an `Arc<dyn Object>`. The [`Object`] trait exposes the few
//! capabilities the store and loader need without knowing the concrete type.

use std::any::Any;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::map::PropertyMap;

/// Upcast to `&dyn Any` for downcasting through a trait object.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A constructed configuration object.
pub trait Object: AsAny + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Canonical type id, e.g. `omni.io.File`.
    fn type_name(&self) -> &'static str;

    /// Additional tags this object answers to (`Map`, `Runnable`, `Source`).
    fn capabilities(&self) -> &'static [&'static str] {
        &[]
    }

    /// Whether the object is of type `tag` or declares it as a capability.
    fn is_a(&self, tag: &str) -> bool {
        self.type_name() == tag || self.capabilities().iter().any(|cap| *cap == tag)
    }

    /// Structural equality where the type defines it; identity otherwise.
    fn dyn_eq(&self, other: &dyn Object) -> bool {
        std::ptr::addr_eq(
            self.as_any() as *const dyn Any,
            other.as_any() as *const dyn Any,
        )
    }

    fn as_runnable(&self) -> Option<&dyn Runnable> {
        None
    }

    /// A readable source for `include`.
    fn as_source(&self) -> Option<Source> {
        None
    }

    fn as_map(&self) -> Option<&PropertyMap> {
        None
    }

    /// Constraint violations; empty when the object is valid.
    fn violations(&self) -> Vec<String> {
        Vec::new()
    }
}

/// `dyn_eq` helper for objects with a `PartialEq` impl.
pub fn eq_as<T: PartialEq + 'static>(this: &T, other: &dyn Object) -> bool {
    other.as_any().downcast_ref::<T>() == Some(this)
}

/// Shared handle to a constructed object.
#[derive(Clone)]
pub struct ObjectRef(Arc<dyn Object>);

impl ObjectRef {
    pub fn new<T: Object>(object: T) -> Self {
        ObjectRef(Arc::new(object))
    }

    pub fn get(&self) -> &dyn Object {
        &*self.0
    }

    pub fn downcast_ref<T: Object>(&self) -> Option<&T> {
        (*self.0).as_any().downcast_ref::<T>()
    }

    pub fn type_name(&self) -> &'static str {
        self.0.type_name()
    }

    pub fn is_a(&self, tag: &str) -> bool {
        self.0.is_a(tag)
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.dyn_eq(other.get())
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

/// Something stored under a key that can be executed, e.g. the `run` entry.
pub trait Runnable {
    fn run(&self) -> Result<(), RunError>;
}

/// Failure of a [`Runnable`].
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct RunError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl RunError {
    pub fn new(message: impl Into<String>) -> Self {
        RunError {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        RunError {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

/// A location configuration text can be read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Url(String),
    Resource(String),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::File(path) => write!(f, "file '{}'", path.display()),
            Source::Url(url) => write!(f, "url '{url}'"),
            Source::Resource(name) => write!(f, "resource '{name}'"),
        }
    }
}

#[cfg(test)]
mod tests;
