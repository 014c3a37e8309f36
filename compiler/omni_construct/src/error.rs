//! Construction errors.

use std::fmt;

use omni_ir::Value;

use crate::validate::ValidationError;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure while resolving, building, injecting into, or validating an object.
#[derive(Debug, thiserror::Error)]
pub enum ConstructError {
    #[error("type '{0}' is not registered")]
    TypeNotFound(String),

    #[error("no factory of '{type_name}' accepts ({args})")]
    NoMatchingFactory { type_name: &'static str, args: String },

    #[error("{count} factories of '{type_name}' accept ({args})")]
    AmbiguousFactory {
        type_name: &'static str,
        args: String,
        count: usize,
    },

    #[error("argument '{key}' could not be injected into '{type_name}': {reason}")]
    Injection {
        type_name: &'static str,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("cannot create '{type_name}': {message}")]
    Instantiation {
        type_name: &'static str,
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl ConstructError {
    pub fn instantiation(type_name: &'static str, message: impl Into<String>) -> Self {
        ConstructError::Instantiation {
            type_name,
            message: message.into(),
            source: None,
        }
    }

    pub fn instantiation_with(
        type_name: &'static str,
        message: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        ConstructError::Instantiation {
            type_name,
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn injection(
        type_name: &'static str,
        key: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ConstructError::Injection {
            type_name,
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Comma-separated kinds of `args`, for factory mismatch messages.
pub(crate) fn describe_args(args: &[Value]) -> String {
    args.iter()
        .map(|arg| arg.kind().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Several independent failures reported together.
#[derive(Debug, Default)]
pub struct CollectedErrors {
    errors: Vec<BoxError>,
}

impl CollectedErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: impl Into<BoxError>) {
        self.errors.push(error.into());
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(dyn std::error::Error + Send + Sync + 'static)> {
        self.errors.iter().map(AsRef::as_ref)
    }

    /// `Ok(())` when nothing was collected.
    pub fn into_result(self) -> Result<(), Self> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for CollectedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let [single] = self.errors.as_slice() {
            return write!(f, "{single}");
        }
        write!(f, "{} errors occurred:", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            write!(f, "\n  {}: {error}", i + 1)?;
        }
        Ok(())
    }
}

impl std::error::Error for CollectedErrors {}

impl FromIterator<BoxError> for CollectedErrors {
    fn from_iter<I: IntoIterator<Item = BoxError>>(iter: I) -> Self {
        CollectedErrors {
            errors: iter.into_iter().collect(),
        }
    }
}
