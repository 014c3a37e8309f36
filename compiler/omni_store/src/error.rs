//! Store and loader errors.

use omni_construct::BoxError;
use omni_ir::Kind;
use omni_parse::ParseError;

/// Failure of a typed getter.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PropertyError {
    #[error("property '{0}' not found")]
    NotFound(String),

    #[error("property '{key}' holds a {found}, not a {expected}")]
    WrongType {
        key: String,
        expected: String,
        found: Kind,
    },
}

impl PropertyError {
    pub(crate) fn wrong_type(key: &str, expected: impl ToString, found: Kind) -> Self {
        PropertyError::WrongType {
            key: key.to_owned(),
            expected: expected.to_string(),
            found,
        }
    }
}

/// Failure of a `read_from_*` call.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Syntax or evaluation error; `origin` names the source, e.g. `file 'a.oprops'`.
    #[error("Error in {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: ParseError,
    },

    #[error("cannot read {origin}")]
    Io {
        origin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("resource '{0}' not found")]
    ResourceNotFound(String),

    #[error("cannot fetch '{url}'")]
    Fetch {
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("includes nested deeper than {0} levels")]
    IncludeDepth(usize),
}
