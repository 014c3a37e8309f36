//! Named-resource lookup.
//!
//! Resources (`read_from_resource("base.oprops")`, shortcut tables) are found
//! by searching an ordered list of root directories, configured through
//! [`RESOURCE_PATH_ENV`].

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Platform path list of resource roots, e.g. `conf:/etc/myapp`.
pub const RESOURCE_PATH_ENV: &str = "OMNI_RESOURCE_PATH";

/// Ordered resource roots; earlier roots win for single lookups.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourcePath {
    roots: Vec<PathBuf>,
}

static GLOBAL_RESOURCE_PATH: OnceLock<ResourcePath> = OnceLock::new();

impl ResourcePath {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        ResourcePath { roots }
    }

    /// Roots from [`RESOURCE_PATH_ENV`], or `.` and `./resources` when unset.
    pub fn from_env() -> Self {
        match std::env::var_os(RESOURCE_PATH_ENV) {
            Some(paths) => ResourcePath::new(std::env::split_paths(&paths).collect()),
            None => ResourcePath::new(vec![PathBuf::from("."), PathBuf::from("resources")]),
        }
    }

    /// Process-wide resource path, read from the environment on first use.
    pub fn global() -> &'static ResourcePath {
        GLOBAL_RESOURCE_PATH.get_or_init(ResourcePath::from_env)
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// First root containing `name`.
    pub fn find(&self, name: &str) -> Option<PathBuf> {
        self.find_all(name).into_iter().next()
    }

    /// Every root containing `name`, in root order.
    pub fn find_all(&self, name: &str) -> Vec<PathBuf> {
        self.roots
            .iter()
            .map(|root| root.join(name))
            .filter(|candidate| Path::is_file(candidate))
            .collect()
    }
}
