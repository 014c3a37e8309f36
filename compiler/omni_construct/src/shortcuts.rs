//! Short type names.
//!
//! `NonExistingFile("x")` is resolved to `omni.io.NonExistingFile` through a
//! table in Java-properties syntax. The embedded table is always present;
//! every [`SHORTCUTS_FILE`] found on the resource path is merged over it in
//! root order, so later roots override earlier ones.

use std::sync::{Arc, OnceLock};

use rustc_hash::FxHashMap;

use crate::resource::ResourcePath;

/// Name of user-supplied shortcut tables on the resource path.
pub const SHORTCUTS_FILE: &str = "omniproperties-class-shortcuts.properties";

const BUILTIN_SHORTCUTS: &str = include_str!("class-shortcuts.properties");

static GLOBAL_SHORTCUTS: OnceLock<Arc<Shortcuts>> = OnceLock::new();

/// Short name to canonical type id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Shortcuts {
    map: FxHashMap<String, String>,
}

impl Shortcuts {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The embedded table only.
    pub fn builtin() -> Self {
        let mut shortcuts = Shortcuts::empty();
        shortcuts.merge_str(BUILTIN_SHORTCUTS);
        shortcuts
    }

    /// The embedded table plus every shortcut file on `path`.
    ///
    /// Unreadable files are skipped with a warning.
    pub fn load(path: &ResourcePath) -> Self {
        let mut shortcuts = Shortcuts::builtin();
        for file in path.find_all(SHORTCUTS_FILE) {
            match std::fs::read_to_string(&file) {
                Ok(text) => {
                    let before = shortcuts.len();
                    shortcuts.merge_str(&text);
                    tracing::debug!(
                        file = %file.display(),
                        added = shortcuts.len() - before,
                        "loaded class shortcuts"
                    );
                }
                Err(error) => {
                    tracing::warn!(file = %file.display(), %error, "skipping unreadable shortcut file");
                }
            }
        }
        shortcuts
    }

    /// Shared table loaded from [`ResourcePath::global`] on first use.
    pub fn global() -> Arc<Shortcuts> {
        GLOBAL_SHORTCUTS
            .get_or_init(|| Arc::new(Shortcuts::load(ResourcePath::global())))
            .clone()
    }

    /// Merge `name = id` lines. `#` and `!` start comments; `:` also
    /// separates.
    pub fn merge_str(&mut self, text: &str) {
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            let Some(sep) = line.find(['=', ':']) else {
                continue;
            };
            let (name, id) = (line[..sep].trim(), line[sep + 1..].trim());
            if !name.is_empty() && !id.is_empty() {
                self.map.insert(name.to_owned(), id.to_owned());
            }
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, id: impl Into<String>) {
        self.map.insert(name.into(), id.into());
    }

    /// Canonical id for `name`; unknown names are returned unchanged.
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.map.get(name).map_or(name, String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
