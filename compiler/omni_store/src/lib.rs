//! Typed property stores and the OmniProps loader.
//!
//! A store maps keys to [`Value`](omni_ir::Value)s and is filled by
//! evaluating configuration sources:
//!
//! ```text
//! base   = File('/srv/data');
//! inputs = {'a', 'b'} ^ {'c'};
//! run    = ShellExecutor('ls', {'-l'})[dir = base];
//! ```
//!
//! [`MapProperties`] is the plain store. [`ScopedProperties`] overlays a
//! private scope on a shared store, [`ObservableProperties`] reports every
//! operation to an observer, and [`LockedProperties`] makes a store
//! shareable between threads. All of them implement [`Properties`], which
//! provides typed getters and the `read_from_*` loaders.

mod error;
mod loader;
mod locked;
mod map;
mod observable;
mod properties;
mod registry;
mod runner;
mod scoped;

pub use error::{LoadError, PropertyError};
pub use loader::{Loader, MAX_INCLUDE_DEPTH, OPROPS_LOCATION};
pub use locked::LockedProperties;
pub use map::{MapProperties, SelfMarker};
pub use observable::{
    LoggingObserver, ObservableProperties, Operation, PropertyObserver, ValidationObserver,
};
pub use properties::{Properties, PropertiesExt};
pub use registry::standard_registry;
pub use runner::{
    generic_main, run_file, runnable, LaunchError, ParallelRunnable, BASE_DIR_KEY, RUN_KEY,
};
pub use scoped::{ScopedProperties, SharedProperties};
