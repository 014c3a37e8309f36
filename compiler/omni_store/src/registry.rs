//! The registry behind [`Loader::standard`](crate::Loader::standard).

use std::sync::OnceLock;

use omni_construct::ClassRegistry;

use crate::runner::ParallelRunnable;

/// Builtin types plus the store-level types that need the loader themselves.
pub fn standard_registry() -> &'static ClassRegistry {
    static REGISTRY: OnceLock<ClassRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut registry = ClassRegistry::with_builtins();
        registry.register::<ParallelRunnable>();
        registry
    })
}
