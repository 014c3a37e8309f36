//! Command line front end for OmniProps.
//!
//! The `omni` binary is a thin `clap` layer over [`commands`]; everything it
//! does is callable from here so it can be tested without a process.

pub mod commands;
pub mod report;

use std::sync::Once;

pub use commands::CliError;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
