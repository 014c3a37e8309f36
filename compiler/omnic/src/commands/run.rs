//! `omni run` and `omni main`.

use std::path::Path;

use super::CliError;

/// Load `path` and run the object under `key`.
pub fn run_file(path: &Path, key: &str) -> Result<(), CliError> {
    tracing::debug!(path = %path.display(), key, "run");
    omni_store::run_file(path, key)?;
    Ok(())
}

/// Load `config` with `BASE_DIR` and `KEY=VALUE` pairs preset and run `run`.
pub fn main_with_args(config: &Path, args: &[String]) -> Result<(), CliError> {
    tracing::debug!(config = %config.display(), args = args.len(), "main");
    omni_store::generic_main(config, args)?;
    Ok(())
}
