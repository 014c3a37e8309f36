//! `omni dump`: print the evaluated entries as sorted `key=value` lines.

use std::io::Write;
use std::path::Path;

use omni_store::{MapProperties, Properties};

use super::CliError;

pub fn dump_file(path: &Path, out: &mut dyn Write) -> Result<(), CliError> {
    let mut store = MapProperties::new();
    store.read_from_path(path)?;
    for (key, value) in store.to_flat_map() {
        writeln!(out, "{key}={value}").map_err(CliError::Output)?;
    }
    Ok(())
}
