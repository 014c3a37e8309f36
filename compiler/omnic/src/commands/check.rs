//! `omni check`: load a file, report errors with source snippets, then
//! validate every stored object.

use std::io::Write;
use std::path::Path;

use omni_construct::ConstraintValidator;
use omni_store::{LoadError, MapProperties, Properties};

use super::{read_file, CliError};
use crate::report::{format_error_chain, render_parse_error};

/// Check `path`, writing a report for every problem to `out`.
///
/// Evaluation stops at the first error, so a file with a load error yields
/// exactly one problem. A file that loads is then validated entry by entry.
pub fn check_file(path: &Path, out: &mut dyn Write) -> Result<(), CliError> {
    let text = read_file(path)?;
    let name = path.display().to_string();
    let mut store = MapProperties::new();

    let count = match store.read_from_path(path) {
        Ok(()) => match store.validate_entries(&ConstraintValidator) {
            Ok(()) => 0,
            Err(errors) => {
                for error in errors.iter() {
                    writeln!(out, "{name}: {error}").map_err(CliError::Output)?;
                }
                errors.len()
            }
        },
        Err(LoadError::Parse { source, .. }) => {
            out.write_all(render_parse_error(&name, &text, &source).as_bytes())
                .map_err(CliError::Output)?;
            1
        }
        Err(other) => {
            writeln!(out, "{}", format_error_chain(&other)).map_err(CliError::Output)?;
            1
        }
    };

    if count == 0 {
        tracing::debug!(path = %name, entries = store.entries().len(), "check passed");
        Ok(())
    } else {
        Err(CliError::Check {
            path: path.to_owned(),
            count,
        })
    }
}
