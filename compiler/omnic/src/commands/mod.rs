//! CLI commands. Each writes its output to a caller-supplied writer.

mod check;
mod dump;
mod run;

use std::path::PathBuf;

use omni_store::{LaunchError, LoadError};

pub use check::check_file;
pub use dump::dump_file;
pub use run::{main_with_args, run_file};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("cannot read '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Launch(#[from] LaunchError),

    /// Problems were found and already written out.
    #[error("{count} problem(s) found in '{}'", path.display())]
    Check { path: PathBuf, count: usize },

    #[error("cannot write output")]
    Output(#[source] std::io::Error),
}

fn read_file(path: &std::path::Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests;
