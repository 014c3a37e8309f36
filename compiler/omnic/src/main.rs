//! The `omni` command.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use omnic::commands::{check_file, dump_file, main_with_args, run_file};
use omnic::report::format_error_chain;
use omnic::CliError;

#[derive(Parser)]
#[command(name = "omni", version, about = "Load, check, and run OmniProps configuration files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load a file and run the object stored under a key
    Run {
        file: PathBuf,
        /// Key holding the runnable object
        #[arg(long, default_value = omni_store::RUN_KEY)]
        key: String,
    },
    /// Load a config with BASE_DIR and KEY=VALUE pairs preset, then run `run`
    Main {
        #[arg(long)]
        config: PathBuf,
        /// KEY=VALUE pairs stored as strings before loading
        #[arg(long, num_args = 0..)]
        args: Vec<String>,
    },
    /// Load a file and report errors and constraint violations
    Check { file: PathBuf },
    /// Print the evaluated entries as sorted key=value lines
    Dump { file: PathBuf },
}

fn main() {
    omnic::init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Run { file, key } => run_file(&file, &key),
        Command::Main { config, args } => main_with_args(&config, &args),
        Command::Check { file } => check_file(&file, &mut std::io::stderr()),
        Command::Dump { file } => dump_file(&file, &mut std::io::stdout().lock()),
    };

    match result {
        Ok(()) => {}
        // Already reported in full.
        Err(CliError::Check { .. }) => std::process::exit(1),
        Err(err) => {
            eprintln!("{}", format_error_chain(&err));
            std::process::exit(1);
        }
    }
}
