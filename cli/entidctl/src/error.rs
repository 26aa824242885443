//! Error handling and display for the CLI.

use colored::Colorize;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Shard count must be at least 1, got {0}")]
    InvalidShardCount(u32),

    #[error("Invalid {segment} atom `{value}`: {source}")]
    InvalidAtom {
        segment: &'static str,
        value: String,
        source: entid::AtomError,
    },

    #[error(transparent)]
    Id(#[from] entid::IdError),
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);

    // Check for specific error types and provide hints
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        match cli_err {
            CliError::InvalidShardCount(_) => {
                eprintln!(
                    "\n{}",
                    "Hint: Pass --shards <N> or run `eid config set-shards <N>`.".yellow()
                );
            }
            CliError::InvalidAtom { .. } => {
                eprintln!(
                    "\n{}",
                    "Hint: Atoms are 1 to 8 characters of [A-Za-z0-9_-].".yellow()
                );
            }
            CliError::Id(id_err) if id_err.is_format_error() => {
                eprintln!(
                    "\n{}",
                    "Hint: Expected `[type[.schema]@]system::address`.".yellow()
                );
            }
            _ => {}
        }
    }
}
