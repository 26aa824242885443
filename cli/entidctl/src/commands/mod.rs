//! CLI commands.

mod config;
mod format;
mod hash;
mod parse;
mod shard;

use std::io::BufRead;
use std::num::NonZeroU32;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::CliError;
use crate::output::OutputFormat;

/// eid - Parse, build, hash and route entity identifiers.
#[derive(Debug, Parser)]
#[command(name = "eid")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (table or json). Defaults to the configured format.
    #[arg(long, global = true)]
    format: Option<String>,

    /// Number of shards for routing commands. Defaults to the configured count.
    #[arg(long, global = true, env = "EID_SHARDS")]
    shards: Option<u32>,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, global = true, env = "EID_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Parse identifiers and show their parts.
    Parse(parse::ParseCommand),

    /// Build an identifier from its parts.
    Format(format::FormatCommand),

    /// Show the distributed stable hash of identifiers.
    Hash(hash::HashCommand),

    /// Show which shard identifiers route to.
    Shard(shard::ShardCommand),

    /// Show or change saved CLI configuration.
    Config(config::ConfigCommand),

    /// Show CLI version.
    Version,
}

impl Cli {
    /// Log filter directive for the tracing subscriber.
    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    /// Run the CLI command.
    pub fn run(self) -> Result<()> {
        let config = load_config(&self.command)?;
        let format = OutputFormat::from_name(self.format.as_deref().unwrap_or(&config.format));

        let ctx = CommandContext {
            config,
            format,
            shards: self.shards,
        };

        match self.command {
            Commands::Parse(cmd) => cmd.run(ctx),
            Commands::Format(cmd) => cmd.run(ctx),
            Commands::Hash(cmd) => cmd.run(ctx),
            Commands::Shard(cmd) => cmd.run(ctx),
            Commands::Config(cmd) => cmd.run(ctx),
            Commands::Version => {
                println!("eid {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// `eid config` edits the file, so it must read it exactly; other commands only
/// take defaults from it and fall back when it is unreadable.
fn load_config(command: &Commands) -> Result<Config> {
    match command {
        Commands::Config(_) => Config::load(),
        Commands::Version => Ok(Config::default()),
        _ => Ok(Config::load_or_default()),
    }
}

/// Shared command context.
pub struct CommandContext {
    pub config: Config,
    pub format: OutputFormat,
    pub shards: Option<u32>,
}

impl CommandContext {
    /// Resolve the shard count, preferring flag/env over config.
    pub fn shard_count(&self) -> Result<NonZeroU32, CliError> {
        match self.shards {
            Some(n) => NonZeroU32::new(n).ok_or(CliError::InvalidShardCount(n)),
            None => self.config.shard_count(),
        }
    }
}

/// Identifiers given on the command line, or one per non-blank stdin line if none were.
fn read_inputs(args: Vec<String>) -> Result<Vec<String>> {
    if !args.is_empty() {
        return Ok(args);
    }

    tracing::debug!("no identifiers given, reading stdin");
    let stdin = std::io::stdin();
    collect_lines(stdin.lock())
}

fn collect_lines(reader: impl BufRead) -> Result<Vec<String>> {
    let mut inputs = Vec::new();
    for line in reader.lines() {
        let line = line.context("Failed to read identifiers from stdin")?;
        let line = line.trim_end_matches('\r');
        if !line.trim().is_empty() {
            inputs.push(line.to_string());
        }
    }
    Ok(inputs)
}
