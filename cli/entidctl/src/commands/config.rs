//! Config commands (saved defaults for shard count and output format).

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::error::CliError;
use crate::output::{print_json, print_success, OutputFormat};

use super::CommandContext;

/// Show or change saved CLI configuration.
#[derive(Debug, Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Debug, Subcommand)]
enum ConfigSubcommand {
    /// Show the saved configuration.
    Show,

    /// Set the default shard count.
    SetShards {
        /// Number of shards (at least 1).
        shards: u32,
    },

    /// Set the default output format.
    SetFormat {
        /// Output format (table or json).
        #[arg(value_parser = ["table", "json"])]
        format: String,
    },
}

impl ConfigCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        match self.command {
            ConfigSubcommand::Show => show(ctx),
            ConfigSubcommand::SetShards { shards } => set_shards(ctx, shards),
            ConfigSubcommand::SetFormat { format } => set_format(ctx, format),
        }
    }
}

fn show(ctx: CommandContext) -> Result<()> {
    match ctx.format {
        OutputFormat::Json => print_json(&ctx.config),
        OutputFormat::Table => {
            println!("shards: {}", ctx.config.shards);
            println!("format: {}", ctx.config.format);
        }
    }

    Ok(())
}

fn set_shards(mut ctx: CommandContext, shards: u32) -> Result<()> {
    if shards == 0 {
        return Err(CliError::InvalidShardCount(shards).into());
    }

    ctx.config.shards = shards;
    let path = ctx.config.save()?;
    tracing::info!(path = ?path, shards, "saved config");

    match ctx.format {
        OutputFormat::Json => print_json(&serde_json::json!({ "ok": true })),
        OutputFormat::Table => print_success(&format!("Default shard count set to {}", shards)),
    }

    Ok(())
}

fn set_format(mut ctx: CommandContext, format: String) -> Result<()> {
    ctx.config.format = format;
    let path = ctx.config.save()?;
    tracing::info!(path = ?path, format = %ctx.config.format, "saved config");

    match ctx.format {
        OutputFormat::Json => print_json(&serde_json::json!({ "ok": true })),
        OutputFormat::Table => print_success(&format!(
            "Default output format set to {}",
            ctx.config.format
        )),
    }

    Ok(())
}
