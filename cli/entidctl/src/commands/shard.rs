//! Shard commands (route identifiers onto a fixed shard count).

use std::num::NonZeroU32;

use anyhow::Result;
use clap::Args;
use entid::EntityId;
use serde::Serialize;
use tabled::Tabled;

use crate::output::print_output;

use super::parse::parse_all;
use super::{read_inputs, CommandContext};

/// Show which shard identifiers route to.
#[derive(Debug, Args)]
pub struct ShardCommand {
    /// Identifiers to route. Reads one per line from stdin when omitted.
    ids: Vec<String>,

    /// Log and skip malformed identifiers instead of failing.
    #[arg(long)]
    skip_invalid: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct ShardRow {
    id: String,
    shard: u32,
    shards: u32,
}

impl ShardRow {
    fn new(id: &EntityId, shards: NonZeroU32) -> Self {
        Self {
            id: id.as_string(),
            shard: id.shard(shards),
            shards: shards.get(),
        }
    }
}

impl ShardCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let shards = ctx.shard_count()?;
        tracing::debug!(shards = shards.get(), "routing identifiers");

        let ids = parse_all(read_inputs(self.ids)?, self.skip_invalid)?;
        let rows: Vec<ShardRow> = ids.iter().map(|id| ShardRow::new(id, shards)).collect();
        print_output(&rows, ctx.format);
        Ok(())
    }
}
