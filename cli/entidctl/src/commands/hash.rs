//! Hash commands.

use anyhow::Result;
use clap::Args;
use entid::{DistributedStableHash, EntityId};
use serde::Serialize;
use tabled::Tabled;

use crate::output::print_output;

use super::parse::parse_all;
use super::{read_inputs, CommandContext};

/// Show the distributed stable hash of identifiers.
#[derive(Debug, Args)]
pub struct HashCommand {
    /// Identifiers to hash. Reads one per line from stdin when omitted.
    ids: Vec<String>,

    /// Log and skip malformed identifiers instead of failing.
    #[arg(long)]
    skip_invalid: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct HashRow {
    id: String,
    /// Hex so JSON consumers never lose precision on u64.
    hash: String,
}

impl From<&EntityId> for HashRow {
    fn from(id: &EntityId) -> Self {
        Self {
            id: id.as_string(),
            hash: format!("{:#018x}", id.distributed_stable_hash()),
        }
    }
}

impl HashCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let ids = parse_all(read_inputs(self.ids)?, self.skip_invalid)?;
        let rows: Vec<HashRow> = ids.iter().map(HashRow::from).collect();
        print_output(&rows, ctx.format);
        Ok(())
    }
}
