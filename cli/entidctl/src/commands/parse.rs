//! Parse commands.

use anyhow::Result;
use clap::Args;
use entid::EntityId;
use serde::Serialize;
use tabled::Tabled;

use crate::error::CliError;
use crate::output::print_output;

use super::{read_inputs, CommandContext};

/// Parse identifiers and show their parts.
#[derive(Debug, Args)]
pub struct ParseCommand {
    /// Identifiers to parse. Reads one per line from stdin when omitted.
    ids: Vec<String>,

    /// Log and skip malformed identifiers instead of failing.
    #[arg(long)]
    skip_invalid: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct IdRow {
    id: String,
    system: String,
    #[serde(rename = "type")]
    #[tabled(rename = "type")]
    entity_type: String,
    schema: String,
    address: String,
    assigned: bool,
}

impl From<&EntityId> for IdRow {
    fn from(id: &EntityId) -> Self {
        Self {
            id: id.as_string(),
            system: id.system().to_string(),
            entity_type: id.entity_type().to_string(),
            schema: id.schema().to_string(),
            address: id.address().to_string(),
            assigned: id.is_assigned(),
        }
    }
}

impl ParseCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let ids = parse_all(read_inputs(self.ids)?, self.skip_invalid)?;
        let rows: Vec<IdRow> = ids.iter().map(IdRow::from).collect();
        print_output(&rows, ctx.format);
        Ok(())
    }
}

/// Parse every input strictly, or skip malformed ones with a warning.
pub(super) fn parse_all(inputs: Vec<String>, skip_invalid: bool) -> Result<Vec<EntityId>, CliError> {
    let mut ids = Vec::with_capacity(inputs.len());
    for input in inputs {
        match EntityId::parse(&input) {
            Ok(id) => {
                tracing::debug!(input = %input, id = ?id, "parsed identifier");
                ids.push(id);
            }
            Err(e) if skip_invalid => {
                tracing::warn!(input = %input, error = %e, "skipping malformed identifier");
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(ids)
}
