//! Format command (build an identifier from its parts).

use anyhow::Result;
use clap::Args;
use entid::{Atom, EntityId};
use serde::Serialize;

use crate::error::CliError;
use crate::output::{print_json, OutputFormat};

use super::CommandContext;

/// Build an identifier from its parts and print its canonical form.
#[derive(Debug, Args)]
pub struct FormatCommand {
    /// Owning business system.
    #[arg(long)]
    system: String,

    /// Entity type. Omit for the system's default type.
    #[arg(long = "type")]
    entity_type: Option<String>,

    /// Addressing schema. Only emitted together with a type.
    #[arg(long, requires = "entity_type")]
    schema: Option<String>,

    /// Business address.
    #[arg(long)]
    address: String,
}

#[derive(Debug, Serialize)]
struct FormatView {
    id: String,
}

impl FormatCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let id = self.build()?;
        tracing::debug!(id = ?id, "built identifier");
        match ctx.format {
            OutputFormat::Json => print_json(&FormatView { id: id.as_string() }),
            OutputFormat::Table => println!("{}", id),
        }
        Ok(())
    }

    fn build(&self) -> Result<EntityId, CliError> {
        let system = encode_segment("system", Some(self.system.as_str()))?;
        let entity_type = encode_segment("type", self.entity_type.as_deref())?;
        let schema = encode_segment("schema", self.schema.as_deref())?;
        Ok(EntityId::new(system, entity_type, schema, self.address.clone())?)
    }
}

/// Encode an optional segment; absent or empty means `Atom::ZERO`.
fn encode_segment(segment: &'static str, value: Option<&str>) -> Result<Atom, CliError> {
    match value {
        None | Some("") => Ok(Atom::ZERO),
        Some(text) => Atom::encode(text).map_err(|source| CliError::InvalidAtom {
            segment,
            value: text.to_string(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(system: &str, entity_type: Option<&str>, schema: Option<&str>) -> FormatCommand {
        FormatCommand {
            system: system.to_string(),
            entity_type: entity_type.map(str::to_string),
            schema: schema.map(str::to_string),
            address: "1A8987339HBz0909W874".to_string(),
        }
    }

    #[test]
    fn test_build_full_id() {
        let id = command("dealer", Some("car"), Some("vin")).build().unwrap();
        assert_eq!(id.as_string(), "car.vin@dealer::1A8987339HBz0909W874");
    }

    #[test]
    fn test_build_system_only() {
        let id = command("dealer", None, None).build().unwrap();
        assert_eq!(id.as_string(), "dealer::1A8987339HBz0909W874");
    }

    #[test]
    fn test_build_rejects_empty_system() {
        let err = command("", None, None).build().unwrap_err();
        assert!(matches!(err, CliError::Id(ref e) if e.is_invalid_argument()));
    }

    #[test]
    fn test_build_rejects_bad_atom() {
        let err = command("dealer", Some("sports car"), None).build().unwrap_err();
        assert!(matches!(err, CliError::InvalidAtom { segment: "type", .. }));
    }
}
