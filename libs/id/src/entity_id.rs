//! The `EntityId` value type.
//!
//! An entity id names an object living in some business system. Its text
//! form is `[type[.schema]@]system::address`:
//!
//! - `dealer::I9973OD`: default type of the `dealer` system
//! - `boat@dealer::I9973OD`: `boat` type, default addressing schema
//! - `car.vin@dealer::1A8987339HBz0909W874`: `car` type addressed by `vin`
//!
//! The text form is a persisted wire contract. Any change to the grammar
//! breaks every consumer that stores or transmits it.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use crate::hash::{shard_index, stable_str_hash, DistributedStableHash};
use crate::{Atom, IdError};

/// Separates the type prefix from the system.
pub const TYPE_DELIMITER: &str = "@";

/// Separates the type from the schema within the type prefix.
pub const SCHEMA_DELIMITER: char = '.';

/// Separates the system from the address.
pub const SYSTEM_DELIMITER: &str = "::";

/// A `(system, type, schema, address)` tuple identifying an entity.
///
/// The value is either [`EntityId::EMPTY`] (unassigned) or assigned, in which
/// case `system` is non-zero and `address` is non-blank. Equality and hashing
/// cover all four parts; addresses compare case-sensitively.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct EntityId {
    system: Atom,
    entity_type: Atom,
    schema: Atom,
    address: String,
}

impl EntityId {
    /// The unassigned identifier.
    pub const EMPTY: Self = Self {
        system: Atom::ZERO,
        entity_type: Atom::ZERO,
        schema: Atom::ZERO,
        address: String::new(),
    };

    /// Creates an assigned identifier.
    ///
    /// `entity_type` and `schema` may be [`Atom::ZERO`] to mean "default".
    /// Fails if `system` is zero or `address` is blank.
    pub fn new(
        system: Atom,
        entity_type: Atom,
        schema: Atom,
        address: impl Into<String>,
    ) -> Result<Self, IdError> {
        if system.is_zero() {
            return Err(IdError::InvalidArgument {
                param: "system",
                reason: "required system atom is zero",
            });
        }

        let address = address.into();
        if is_blank(&address) {
            return Err(IdError::InvalidArgument {
                param: "address",
                reason: "address must not be blank",
            });
        }

        Ok(Self {
            system,
            entity_type,
            schema,
            address,
        })
    }

    /// The owning business system. Non-zero for assigned values.
    #[must_use]
    pub const fn system(&self) -> Atom {
        self.system
    }

    /// The entity type, zero for the system's default type.
    #[must_use]
    pub const fn entity_type(&self) -> Atom {
        self.entity_type
    }

    /// The addressing schema, zero for the type's default schema.
    #[must_use]
    pub const fn schema(&self) -> Atom {
        self.schema
    }

    /// The business address, scoped by type/schema/system.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns true unless this is the unassigned identifier.
    #[must_use]
    pub const fn is_assigned(&self) -> bool {
        !self.system.is_zero()
    }

    /// Returns the canonical text form, empty for the unassigned identifier.
    #[must_use]
    pub fn as_string(&self) -> String {
        self.to_string()
    }

    /// Parses the canonical text form.
    ///
    /// Blank input yields [`EntityId::EMPTY`]. Any other text must follow the
    /// grammar completely; there are no partial results.
    pub fn parse(text: &str) -> Result<Self, IdError> {
        parse_canonical(text).map_err(|reason| IdError::invalid_format(text, reason))
    }

    /// Parses the canonical text form, returning `None` on malformed input.
    ///
    /// Use this for untrusted input. Blank input still parses to
    /// `Some(EntityId::EMPTY)`.
    #[must_use]
    pub fn try_parse(text: &str) -> Option<Self> {
        parse_canonical(text).ok()
    }

    /// Returns the shard this identifier routes to.
    #[must_use]
    pub fn shard(&self, shard_count: NonZeroU32) -> u32 {
        shard_index(self.distributed_stable_hash(), shard_count)
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn parse_canonical(text: &str) -> Result<EntityId, &'static str> {
    if is_blank(text) {
        return Ok(EntityId::EMPTY);
    }

    let Some(split) = text.find(SYSTEM_DELIMITER) else {
        return Err("missing `::` delimiter");
    };
    if split == 0 {
        return Err("missing system before `::`");
    }

    let head = &text[..split];
    let address = &text[split + SYSTEM_DELIMITER.len()..];
    if is_blank(address) {
        return Err("blank address");
    }

    let (entity_type, schema, system) = match head.split_once(TYPE_DELIMITER) {
        Some((prefix, system)) => {
            if system.is_empty() {
                return Err("missing system after `@`");
            }
            if prefix.is_empty() {
                return Err("empty type before `@`");
            }

            let (entity_type, schema) = prefix
                .split_once(SCHEMA_DELIMITER)
                .unwrap_or((prefix, ""));
            let entity_type = Atom::encode(entity_type).map_err(|_| "unparsable type")?;
            let schema = if schema.is_empty() {
                Atom::ZERO
            } else {
                Atom::encode(schema).map_err(|_| "unparsable schema")?
            };
            (entity_type, schema, system)
        }
        None => (Atom::ZERO, Atom::ZERO, head),
    };

    let system = Atom::encode(system).map_err(|_| "unparsable system")?;

    // non-zero system and non-blank address are guaranteed above
    Ok(EntityId {
        system,
        entity_type,
        schema,
        address: address.to_string(),
    })
}

impl DistributedStableHash for EntityId {
    fn distributed_stable_hash(&self) -> u64 {
        (self.system.distributed_stable_hash() << 32)
            ^ self.entity_type.distributed_stable_hash()
            ^ self.schema.distributed_stable_hash()
            ^ stable_str_hash(&self.address)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_assigned() {
            return Ok(());
        }
        if !self.entity_type.is_zero() {
            write!(f, "{}", self.entity_type)?;
            if !self.schema.is_zero() {
                write!(f, "{}{}", SCHEMA_DELIMITER, self.schema)?;
            }
            f.write_str(TYPE_DELIMITER)?;
        }
        write!(f, "{}{}{}", self.system, SYSTEM_DELIMITER, self.address)
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_assigned() {
            write!(f, "EntityId(`{self}`)")
        } else {
            f.write_str("EntityId(EMPTY)")
        }
    }
}

impl FromStr for EntityId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for EntityId {
    type Error = IdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<String> for EntityId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.to_string()
    }
}

impl From<&EntityId> for String {
    fn from(id: &EntityId) -> Self {
        id.to_string()
    }
}

impl serde::Serialize for EntityId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Tests
// =============================================================================
