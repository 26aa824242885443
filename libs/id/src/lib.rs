//! # entid
//!
//! Canonical, parseable identifiers for entities living in business systems.
//!
//! ## Design Principles
//!
//! - An [`EntityId`] is an immutable `(system, type, schema, address)` tuple
//! - The text form round-trips losslessly: parse → format → parse
//! - Malformed text never degrades into the unassigned id; blank text does
//! - Routing uses a distributed stable hash, never `std::hash::Hash`
//!
//! ## ID Format
//!
//! `[type[.schema]@]system::address`
//!
//! Examples:
//! - `dealer::I9973OD`
//! - `boat@dealer::I9973OD`
//! - `car.vin@dealer::1A8987339HBz0909W874`
//!
//! `system`, `type` and `schema` are [`Atom`]s: up to 8 characters of
//! `[A-Za-z0-9_-]` packed into a `u64`. The address is opaque and
//! case-sensitive.

mod atom;
mod entity_id;
mod error;
mod hash;
mod json;

pub use atom::Atom;
pub use entity_id::{EntityId, SCHEMA_DELIMITER, SYSTEM_DELIMITER, TYPE_DELIMITER};
pub use error::{AtomError, IdError};
pub use hash::{shard_index, stable_str_hash, DistributedStableHash};
