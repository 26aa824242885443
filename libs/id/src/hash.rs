//! Distributed stable hashing.
//!
//! `std::hash::Hash` is fine for in-process maps but its output depends on
//! the hasher and its seed. Partitioning and routing across nodes need a value
//! that is identical in every process, on every platform, in every run. That
//! value comes from [`DistributedStableHash`].

use std::num::NonZeroU32;

use xxhash_rust::xxh3::xxh3_64;

use crate::Atom;

/// Types with a hash that is stable across process and machine boundaries.
pub trait DistributedStableHash {
    /// Returns the stable hash. Must not depend on memory addresses,
    /// per-process seeds, or insertion order.
    fn distributed_stable_hash(&self) -> u64;
}

/// Stable hash of a string: XXH3-64 of its UTF-8 bytes, `0` for the empty string.
#[must_use]
pub fn stable_str_hash(s: &str) -> u64 {
    if s.is_empty() {
        return 0;
    }
    xxh3_64(s.as_bytes())
}

/// Maps a stable hash onto one of `shard_count` shards.
#[must_use]
pub fn shard_index(hash: u64, shard_count: NonZeroU32) -> u32 {
    // the remainder is < shard_count, so it always fits in u32
    (hash % u64::from(shard_count.get())) as u32
}

impl DistributedStableHash for Atom {
    fn distributed_stable_hash(&self) -> u64 {
        self.id()
    }
}

impl DistributedStableHash for str {
    fn distributed_stable_hash(&self) -> u64 {
        stable_str_hash(self)
    }
}

impl DistributedStableHash for String {
    fn distributed_stable_hash(&self) -> u64 {
        stable_str_hash(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string_hashes_to_zero() {
        assert_eq!(stable_str_hash(""), 0);
    }

    #[test]
    fn test_str_hash_is_xxh3() {
        let s = "1A8987339HBz0909W874";
        assert_eq!(stable_str_hash(s), xxh3_64(s.as_bytes()));
        assert_eq!(s.distributed_stable_hash(), s.to_string().distributed_stable_hash());
    }

    #[test]
    fn test_str_hash_is_case_sensitive() {
        assert_ne!(stable_str_hash("I9973OD"), stable_str_hash("i9973od"));
    }

    #[test]
    fn test_atom_hash_is_raw_value() {
        let atom = Atom::encode("dealer").unwrap();
        assert_eq!(atom.distributed_stable_hash(), atom.id());
        assert_eq!(Atom::ZERO.distributed_stable_hash(), 0);
    }

    #[test]
    fn test_shard_index_in_range() {
        let shards = NonZeroU32::new(7).unwrap();
        for hash in [0u64, 1, 6, 7, 1_000_003, u64::MAX] {
            assert!(shard_index(hash, shards) < 7);
        }
        assert_eq!(shard_index(15, shards), 1);
        assert_eq!(shard_index(u64::MAX, NonZeroU32::new(1).unwrap()), 0);
    }
}
