//! Compact symbol codec.
//!
//! An [`Atom`] packs a short ASCII token (1 to 8 bytes of `[A-Za-z0-9_-]`)
//! into a single `u64`, one byte per character, first character in the
//! lowest byte. The packed value is comparable, hashable, and identical on
//! every machine, which makes it usable as a distributed hash contribution
//! without any further mixing.
//!
//! Every `Atom` is either `ZERO` or the exact output of the encoder, so its
//! text always encodes back to the same value.

use std::fmt;
use std::str::FromStr;

use crate::AtomError;

/// A short token packed into a `u64`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Atom(u64);

impl Atom {
    /// The empty sentinel.
    pub const ZERO: Self = Self(0);

    /// Maximum number of characters an atom can hold.
    pub const MAX_LEN: usize = 8;

    /// Encodes a literal at compile time.
    ///
    /// Panics if the literal is not a valid atom, which is a compile error
    /// when evaluated in a `const` context.
    #[must_use]
    pub const fn from_static(text: &'static str) -> Self {
        match encode_bytes(text.as_bytes()) {
            Ok(id) => Self(id),
            Err(_) => panic!("invalid atom literal"),
        }
    }

    /// Encodes text into an atom.
    pub fn encode(text: &str) -> Result<Self, AtomError> {
        encode_bytes(text.as_bytes()).map(Self)
    }

    /// Encodes text into an atom, returning `None` if the text is not a valid atom.
    #[must_use]
    pub fn try_encode(text: &str) -> Option<Self> {
        Self::encode(text).ok()
    }

    /// Takes in a raw packed value, e.g. one read back from storage.
    ///
    /// `0` yields `ZERO`. Any other value must be exactly what
    /// [`Atom::encode`] produces: valid bytes from the lowest byte up, then
    /// only zero bytes. Anything else would format to text that does not
    /// parse back to the same atom.
    pub fn try_from_id(id: u64) -> Result<Self, AtomError> {
        let bytes = id.to_le_bytes();
        let len = bytes.iter().take_while(|b| **b != 0).count();
        if let Some(position) = bytes[..len].iter().position(|b| !is_atom_byte(*b)) {
            return Err(AtomError::InvalidChar { position });
        }
        if bytes[len..].iter().any(|b| *b != 0) {
            return Err(AtomError::InvalidChar { position: len });
        }
        Ok(Self(id))
    }

    /// Returns the raw packed value.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.0
    }

    /// Returns true for the empty sentinel.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Decodes the atom back into its text. `ZERO` decodes to an empty string.
    #[must_use]
    pub fn value(&self) -> String {
        self.to_string()
    }
}

const fn is_atom_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

const fn encode_bytes(bytes: &[u8]) -> Result<u64, AtomError> {
    let len = bytes.len();
    if len == 0 {
        return Err(AtomError::Empty);
    }
    if len > Atom::MAX_LEN {
        return Err(AtomError::TooLong { len });
    }

    let mut id = 0u64;
    let mut i = 0;
    while i < len {
        let b = bytes[i];
        if !is_atom_byte(b) {
            return Err(AtomError::InvalidChar { position: i });
        }
        id |= (b as u64) << (8 * i);
        i += 1;
    }
    Ok(id)
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0.to_le_bytes().into_iter().take_while(|b| *b != 0) {
            fmt::Write::write_char(f, char::from(b))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            f.write_str("Atom(ZERO)")
        } else {
            write!(f, "Atom({self})")
        }
    }
}

impl FromStr for Atom {
    type Err = AtomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::encode(s)
    }
}

impl serde::Serialize for Atom {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Atom {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s.is_empty() {
            return Ok(Self::ZERO);
        }
        Self::encode(&s).map_err(serde::de::Error::custom)
    }
}
