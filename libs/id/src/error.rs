//! Error types for atom encoding, identifier construction, and parsing.

use thiserror::Error;

/// Maximum number of input characters echoed back in a format error.
const MAX_ECHOED_CHARS: usize = 48;

/// Errors that can occur when encoding text into an [`Atom`](crate::Atom).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AtomError {
    /// The atom text is empty.
    #[error("atom cannot be empty")]
    Empty,

    /// The atom text is longer than the packed width allows.
    #[error("atom is {len} bytes long, at most 8 are allowed")]
    TooLong { len: usize },

    /// The atom text contains a byte outside `[A-Za-z0-9_-]`.
    #[error("invalid atom character at position {position}")]
    InvalidChar { position: usize },
}

/// Errors that can occur when constructing or parsing an [`EntityId`](crate::EntityId).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    /// A constructor argument violates the identifier invariants.
    #[error("invalid argument `{param}`: {reason}")]
    InvalidArgument {
        param: &'static str,
        reason: &'static str,
    },

    /// The text does not follow `[type[.schema]@]system::address`.
    #[error("supplied value is not parsable as EntityId: `{value}` ({reason})")]
    InvalidFormat { value: String, reason: &'static str },
}

impl IdError {
    pub(crate) fn invalid_format(value: &str, reason: &'static str) -> Self {
        IdError::InvalidFormat {
            value: value.chars().take(MAX_ECHOED_CHARS).collect(),
            reason,
        }
    }

    /// Returns true if this error came from a construction guard.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, IdError::InvalidArgument { .. })
    }

    /// Returns true if this error came from the text grammar.
    pub fn is_format_error(&self) -> bool {
        matches!(self, IdError::InvalidFormat { .. })
    }
}
