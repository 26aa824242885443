//! Structured-document interop for [`EntityId`].
//!
//! serde covers typed fields. These helpers cover untyped documents, where an
//! identifier may be one of several acceptable shapes and the caller falls
//! back to other interpretations when the value is not readable as an id.

use serde_json::Value;

use crate::EntityId;

impl EntityId {
    /// Reads an identifier from a document value.
    ///
    /// Only strings are readable; they go through [`EntityId::try_parse`], so
    /// an empty string reads as [`EntityId::EMPTY`]. Returns `None` for
    /// non-string values and for malformed text.
    #[must_use]
    pub fn read_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Self::try_parse(text),
            _ => None,
        }
    }

    /// Writes the canonical text form as a document string.
    #[must_use]
    pub fn write_json(&self) -> Value {
        Value::String(self.as_string())
    }
}
