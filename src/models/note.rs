//! Note entity and request body types.

use serde::{Deserialize, Serialize};

/// A persisted note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Store-assigned identifier, immutable after creation.
    pub id: i64,
    /// Title, 1 to 255 characters for any persisted note.
    pub title: String,
    /// Free-text body, may be empty.
    pub text: String,
    /// ISO 8601 timestamp, syntactically valid at the time of write.
    ///
    /// Kept as text; only semantic (not byte) round-trip is guaranteed.
    pub datetime: String,
}

/// Typed request body for create and update.
///
/// All fields default to the empty string so that an absent field surfaces
/// as a field violation from validation rather than a decode failure. A
/// field of the wrong JSON type is rejected at the body level by serde.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteInput {
    /// Title of the note.
    #[serde(default)]
    pub title: String,
    /// Text of the note.
    #[serde(default)]
    pub text: String,
    /// Datetime of the note.
    #[serde(default)]
    pub datetime: String,
}

/// A single field-level validation violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// The payload field that failed.
    pub field: String,
    /// Human-readable rule description.
    pub message: String,
}

impl FieldViolation {
    /// Creates a new field violation.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
