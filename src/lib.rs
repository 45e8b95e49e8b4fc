//! # Notekeep
//!
//! A small HTTP CRUD service for notes backed by `SQLite`.
//!
//! Notekeep exposes a single `Note` entity (title, free-text body, ISO 8601
//! timestamp) over a plain JSON HTTP surface. All decision logic lives in the
//! record service; the HTTP router and the persistence gateway are thin glue.
//!
//! ## Architecture
//!
//! - [`services::NoteService`] — validation, CRUD orchestration, error
//!   classification (the core).
//! - [`storage::SqliteGateway`] — executes one parameterized statement per
//!   call, fresh connection each time.
//! - [`http`] — axum router mapping service results to HTTP responses.
//!
//! ## Example
//!
//! ```rust,ignore
//! use notekeep::{NoteInput, NoteService, SqliteGateway, StoreConfig};
//!
//! let gateway = SqliteGateway::new(StoreConfig::new("./notes.db"));
//! let service = NoteService::new(gateway);
//! let note = service.create(&NoteInput {
//!     title: "groceries".to_string(),
//!     text: "eggs, flour".to_string(),
//!     datetime: "2023-01-01T00:00:00Z".to_string(),
//! }).await?;
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod config;
pub mod http;
pub mod models;
pub mod observability;
pub mod services;
pub mod storage;

// Re-exports for convenience
pub use config::ServiceConfig;
pub use models::{FieldViolation, Note, NoteInput};
pub use services::NoteService;
pub use storage::{Row, SqliteGateway, StoreConfig};

/// Error type for notekeep operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
/// Every variant maps to an HTTP status classifier via [`Error::status`].
///
/// # Error Variant Triggers
///
/// | Variant | Raised When | Status |
/// |---------|-------------|--------|
/// | `Validation` | One or more field-level rule violations | 400 |
/// | `InvalidId` | Path id does not parse as an integer | 400 |
/// | `NotFound` | No note row matches the given id | 404 |
/// | `Store` | The store rejects a statement (constraint, syntax) | 400 |
/// | `Transport` | Connection cannot be established or the statement errors | 502 |
/// | `Startup` | Config load, address parse, bind, or serve fails | 500 |
#[derive(Debug, ThisError)]
pub enum Error {
    /// The payload failed one or more validation rules.
    ///
    /// Carries the full accumulated list of violations, never a partial one.
    /// Both `create` and `update` surface this shape (the envelope is
    /// deliberately uniform across operations).
    #[error("invalid input: {} field violation(s)", .0.len())]
    Validation(Vec<models::FieldViolation>),

    /// The id path segment is not an integer.
    ///
    /// Raised before any store interaction.
    #[error("Invalid id")]
    InvalidId {
        /// The raw id segment as received.
        given: String,
    },

    /// No note matches the given id.
    #[error("Note not found")]
    NotFound,

    /// The store rejected a statement.
    ///
    /// Carries the store's raw error text, surfaced to the caller with a 400
    /// classification (bad input at the constraint level).
    #[error("{0}")]
    Store(String),

    /// The store could not be reached or the statement failed in transit.
    ///
    /// Produced by the persistence gateway. The record service re-packages
    /// this as [`Error::Store`] for read/write operations; `delete` lets it
    /// through so transport failure stays distinct from absence.
    #[error("operation '{operation}' failed: {cause}")]
    Transport {
        /// The gateway operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// Process startup failed.
    ///
    /// Raised when:
    /// - The configuration file cannot be read or parsed
    /// - The bind address is malformed
    /// - The listener cannot bind or the server loop errors
    #[error("startup '{operation}' failed: {cause}")]
    Startup {
        /// The startup step that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

impl Error {
    /// Returns the HTTP status classifier for this failure.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::InvalidId { .. } | Self::Store(_) => 400,
            Self::NotFound => 404,
            Self::Transport { .. } => 502,
            Self::Startup { .. } => 500,
        }
    }
}

/// Result type alias for notekeep operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldViolation;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidId {
            given: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid id");

        let err = Error::NotFound;
        assert_eq!(err.to_string(), "Note not found");

        let err = Error::Transport {
            operation: "open_connection".to_string(),
            cause: "unable to open database file".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "operation 'open_connection' failed: unable to open database file"
        );

        let err = Error::Store("NOT NULL constraint failed: notes.title".to_string());
        assert_eq!(
            err.to_string(),
            "NOT NULL constraint failed: notes.title"
        );
    }

    #[test]
    fn test_error_status() {
        assert_eq!(
            Error::Validation(vec![FieldViolation::new("title", "too short")]).status(),
            400
        );
        assert_eq!(
            Error::InvalidId {
                given: "x".to_string()
            }
            .status(),
            400
        );
        assert_eq!(Error::NotFound.status(), 404);
        assert_eq!(Error::Store("boom".to_string()).status(), 400);
        assert_eq!(
            Error::Transport {
                operation: "open_connection".to_string(),
                cause: "boom".to_string()
            }
            .status(),
            502
        );
    }
}
