//! Schema bootstrap.
//!
//! Mirrors the standalone create-database step: one idempotent DDL statement
//! issued through the gateway. Invoked by the `init` CLI subcommand and again
//! on `serve` startup (harmless when the table already exists).

use super::SqliteGateway;
use crate::Result;
use tracing::info;

/// DDL for the notes table.
///
/// `datetime` is stored as text; ISO 8601 validity is enforced by the record
/// service before any write, and lexicographic order on the canonical forms
/// matches timestamp order.
const CREATE_NOTES_TABLE: &str = "CREATE TABLE IF NOT EXISTS notes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    text TEXT NOT NULL,
    datetime TEXT NOT NULL
)";

/// Creates the notes table if it does not exist.
///
/// # Errors
///
/// Returns [`crate::Error::Transport`] when the store is unreachable or the
/// DDL is rejected.
pub async fn initialize(gateway: &SqliteGateway) -> Result<()> {
    gateway.execute(CREATE_NOTES_TABLE, vec![]).await?;
    info!(path = %gateway.config().path.display(), "schema ready");
    Ok(())
}
