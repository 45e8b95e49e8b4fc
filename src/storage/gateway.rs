//! `SQLite` persistence gateway.
//!
//! Executes exactly one parameterized statement per call and returns the raw
//! rows, or propagates a transport failure. A fresh connection is opened per
//! call and dropped on every exit path; there is no pooling, no retry, no
//! caching, and no transaction spanning multiple statements.

use crate::{Error, Result};
use rusqlite::Connection;
use rusqlite::types::Value;
use std::path::{Path, PathBuf};
use tracing::instrument;

/// A raw result row: one `Value` per selected column.
pub type Row = Vec<Value>;

/// Store connection configuration.
///
/// Passed to the gateway at construction; never a process-wide global.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the `SQLite` database file.
    pub path: PathBuf,
}

impl StoreConfig {
    /// Creates a store configuration for the given database path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// `SQLite`-backed persistence gateway.
///
/// # Concurrency Model
///
/// Each call opens its own connection, so the gateway holds no shared mutable
/// state and is freely shareable across request tasks. The blocking `SQLite`
/// work runs under [`tokio::task::spawn_blocking`], making every store
/// interaction a suspension point for the caller.
#[derive(Debug, Clone)]
pub struct SqliteGateway {
    config: StoreConfig,
}

impl SqliteGateway {
    /// Creates a gateway over the configured store.
    #[must_use]
    pub const fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Returns the store configuration.
    #[must_use]
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Executes one parameterized statement and returns the resulting rows.
    ///
    /// Statements that produce no rows (e.g. DDL) return an empty vector.
    /// Write statements carry a `RETURNING` clause when the caller needs the
    /// affected ids, which keeps this a single uniform rows-out contract.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] when the connection cannot be established
    /// or the statement errors at the store (syntax, constraint, I/O).
    #[instrument(skip(self, params), fields(backend = "sqlite"))]
    pub async fn execute(&self, sql: &str, params: Vec<Value>) -> Result<Vec<Row>> {
        let path = self.config.path.clone();
        let sql = sql.to_string();

        tokio::task::spawn_blocking(move || execute_blocking(&path, &sql, params))
            .await
            .map_err(|e| Error::Transport {
                operation: "join_store_task".to_string(),
                cause: e.to_string(),
            })?
    }
}

/// Runs the statement on a fresh connection.
///
/// The connection is dropped on every exit path, success or failure.
fn execute_blocking(path: &Path, sql: &str, params: Vec<Value>) -> Result<Vec<Row>> {
    let conn = Connection::open(path).map_err(|e| Error::Transport {
        operation: "open_connection".to_string(),
        cause: e.to_string(),
    })?;

    let mut stmt = conn.prepare(sql).map_err(|e| Error::Transport {
        operation: "prepare_statement".to_string(),
        cause: e.to_string(),
    })?;
    let column_count = stmt.column_count();

    let mut rows = stmt
        .query(rusqlite::params_from_iter(params))
        .map_err(|e| Error::Transport {
            operation: "execute_statement".to_string(),
            cause: e.to_string(),
        })?;

    let mut out = Vec::new();
    loop {
        let row = match rows.next() {
            Ok(Some(row)) => row,
            Ok(None) => break,
            Err(e) => {
                return Err(Error::Transport {
                    operation: "step_statement".to_string(),
                    cause: e.to_string(),
                });
            },
        };

        let mut values: Row = Vec::with_capacity(column_count);
        for i in 0..column_count {
            let value = row.get::<_, Value>(i).map_err(|e| Error::Transport {
                operation: "read_column".to_string(),
                cause: e.to_string(),
            })?;
            values.push(value);
        }
        out.push(values);
    }

    Ok(out)
}
