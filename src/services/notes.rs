//! The note record service.
//!
//! Validates payloads, translates them to single-statement persistence
//! operations, and classifies failures. This is the only component with
//! decision logic; the gateway and the HTTP layer are pass-through glue.

use crate::models::{Note, NoteInput};
use crate::services::validation::validate;
use crate::storage::{Row, SqliteGateway};
use crate::{Error, Result};
use rusqlite::types::Value;
use tracing::instrument;

const INSERT_NOTE: &str =
    "INSERT INTO notes (title, text, datetime) VALUES (?1, ?2, ?3) RETURNING id";
const SELECT_ALL_NOTES: &str = "SELECT id, title, text, datetime FROM notes";
const SELECT_NOTE: &str = "SELECT id, title, text, datetime FROM notes WHERE id = ?1";
const UPDATE_NOTE: &str =
    "UPDATE notes SET title = ?1, text = ?2, datetime = ?3 WHERE id = ?4 RETURNING id";
const DELETE_NOTE: &str = "DELETE FROM notes WHERE id = ?1 RETURNING id";

/// Stateless CRUD service over the notes table.
///
/// Owns no persistent state; each call is an independent transformation from
/// validated input to one gateway statement and back.
#[derive(Debug, Clone)]
pub struct NoteService {
    gateway: SqliteGateway,
}

impl NoteService {
    /// Creates a service over the given gateway.
    #[must_use]
    pub const fn new(gateway: SqliteGateway) -> Self {
        Self { gateway }
    }

    /// Creates a note.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] with every violated rule (400).
    /// - [`Error::Store`] when the store rejects the insert (400).
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: &NoteInput) -> Result<Note> {
        let violations = validate(input);
        if !violations.is_empty() {
            return Err(Error::Validation(violations));
        }

        let rows = self
            .gateway
            .execute(
                INSERT_NOTE,
                vec![
                    Value::Text(input.title.clone()),
                    Value::Text(input.text.clone()),
                    Value::Text(input.datetime.clone()),
                ],
            )
            .await
            .map_err(as_store_rejection)?;

        let id = returned_id(&rows)?;
        Ok(note_from_input(id, input))
    }

    /// Reads all notes, in store order.
    ///
    /// # Errors
    ///
    /// - [`Error::Store`] when the store fails (400).
    #[instrument(skip(self))]
    pub async fn read_all(&self) -> Result<Vec<Note>> {
        let rows = self
            .gateway
            .execute(SELECT_ALL_NOTES, vec![])
            .await
            .map_err(as_store_rejection)?;

        rows.iter().map(note_from_row).collect()
    }

    /// Reads a single note by id.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidId`] when `id` is not an integer; the store is
    ///   never contacted (400).
    /// - [`Error::NotFound`] when no row matches (404).
    /// - [`Error::Store`] when the store fails (400).
    #[instrument(skip(self))]
    pub async fn read_one(&self, id: &str) -> Result<Note> {
        let id = parse_id(id)?;

        let rows = self
            .gateway
            .execute(SELECT_NOTE, vec![Value::Integer(id)])
            .await
            .map_err(as_store_rejection)?;

        match rows.first() {
            Some(row) => note_from_row(row),
            None => Err(Error::NotFound),
        }
    }

    /// Replaces a note's title, text, and datetime.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidId`] when `id` is not an integer (400).
    /// - [`Error::Validation`] exactly as [`NoteService::create`] (400).
    /// - [`Error::NotFound`] when no row was updated (404).
    /// - [`Error::Store`] when the store rejects the update (400).
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: &str, input: &NoteInput) -> Result<Note> {
        let id = parse_id(id)?;

        let violations = validate(input);
        if !violations.is_empty() {
            return Err(Error::Validation(violations));
        }

        let rows = self
            .gateway
            .execute(
                UPDATE_NOTE,
                vec![
                    Value::Text(input.title.clone()),
                    Value::Text(input.text.clone()),
                    Value::Text(input.datetime.clone()),
                    Value::Integer(id),
                ],
            )
            .await
            .map_err(as_store_rejection)?;

        if rows.is_empty() {
            return Err(Error::NotFound);
        }
        let id = returned_id(&rows)?;
        Ok(note_from_input(id, input))
    }

    /// Deletes a note by id. Hard delete, no tombstone.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidId`] when `id` is not an integer (400).
    /// - [`Error::NotFound`] when no row was deleted (404).
    /// - [`Error::Transport`] when the store is unreachable or rejects the
    ///   statement (502) — kept distinct from absence, unlike the other
    ///   operations' 400 re-packaging.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = parse_id(id)?;

        let rows = self
            .gateway
            .execute(DELETE_NOTE, vec![Value::Integer(id)])
            .await?;

        if rows.is_empty() {
            return Err(Error::NotFound);
        }
        Ok(())
    }
}

/// Parses a path id segment as an integer.
fn parse_id(id: &str) -> Result<i64> {
    id.parse().map_err(|_| Error::InvalidId {
        given: id.to_string(),
    })
}

/// Re-packages a gateway transport failure as a store rejection (400),
/// keeping the store's raw error text. Other errors pass through.
fn as_store_rejection(err: Error) -> Error {
    match err {
        Error::Transport { cause, .. } => Error::Store(cause),
        other => other,
    }
}

/// Builds the echoed note from the input fields plus the store-assigned id.
fn note_from_input(id: i64, input: &NoteInput) -> Note {
    Note {
        id,
        title: input.title.clone(),
        text: input.text.clone(),
        datetime: input.datetime.clone(),
    }
}

/// Extracts the id from a `RETURNING id` result set.
fn returned_id(rows: &[Row]) -> Result<i64> {
    match rows.first().and_then(|row| row.first()) {
        Some(Value::Integer(id)) => Ok(*id),
        other => Err(Error::Store(format!(
            "expected returned id, got {other:?}"
        ))),
    }
}

/// Maps a raw `id, title, text, datetime` row to a note.
fn note_from_row(row: &Row) -> Result<Note> {
    match row.as_slice() {
        [
            Value::Integer(id),
            Value::Text(title),
            Value::Text(text),
            Value::Text(datetime),
        ] => Ok(Note {
            id: *id,
            title: title.clone(),
            text: text.clone(),
            datetime: datetime.clone(),
        }),
        other => Err(Error::Store(format!("malformed note row: {other:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{StoreConfig, schema};
    use tempfile::TempDir;

    async fn test_service() -> (TempDir, NoteService) {
        let dir = TempDir::new().unwrap();
        let gateway = SqliteGateway::new(StoreConfig::new(dir.path().join("notes.db")));
        schema::initialize(&gateway).await.unwrap();
        (dir, NoteService::new(gateway))
    }

    fn test_input(title: &str, text: &str, datetime: &str) -> NoteInput {
        NoteInput {
            title: title.to_string(),
            text: text.to_string(),
            datetime: datetime.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_read_one_round_trip() {
        let (_dir, service) = test_service().await;

        let created = service
            .create(&test_input("A", "b", "2023-01-01T00:00:00Z"))
            .await
            .unwrap();
        assert_eq!(created.title, "A");

        let read = service.read_one(&created.id.to_string()).await.unwrap();
        assert_eq!(read.title, "A");
        assert_eq!(read.text, "b");
        assert_eq!(read.datetime, "2023-01-01T00:00:00Z");
        assert_eq!(read.id, created.id);
    }

    #[tokio::test]
    async fn test_create_accumulates_violations_in_order() {
        let (_dir, service) = test_service().await;

        let err = service
            .create(&test_input("", "x", "bad"))
            .await
            .unwrap_err();
        match err {
            Error::Validation(violations) => {
                assert_eq!(violations.len(), 2);
                assert_eq!(violations[0].field, "datetime");
                assert_eq!(violations[1].field, "title");
            },
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_empty_title_fails_with_valid_rest() {
        let (_dir, service) = test_service().await;

        let err = service
            .create(&test_input("", "x", "2023-01-01"))
            .await
            .unwrap_err();
        match err {
            Error::Validation(violations) => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].field, "title");
            },
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_read_all_returns_all_notes() {
        let (_dir, service) = test_service().await;

        service
            .create(&test_input("first", "1", "2023-01-01"))
            .await
            .unwrap();
        service
            .create(&test_input("second", "2", "2023-01-02"))
            .await
            .unwrap();

        let notes = service.read_all().await.unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].title, "first");
        assert_eq!(notes[1].title, "second");
    }

    #[tokio::test]
    async fn test_read_all_empty_store() {
        let (_dir, service) = test_service().await;
        assert!(service.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_numeric_id_never_reaches_the_store() {
        // No schema bootstrap: any store access would fail with a missing
        // table, so a clean InvalidId proves the store was not contacted.
        let dir = TempDir::new().unwrap();
        let gateway = SqliteGateway::new(StoreConfig::new(dir.path().join("notes.db")));
        let service = NoteService::new(gateway);

        let err = service.read_one("abc").await.unwrap_err();
        assert!(matches!(err, Error::InvalidId { .. }));
        assert_eq!(err.status(), 400);
        assert_eq!(err.to_string(), "Invalid id");

        let err = service
            .update("abc", &test_input("A", "b", "2023-01-01"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidId { .. }));
    }

    #[tokio::test]
    async fn test_read_one_missing_row_is_not_found() {
        let (_dir, service) = test_service().await;

        let err = service.read_one("999").await.unwrap_err();
        assert!(matches!(err, Error::NotFound));
        assert_eq!(err.status(), 404);
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let (_dir, service) = test_service().await;

        let created = service
            .create(&test_input("old", "old text", "2023-01-01"))
            .await
            .unwrap();

        let updated = service
            .update(
                &created.id.to_string(),
                &test_input("new", "new text", "2024-02-02T10:00:00Z"),
            )
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "new");

        let read = service.read_one(&created.id.to_string()).await.unwrap();
        assert_eq!(read.title, "new");
        assert_eq!(read.text, "new text");
        assert_eq!(read.datetime, "2024-02-02T10:00:00Z");
    }

    #[tokio::test]
    async fn test_update_nonexistent_id_is_not_found_despite_valid_payload() {
        let (_dir, service) = test_service().await;

        let err = service
            .update("999", &test_input("A", "b", "2023-01-01"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound));
    }

    #[tokio::test]
    async fn test_update_validation_uses_same_envelope_as_create() {
        let (_dir, service) = test_service().await;

        let created = service
            .create(&test_input("A", "b", "2023-01-01"))
            .await
            .unwrap();

        let err = service
            .update(&created.id.to_string(), &test_input("", "x", "bad"))
            .await
            .unwrap_err();
        match err {
            Error::Validation(violations) => assert_eq!(violations.len(), 2),
            other => panic!("expected validation error, got {other:?}"),
        }
        // Payload was never applied.
        let read = service.read_one(&created.id.to_string()).await.unwrap();
        assert_eq!(read.title, "A");
    }

    #[tokio::test]
    async fn test_delete_is_idempotent_second_call_not_found() {
        let (_dir, service) = test_service().await;

        let created = service
            .create(&test_input("A", "b", "2023-01-01"))
            .await
            .unwrap();
        let id = created.id.to_string();

        service.delete(&id).await.unwrap();
        let err = service.delete(&id).await.unwrap_err();
        assert!(matches!(err, Error::NotFound));
        assert_eq!(err.status(), 404);
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_not_found() {
        let (_dir, service) = test_service().await;

        let err = service.delete("42").await.unwrap_err();
        assert!(matches!(err, Error::NotFound));
    }

    #[tokio::test]
    async fn test_delete_transport_failure_stays_distinct() {
        // No schema: the delete statement fails at the store, which must
        // surface as Transport (502), not NotFound.
        let dir = TempDir::new().unwrap();
        let gateway = SqliteGateway::new(StoreConfig::new(dir.path().join("notes.db")));
        let service = NoteService::new(gateway);

        let err = service.delete("1").await.unwrap_err();
        assert!(matches!(err, Error::Transport { .. }));
        assert_eq!(err.status(), 502);
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_as_400_with_store_text() {
        // No schema: reads fail at the store and are re-packaged as Store.
        let dir = TempDir::new().unwrap();
        let gateway = SqliteGateway::new(StoreConfig::new(dir.path().join("notes.db")));
        let service = NoteService::new(gateway);

        let err = service.read_all().await.unwrap_err();
        match &err {
            Error::Store(cause) => assert!(cause.contains("no such table")),
            other => panic!("expected store error, got {other:?}"),
        }
        assert_eq!(err.status(), 400);
    }

    #[tokio::test]
    async fn test_create_preserves_text_verbatim() {
        let (_dir, service) = test_service().await;

        let text = "line one\nline two; DROP TABLE notes; --";
        let created = service
            .create(&test_input("quotes", text, "2023-06-15T08:00:00+02:00"))
            .await
            .unwrap();

        let read = service.read_one(&created.id.to_string()).await.unwrap();
        assert_eq!(read.text, text);
    }
}
