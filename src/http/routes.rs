//! Router, handlers, and the error-to-response mapping.

use crate::models::{Note, NoteInput};
use crate::services::NoteService;
use crate::{Error, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        match self {
            // Validation failures carry the full violation list as the body.
            Self::Validation(violations) => (status, Json(violations)).into_response(),
            other => (
                status,
                Json(serde_json::json!({ "error": other.to_string() })),
            )
                .into_response(),
        }
    }
}

/// Builds the notes router.
#[must_use]
pub fn router(service: Arc<NoteService>) -> Router {
    Router::new()
        .route("/", get(read_all).post(create))
        .route("/{id}", get(read_one).put(update).delete(delete))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            header::HeaderValue::from_static("nosniff"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Binds the listener and runs the server until it exits.
///
/// # Errors
///
/// Returns [`Error::Startup`] when the listener cannot bind or the server
/// loop fails.
pub async fn serve(addr: SocketAddr, service: Arc<NoteService>) -> Result<()> {
    let app = router(service);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Startup {
            operation: "bind".to_string(),
            cause: e.to_string(),
        })?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Startup {
            operation: "serve".to_string(),
            cause: e.to_string(),
        })
}

/// Decodes a JSON body, mapping any rejection to a 400 Store-style error
/// body so malformed and mistyped payloads classify as bad input.
fn decode_body(body: std::result::Result<Json<NoteInput>, JsonRejection>) -> Result<NoteInput> {
    match body {
        Ok(Json(input)) => Ok(input),
        Err(rejection) => Err(Error::Store(rejection.body_text())),
    }
}

async fn read_all(State(service): State<Arc<NoteService>>) -> Result<Json<Vec<Note>>> {
    service.read_all().await.map(Json)
}

async fn read_one(
    State(service): State<Arc<NoteService>>,
    Path(id): Path<String>,
) -> Result<Json<Note>> {
    service.read_one(&id).await.map(Json)
}

async fn create(
    State(service): State<Arc<NoteService>>,
    body: std::result::Result<Json<NoteInput>, JsonRejection>,
) -> Result<Json<Note>> {
    let input = decode_body(body)?;
    service.create(&input).await.map(Json)
}

async fn update(
    State(service): State<Arc<NoteService>>,
    Path(id): Path<String>,
    body: std::result::Result<Json<NoteInput>, JsonRejection>,
) -> Result<Json<Note>> {
    let input = decode_body(body)?;
    service.update(&id, &input).await.map(Json)
}

/// Delete returns a bare status with an empty body: 200 on removal, 404 when
/// no row matched (or the id was malformed: 400), 502 on transport failure.
async fn delete(State(service): State<Arc<NoteService>>, Path(id): Path<String>) -> StatusCode {
    match service.delete(&id).await {
        Ok(()) => StatusCode::OK,
        Err(e) => StatusCode::from_u16(e.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
    }
}
