//! HTTP surface.
//!
//! Thin axum routing layer: forwards requests to the record service and maps
//! its results to HTTP responses. No decision logic beyond the mapping.

mod routes;

pub use routes::{router, serve};
