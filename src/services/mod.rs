//! Business logic services.
//!
//! The record service orchestrates validation and the persistence gateway;
//! it holds no state between requests.

mod notes;
pub mod validation;

pub use notes::NoteService;
