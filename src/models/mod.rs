//! Wire and domain types.

mod note;

pub use note::{FieldViolation, Note, NoteInput};
