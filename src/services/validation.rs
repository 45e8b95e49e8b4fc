//! Payload validation.
//!
//! Pure rule checks over a [`NoteInput`]; accumulates every violation rather
//! than failing fast, so callers always see the full list for a payload.

use crate::models::{FieldViolation, NoteInput};
use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum title length in characters.
const TITLE_MAX_CHARS: usize = 255;

/// ISO 8601 grammar: calendar date (extended `YYYY-MM-DD` or basic
/// `YYYYMMDD`, day optional in extended form), week date (`Www-D`), or
/// ordinal date; optional time part after `T` or space with optional
/// minutes/seconds, a single optional `.`/`,` fraction, and an optional
/// `Z` or numeric offset.
///
/// The `regex` crate has no backreferences, so mixed-separator forms are
/// ruled out by spelling the extended and basic shapes as alternations.
#[allow(clippy::unwrap_used)] // pattern is a compile-time constant
static ISO_8601: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[+-]?\d{4}(?:-(?:0[1-9]|1[0-2])(?:-(?:0[1-9]|[12]\d|3[01]))?|(?:0[1-9]|1[0-2])(?:0[1-9]|[12]\d|3[01])|-?W(?:[0-4]\d|5[0-2])(?:-?[1-7])?|-?(?:00[1-9]|0[1-9]\d|[12]\d{2}|3(?:[0-5]\d|6[1-6])))?(?:[T ](?:(?:[01]\d|2[0-3])(?::[0-5]\d(?::[0-5]\d)?|[0-5]\d(?:[0-5]\d)?)?|24:?00)(?:[.,]\d+)?(?:[zZ]|[+-](?:[01]\d|2[0-3])(?::?[0-5]\d)?)?)?$",
    )
    .unwrap()
});

/// Returns whether the string is a valid ISO 8601 date or datetime.
#[must_use]
pub fn is_iso8601(datetime: &str) -> bool {
    ISO_8601.is_match(datetime)
}

/// Validates a note payload, returning every rule violation.
///
/// Rules, in reporting order:
/// 1. `datetime` must match the ISO 8601 grammar.
/// 2. `title` must be 1 to 255 characters.
///
/// The body's "text must be a string" rule is enforced statically by
/// [`NoteInput`]'s typed decoding. An empty result means the payload is
/// valid. No side effects.
#[must_use]
pub fn validate(input: &NoteInput) -> Vec<FieldViolation> {
    let mut violations = Vec::new();

    if !is_iso8601(&input.datetime) {
        violations.push(FieldViolation::new(
            "datetime",
            "Datetime must be ISO 8601 date",
        ));
    }

    let title_chars = input.title.chars().count();
    if title_chars == 0 || title_chars > TITLE_MAX_CHARS {
        violations.push(FieldViolation::new(
            "title",
            "Title must be a string of length 1 to 255 characters",
        ));
    }

    violations
}
