//! Input validation helpers
//!
//! Centralized text length constants and validation functions, run by the
//! repositories before any statement reaches the store.
//! SQLite TEXT has no built-in length enforcement.

use crate::db::repository::{RepoError, RepoResult};

// ── Text length limits ──────────────────────────────────────────────

/// Person names (first / last)
pub const MAX_NAME_LEN: usize = 200;

/// Notes on customers and reservations
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone numbers
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Largest party a single reservation may hold
pub const MAX_PARTY_SIZE: i64 = 1000;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> RepoResult<()> {
    if value.trim().is_empty() {
        return Err(RepoError::Validation(format!("{field} must not be empty")));
    }
    if value.chars().count() > max_len {
        return Err(RepoError::Validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.chars().count()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> RepoResult<()> {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        return Err(RepoError::Validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.chars().count()
        )));
    }
    Ok(())
}

/// Phone numbers: digits plus `+ - ( ) .` and spaces, at least one digit.
/// An empty string is treated as "no phone".
pub fn validate_phone(value: &Option<String>) -> RepoResult<()> {
    validate_optional_text(value, "phone", MAX_SHORT_TEXT_LEN)?;
    if let Some(phone) = value
        && !phone.is_empty()
    {
        let allowed = phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | '.' | ' '));
        if !allowed || !phone.chars().any(|c| c.is_ascii_digit()) {
            return Err(RepoError::Validation(format!(
                "phone contains invalid characters: {phone}"
            )));
        }
    }
    Ok(())
}

/// Party size must be a positive integer.
pub fn validate_guest_count(num_guests: i64) -> RepoResult<()> {
    if num_guests < 1 {
        return Err(RepoError::Validation(format!(
            "num_guests must be at least 1 (got {num_guests})"
        )));
    }
    if num_guests > MAX_PARTY_SIZE {
        return Err(RepoError::Validation(format!(
            "num_guests is too large ({num_guests}, max {MAX_PARTY_SIZE})"
        )));
    }
    Ok(())
}

/// Row identifiers handed in by callers must be positive.
pub fn validate_id(id: i64, field: &str) -> RepoResult<()> {
    if id < 1 {
        return Err(RepoError::Validation(format!("{field} must be positive (got {id})")));
    }
    Ok(())
}
