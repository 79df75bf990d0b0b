//! Presence and length validators

use crate::error::FieldError;
use crate::result::ValidationResult;

/// Minimum trimmed length of a full name
pub const DEFAULT_NAME_MIN_LENGTH: usize = 2;

/// Trims the value and rejects it when nothing is left
pub(crate) fn non_empty(value: &str) -> Result<&str, FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FieldError::EmptyField)
    } else {
        Ok(trimmed)
    }
}

/// Fails with `EmptyField` when the trimmed value is empty
pub fn validate_required(value: &str) -> ValidationResult {
    non_empty(value).map(str::to_string).into()
}

/// Validates a full name
///
/// Length is counted in characters, not bytes, so "Zoë" is three long.
pub fn validate_name(value: &str, min_len: usize) -> ValidationResult {
    let result = non_empty(value).and_then(|name| {
        if name.chars().count() < min_len {
            Err(FieldError::TooShort { min: min_len })
        } else {
            Ok(name.to_string())
        }
    });
    result.into()
}
