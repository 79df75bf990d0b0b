//! Phone number sanitization and validation

use crate::error::{FieldError, FormatRule};
use crate::result::ValidationResult;

/// Number of digits a phone number must have
pub const DEFAULT_PHONE_DIGITS: usize = 10;

/// Strips every character that is not an ASCII digit
///
/// Applied on each keystroke so the input only ever holds digits.
pub fn sanitize_phone(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Validates a phone number after sanitizing it
pub fn validate_phone(value: &str, digits: usize) -> ValidationResult {
    let sanitized = sanitize_phone(value);

    if sanitized.is_empty() {
        return ValidationResult::fail(FieldError::EmptyField);
    }

    if sanitized.len() != digits {
        return ValidationResult::fail(FieldError::BadFormat(FormatRule::Phone { digits }));
    }

    ValidationResult::ok(sanitized)
}
