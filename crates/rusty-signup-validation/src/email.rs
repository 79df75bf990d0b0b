//! Email validation functions

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{FieldError, FormatRule};
use crate::result::ValidationResult;
use crate::string::non_empty;

// local-part@domain.tld with an alphabetic final label of 2+ characters
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap()
});

/// Checks the `local-part@domain.tld` shape
///
/// The value is matched as given; callers that want trimming should go
/// through [`validate_email`].
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Validates an email address
///
/// Fails with `EmptyField` when blank and `BadFormat` when the trimmed value
/// does not look like `local-part@domain.tld`.
pub fn validate_email(value: &str) -> ValidationResult {
    let result = non_empty(value).and_then(|email| {
        if is_valid_email(email) {
            Ok(email.to_string())
        } else {
            Err(FieldError::BadFormat(FormatRule::Email))
        }
    });
    result.into()
}
