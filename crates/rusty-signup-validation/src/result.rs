//! Outcome of a single validation call

use serde::{Deserialize, Serialize};

use crate::error::FieldError;

/// Pass/fail plus either the normalized value or the failure reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    pub normalized_value: Option<String>,
    pub reason: Option<FieldError>,
}

impl ValidationResult {
    /// A passing result carrying the normalized value
    pub fn ok(normalized: impl Into<String>) -> Self {
        Self {
            valid: true,
            normalized_value: Some(normalized.into()),
            reason: None,
        }
    }

    /// A failing result
    pub fn fail(reason: FieldError) -> Self {
        Self {
            valid: false,
            normalized_value: None,
            reason: Some(reason),
        }
    }

    pub fn from_result(result: Result<String, FieldError>) -> Self {
        match result {
            Ok(normalized) => Self::ok(normalized),
            Err(reason) => Self::fail(reason),
        }
    }

    /// Convert to a `Result`, yielding the normalized value on success
    pub fn into_result(self) -> Result<String, FieldError> {
        match self.reason {
            Some(reason) => Err(reason),
            None => Ok(self.normalized_value.unwrap_or_default()),
        }
    }
}

impl From<Result<String, FieldError>> for ValidationResult {
    fn from(result: Result<String, FieldError>) -> Self {
        Self::from_result(result)
    }
}
