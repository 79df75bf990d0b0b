//! Validation failure reasons

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The format rule a value broke
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum FormatRule {
    Email,
    Phone {
        digits: usize,
    },
    /// Length or character-class requirements of the password policy
    Password {
        min_length: usize,
        require_symbol: bool,
    },
    /// A character outside the policy's permitted set
    PasswordCharacters {
        symbols: String,
    },
}

impl fmt::Display for FormatRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatRule::Email => write!(f, "Invalid email format."),
            FormatRule::Phone { digits } => {
                write!(f, "Phone number must be exactly {} digits.", digits)
            }
            FormatRule::Password {
                min_length,
                require_symbol,
            } => {
                write!(
                    f,
                    "Password must contain 1 uppercase, 1 lowercase, 1 number"
                )?;
                if *require_symbol {
                    write!(f, ", 1 symbol")?;
                }
                write!(f, ", and be {}+ characters.", min_length)
            }
            FormatRule::PasswordCharacters { symbols } if symbols.is_empty() => {
                write!(f, "Password may only contain letters and numbers.")
            }
            FormatRule::PasswordCharacters { symbols } => write!(
                f,
                "Password may only contain letters, numbers and {}.",
                symbols
            ),
        }
    }
}

/// Why a field value was rejected
///
/// These are ordinary outcomes of user input, never fatal. The `Display`
/// text is what the user sees next to the field.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum FieldError {
    #[error("This field is required.")]
    EmptyField,

    #[error("Must be at least {min} characters.")]
    TooShort { min: usize },

    #[error("{0}")]
    BadFormat(FormatRule),

    #[error("Passwords do not match.")]
    Mismatch,
}

impl FieldError {
    /// Stable error code for programmatic handling
    pub fn code(&self) -> &'static str {
        match self {
            FieldError::EmptyField => "empty_field",
            FieldError::TooShort { .. } => "too_short",
            FieldError::BadFormat(_) => "bad_format",
            FieldError::Mismatch => "mismatch",
        }
    }
}
