// File: src/error.rs
// Purpose: Errors at the host boundary (bad field ids, misdirected messages)

use thiserror::Error;

use crate::field::FieldName;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("unknown field id: {0:?}")]
    UnknownField(String),

    #[error("field {0} has no visibility toggle")]
    NotPasswordField(FieldName),
}
