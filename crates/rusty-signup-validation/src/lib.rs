//! rusty-signup validation
//!
//! Pure validators for the registration form fields. Every validator trims its
//! input, decides pass/fail and hands back the normalized value or the reason
//! the value was rejected. Shared by the form controller and the WASM binding.

pub mod email;
pub mod error;
pub mod password;
pub mod phone;
pub mod result;
pub mod string;

pub use email::*;
pub use error::{FieldError, FormatRule};
pub use password::*;
pub use phone::*;
pub use result::ValidationResult;
pub use string::*;
