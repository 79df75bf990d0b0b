// File: src/toggle.rs
// Purpose: Show/Hide state of a password-type input

use serde::Serialize;

/// Visibility toggle for one password-type field
///
/// Starts masked with the control reading "Show".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PasswordToggle {
    masked: bool,
}

impl PasswordToggle {
    pub fn new() -> Self {
        Self { masked: true }
    }

    /// Flip visibility; returns whether the field is now masked
    pub fn toggle(&mut self) -> bool {
        self.masked = !self.masked;
        self.masked
    }

    pub fn is_masked(&self) -> bool {
        self.masked
    }

    /// Text of the toggle control
    pub fn label(&self) -> &'static str {
        if self.masked {
            "Show"
        } else {
            "Hide"
        }
    }

    /// `type` attribute of the input
    pub fn input_type(&self) -> &'static str {
        if self.masked {
            "password"
        } else {
            "text"
        }
    }
}

impl Default for PasswordToggle {
    fn default() -> Self {
        Self::new()
    }
}
