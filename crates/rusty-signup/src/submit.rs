// File: src/submit.rs
// Purpose: Hand-off of an accepted registration to whoever creates the account

use serde::Serialize;
use std::fmt;

/// Normalized values of an accepted form
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing)]
    pub password: String,
}

// Keeps the password out of logs
impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Receives accepted registrations
pub trait Submitter {
    fn submit(&mut self, registration: &Registration);
}

impl<F> Submitter for F
where
    F: FnMut(&Registration),
{
    fn submit(&mut self, registration: &Registration) {
        self(registration)
    }
}

/// Logs the registration and does nothing else
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSubmitter;

impl Submitter for LogSubmitter {
    fn submit(&mut self, registration: &Registration) {
        tracing::info!(
            full_name = %registration.full_name,
            email = %registration.email,
            phone = %registration.phone,
            "registration accepted"
        );
    }
}
