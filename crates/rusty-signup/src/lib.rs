// rusty-signup - registration form core
// Field validation state, submit orchestration and the status banner,
// driven by discrete UI messages and free of any DOM access.

pub mod banner;
pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod field;
pub mod message;
pub mod orchestrator;
pub mod render;
pub mod submit;
pub mod toggle;

// Re-export the validators so hosts only need this crate
pub use rusty_signup_validation as validation;
pub use rusty_signup_validation::{FieldError, ValidationResult};

// Re-export framework types
pub use banner::{BannerKind, BannerPolicy, BannerState, TimerInstruction};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::SignupConfig;
pub use controller::{FieldController, FieldRules};
pub use error::FormError;
pub use field::{DisplayState, FieldName, FieldSpec, FormState, Validator};
pub use message::Message;
pub use orchestrator::{FormOrchestrator, SubmissionOutcome};
pub use render::{BannerView, FieldView, Render, ToggleView};
pub use submit::{LogSubmitter, Registration, Submitter};
pub use toggle::PasswordToggle;
