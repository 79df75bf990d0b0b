// File: src/message.rs
// Purpose: User interactions as discrete messages for the orchestrator

use serde::{Deserialize, Serialize};

use crate::field::FieldName;

/// One user interaction
///
/// Serialized with a `type` tag, e.g.
/// `{"type":"FieldInput","name":"phone","value":"555"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Message {
    FieldBlurred { name: FieldName },
    FieldInput { name: FieldName, value: String },
    SubmitRequested,
    ToggleRequested { name: FieldName },
    /// The host's hide timer fired
    BannerExpired { generation: u64 },
}

impl Message {
    /// Message name for logs; never includes field values
    pub fn kind(&self) -> &'static str {
        match self {
            Message::FieldBlurred { .. } => "FieldBlurred",
            Message::FieldInput { .. } => "FieldInput",
            Message::SubmitRequested => "SubmitRequested",
            Message::ToggleRequested { .. } => "ToggleRequested",
            Message::BannerExpired { .. } => "BannerExpired",
        }
    }
}
