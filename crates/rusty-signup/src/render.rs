// File: src/render.rs
// Purpose: Render instruction returned to the presentation layer after each message

use serde::Serialize;

use crate::banner::{BannerKind, BannerState, TimerInstruction};
use crate::field::{DisplayState, FieldName, FieldSpec, FormState};
use crate::orchestrator::SubmissionOutcome;
use crate::toggle::PasswordToggle;

/// How one input should look
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    pub name: FieldName,
    pub id: &'static str,
    pub state: DisplayState,
    pub class: &'static str,
    /// Inline reason shown next to a failing field
    pub message: Option<String>,
    /// New input value when the typed one was sanitized
    pub replace_value: Option<String>,
}

impl FieldView {
    fn from_spec(spec: &FieldSpec) -> Self {
        Self {
            name: spec.name,
            id: spec.name.dom_id(),
            state: spec.display_state,
            class: spec.display_state.css_class(),
            message: spec.error.as_ref().map(ToString::to_string),
            replace_value: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerView {
    pub kind: BannerKind,
    /// Full class attribute, e.g. `message success`
    pub class: String,
    pub message: String,
    pub visible: bool,
}

impl BannerView {
    fn from_state(banner: &BannerState) -> Self {
        let class = match banner.kind {
            BannerKind::None => "message".to_string(),
            kind => format!("message {}", kind.css_class()),
        };

        Self {
            kind: banner.kind,
            class,
            message: banner.message.clone(),
            visible: banner.visible,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleView {
    pub field: FieldName,
    pub field_id: &'static str,
    pub toggle_id: &'static str,
    pub input_type: &'static str,
    pub label: &'static str,
}

impl ToggleView {
    fn from_toggle(field: FieldName, toggle: &PasswordToggle) -> Option<Self> {
        Some(Self {
            field,
            field_id: field.dom_id(),
            toggle_id: field.toggle_id()?,
            input_type: toggle.input_type(),
            label: toggle.label(),
        })
    }
}

/// Full picture of the form after handling a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Render {
    /// Suppress the browser's own form submission
    pub prevent_default: bool,
    pub outcome: Option<SubmissionOutcome>,
    pub fields: Vec<FieldView>,
    pub banner: BannerView,
    pub toggles: Vec<ToggleView>,
    pub timer: TimerInstruction,
    pub scroll_to_top: bool,
}

impl Render {
    /// Snapshot of the current state with no side effects requested
    pub fn snapshot(state: &FormState) -> Self {
        Self {
            prevent_default: false,
            outcome: None,
            fields: state.fields().iter().map(FieldView::from_spec).collect(),
            banner: BannerView::from_state(&state.banner),
            toggles: state
                .toggles()
                .filter_map(|(name, toggle)| ToggleView::from_toggle(name, toggle))
                .collect(),
            timer: TimerInstruction::None,
            scroll_to_top: false,
        }
    }

    pub fn field(&self, name: FieldName) -> Option<&FieldView> {
        self.fields.iter().find(|view| view.name == name)
    }

    pub(crate) fn field_mut(&mut self, name: FieldName) -> Option<&mut FieldView> {
        self.fields.iter_mut().find(|view| view.name == name)
    }

    pub fn toggle(&self, name: FieldName) -> Option<&ToggleView> {
        self.toggles.iter().find(|view| view.field == name)
    }
}
