// File: src/field.rs
// Purpose: Registration fields, their validators and the form state that owns them

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rusty_signup_validation::{
    validate_confirm_password, validate_email, validate_name, validate_password, validate_phone,
    FieldError, ValidationResult,
};

use crate::banner::BannerState;
use crate::controller::FieldRules;
use crate::error::FormError;
use crate::toggle::PasswordToggle;

/// The fields of the registration form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldName {
    FullName,
    Email,
    Phone,
    Password,
    ConfirmPassword,
}

impl FieldName {
    /// Visual/tab order, which is also the submit validation order
    pub const ORDER: [FieldName; 5] = [
        FieldName::FullName,
        FieldName::Email,
        FieldName::Phone,
        FieldName::Password,
        FieldName::ConfirmPassword,
    ];

    /// Element id of the input
    pub fn dom_id(self) -> &'static str {
        match self {
            FieldName::FullName => "full-name",
            FieldName::Email => "email",
            FieldName::Phone => "phone",
            FieldName::Password => "password",
            FieldName::ConfirmPassword => "confirm-password",
        }
    }

    /// Element id of the Show/Hide control, for password-type fields
    pub fn toggle_id(self) -> Option<&'static str> {
        match self {
            FieldName::Password => Some("toggle-password"),
            FieldName::ConfirmPassword => Some("toggle-confirm-password"),
            _ => None,
        }
    }

    pub fn has_toggle(self) -> bool {
        self.toggle_id().is_some()
    }

    fn index(self) -> usize {
        match self {
            FieldName::FullName => 0,
            FieldName::Email => 1,
            FieldName::Phone => 2,
            FieldName::Password => 3,
            FieldName::ConfirmPassword => 4,
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dom_id())
    }
}

impl FromStr for FieldName {
    type Err = FormError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        FieldName::ORDER
            .into_iter()
            .find(|name| name.dom_id() == id)
            .ok_or_else(|| FormError::UnknownField(id.to_string()))
    }
}

/// Styling of a field after its last validation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayState {
    #[default]
    Neutral,
    Error,
    Success,
}

impl DisplayState {
    pub fn css_class(self) -> &'static str {
        match self {
            DisplayState::Neutral => "",
            DisplayState::Error => "error",
            DisplayState::Success => "success",
        }
    }
}

/// The rule bound to a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    Name,
    Email,
    Phone,
    Password,
    /// Must equal the current value of `against`
    ConfirmPassword { against: FieldName },
}

impl Validator {
    pub fn for_field(name: FieldName) -> Self {
        match name {
            FieldName::FullName => Validator::Name,
            FieldName::Email => Validator::Email,
            FieldName::Phone => Validator::Phone,
            FieldName::Password => Validator::Password,
            FieldName::ConfirmPassword => Validator::ConfirmPassword {
                against: FieldName::Password,
            },
        }
    }

    /// Whether keystrokes are sanitized and validated as they happen
    pub fn sanitizes_input(self) -> bool {
        matches!(self, Validator::Phone)
    }

    /// The field this validator reads besides its own, if any
    pub fn depends_on(self) -> Option<FieldName> {
        match self {
            Validator::ConfirmPassword { against } => Some(against),
            _ => None,
        }
    }

    /// Run the rule against `value`, reading other fields from `form`
    pub fn run(self, value: &str, form: &FormState, rules: &FieldRules) -> ValidationResult {
        match self {
            Validator::Name => validate_name(value, rules.name_min_length),
            Validator::Email => validate_email(value),
            Validator::Phone => validate_phone(value, rules.phone_digits),
            Validator::Password => validate_password(value, &rules.password),
            Validator::ConfirmPassword { against } => {
                validate_confirm_password(form.raw_value(against), value)
            }
        }
    }
}

/// One field of the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: FieldName,
    pub raw_value: String,
    pub validator: Validator,
    pub display_state: DisplayState,
    /// Reason of the last failed run; `None` unless `display_state` is `Error`
    pub error: Option<FieldError>,
}

impl FieldSpec {
    pub fn new(name: FieldName) -> Self {
        Self {
            name,
            raw_value: String::new(),
            validator: Validator::for_field(name),
            display_state: DisplayState::Neutral,
            error: None,
        }
    }

    /// Record the outcome of a validation run
    pub fn apply(&mut self, result: &ValidationResult) {
        if result.valid {
            self.display_state = DisplayState::Success;
            self.error = None;
        } else {
            self.display_state = DisplayState::Error;
            self.error = result.reason.clone();
        }
    }

    pub fn reset(&mut self) {
        self.display_state = DisplayState::Neutral;
        self.error = None;
    }
}

/// Everything the form shows: fields in tab order, the banner and the toggles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    fields: Vec<FieldSpec>,
    pub banner: BannerState,
    toggles: BTreeMap<FieldName, PasswordToggle>,
}

impl FormState {
    pub fn new() -> Self {
        let fields = FieldName::ORDER.into_iter().map(FieldSpec::new).collect();
        let toggles = FieldName::ORDER
            .into_iter()
            .filter(|name| name.has_toggle())
            .map(|name| (name, PasswordToggle::new()))
            .collect();

        Self {
            fields,
            banner: BannerState::new(),
            toggles,
        }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: FieldName) -> &FieldSpec {
        &self.fields[name.index()]
    }

    pub fn field_mut(&mut self, name: FieldName) -> &mut FieldSpec {
        &mut self.fields[name.index()]
    }

    pub fn raw_value(&self, name: FieldName) -> &str {
        &self.field(name).raw_value
    }

    pub fn toggle(&self, name: FieldName) -> Option<&PasswordToggle> {
        self.toggles.get(&name)
    }

    pub fn toggle_mut(&mut self, name: FieldName) -> Option<&mut PasswordToggle> {
        self.toggles.get_mut(&name)
    }

    pub fn toggles(&self) -> impl Iterator<Item = (FieldName, &PasswordToggle)> {
        self.toggles.iter().map(|(name, toggle)| (*name, toggle))
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}
