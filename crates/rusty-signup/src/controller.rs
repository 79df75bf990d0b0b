// File: src/controller.rs
// Purpose: Per-field validate-on-demand over the shared form state

use rusty_signup_validation::{
    sanitize_phone, PasswordPolicy, ValidationResult, DEFAULT_NAME_MIN_LENGTH,
    DEFAULT_PHONE_DIGITS,
};

use crate::field::{FieldName, FieldSpec, FormState};

/// Parameters the validators need
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRules {
    pub name_min_length: usize,
    pub phone_digits: usize,
    pub password: PasswordPolicy,
}

impl Default for FieldRules {
    fn default() -> Self {
        Self {
            name_min_length: DEFAULT_NAME_MIN_LENGTH,
            phone_digits: DEFAULT_PHONE_DIGITS,
            password: PasswordPolicy::standard(),
        }
    }
}

/// Controller for one named field
///
/// Writes only its own field. A confirmation field reads the password's
/// current value each time it validates.
pub struct FieldController<'a> {
    form: &'a mut FormState,
    rules: &'a FieldRules,
    name: FieldName,
}

impl<'a> FieldController<'a> {
    pub fn new(form: &'a mut FormState, rules: &'a FieldRules, name: FieldName) -> Self {
        Self { form, rules, name }
    }

    pub fn name(&self) -> FieldName {
        self.name
    }

    pub fn spec(&self) -> &FieldSpec {
        self.form.field(self.name)
    }

    pub fn set_value(&mut self, raw: impl Into<String>) {
        self.form.field_mut(self.name).raw_value = raw.into();
    }

    /// Store a keystroke's value
    ///
    /// Fields that sanitize on input store the cleaned value and return it
    /// when it differs from what was typed.
    pub fn sanitize_input(&mut self, raw: &str) -> Option<String> {
        if !self.spec().validator.sanitizes_input() {
            self.set_value(raw);
            return None;
        }

        let sanitized = sanitize_phone(raw);
        let changed = sanitized != raw;
        self.set_value(sanitized.clone());
        changed.then_some(sanitized)
    }

    /// Run the validator without touching the display state
    pub fn validate(&self) -> ValidationResult {
        let spec = self.spec();
        spec.validator.run(&spec.raw_value, &*self.form, self.rules)
    }

    /// Validate the current value and restyle the field
    pub fn validate_now(&mut self) -> bool {
        let result = self.validate();
        tracing::debug!(
            field = %self.name,
            valid = result.valid,
            reason = result.reason.as_ref().map(|r| r.code()),
            "validated field"
        );
        self.form.field_mut(self.name).apply(&result);
        result.valid
    }

    pub fn reset(&mut self) {
        self.form.field_mut(self.name).reset();
    }
}
