// File: src/orchestrator.rs
// Purpose: Owns the form state, dispatches UI messages and runs the submit pass

use serde::Serialize;

use crate::banner::{BannerKind, BannerPolicy, TimerInstruction};
use crate::clock::{Clock, SystemClock};
use crate::config::SignupConfig;
use crate::controller::{FieldController, FieldRules};
use crate::error::FormError;
use crate::field::{DisplayState, FieldName, FormState};
use crate::message::Message;
use crate::render::Render;
use crate::submit::{LogSubmitter, Registration, Submitter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionOutcome {
    Accepted,
    Rejected,
}

/// Side effects of showing a banner that the host has to carry out
struct BannerEffects {
    timer: TimerInstruction,
    scroll_to_top: bool,
}

/// The registration form
///
/// All state lives here and is only changed through [`dispatch`](Self::dispatch)
/// or the operations it is built from.
pub struct FormOrchestrator {
    config: SignupConfig,
    rules: FieldRules,
    state: FormState,
    clock: Box<dyn Clock>,
    submitter: Box<dyn Submitter>,
}

impl FormOrchestrator {
    pub fn new(config: SignupConfig) -> Self {
        let rules = config.rules();
        Self {
            config,
            rules,
            state: FormState::new(),
            clock: Box::new(SystemClock),
            submitter: Box::new(LogSubmitter),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_submitter(mut self, submitter: impl Submitter + 'static) -> Self {
        self.submitter = Box::new(submitter);
        self
    }

    pub fn config(&self) -> &SignupConfig {
        &self.config
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Controller for one field of this form
    pub fn controller(&mut self, name: FieldName) -> FieldController<'_> {
        FieldController::new(&mut self.state, &self.rules, name)
    }

    /// Handle one user interaction and describe the resulting screen
    pub fn dispatch(&mut self, message: Message) -> Render {
        tracing::debug!(message = message.kind(), "dispatching");

        match message {
            Message::FieldInput { name, value } => {
                let replaced = self.handle_input(name, &value);
                let mut render = Render::snapshot(&self.state);
                if let Some(view) = render.field_mut(name) {
                    view.replace_value = replaced;
                }
                render
            }
            Message::FieldBlurred { name } => {
                self.handle_blur(name);
                Render::snapshot(&self.state)
            }
            Message::SubmitRequested => {
                let (outcome, effects) = self.submit();
                let mut render = Render::snapshot(&self.state);
                render.prevent_default = true;
                render.outcome = Some(outcome);
                render.timer = effects.timer;
                render.scroll_to_top = effects.scroll_to_top;
                render
            }
            Message::ToggleRequested { name } => {
                if let Err(err) = self.toggle_password_visibility(name) {
                    tracing::warn!(error = %err, "ignoring toggle request");
                }
                Render::snapshot(&self.state)
            }
            Message::BannerExpired { generation } => {
                if !self.state.banner.expire(generation) {
                    tracing::debug!(generation, "stale banner timer");
                }
                Render::snapshot(&self.state)
            }
        }
    }

    /// Store a keystroke; sanitizing fields validate immediately
    ///
    /// Returns the sanitized value when it differs from the typed one.
    pub fn handle_input(&mut self, name: FieldName, value: &str) -> Option<String> {
        let mut controller = self.controller(name);
        let replaced = controller.sanitize_input(value);
        if controller.spec().validator.sanitizes_input() {
            controller.validate_now();
        }
        replaced
    }

    /// Validate a field the user just left, plus fields that depend on it
    pub fn handle_blur(&mut self, name: FieldName) -> bool {
        let valid = self.controller(name).validate_now();

        if self.config.behavior.revalidate_confirm_on_password_change {
            for dependent in self.dependents_of(name) {
                // only fields the user has already seen styled
                if self.state.field(dependent).display_state != DisplayState::Neutral {
                    self.controller(dependent).validate_now();
                }
            }
        }

        valid
    }

    /// Validate every field and publish the outcome in the banner
    pub fn handle_submit(&mut self) -> SubmissionOutcome {
        self.submit().0
    }

    /// Show a banner under the configured policy
    pub fn show_banner(&mut self, kind: BannerKind, message: impl Into<String>) -> TimerInstruction {
        self.show_banner_with_effects(kind, message.into()).timer
    }

    /// Flip Show/Hide for a password-type field; returns whether it is now masked
    pub fn toggle_password_visibility(&mut self, name: FieldName) -> Result<bool, FormError> {
        let toggle = self
            .state
            .toggle_mut(name)
            .ok_or(FormError::NotPasswordField(name))?;
        Ok(toggle.toggle())
    }

    /// Hide the banner if its time is up; for hosts that poll instead of using timers
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now();
        self.state.banner.tick(now)
    }

    fn submit(&mut self) -> (SubmissionOutcome, BannerEffects) {
        let cancelled = self.state.banner.clear();

        for name in FieldName::ORDER {
            self.controller(name).reset();
        }

        // every field runs so each failure gets styled
        let mut all_valid = true;
        for name in FieldName::ORDER {
            let valid = self.controller(name).validate_now();
            all_valid &= valid;
        }

        let accepted = if all_valid { self.registration() } else { None };

        let (outcome, mut effects) = match accepted {
            Some(registration) => {
                self.submitter.submit(&registration);
                let message = self.config.messages.success.clone();
                (
                    SubmissionOutcome::Accepted,
                    self.show_banner_with_effects(BannerKind::Success, message),
                )
            }
            None => {
                let message = self.config.messages.error.clone();
                (
                    SubmissionOutcome::Rejected,
                    self.show_banner_with_effects(BannerKind::Error, message),
                )
            }
        };

        if effects.timer == TimerInstruction::None {
            effects.timer = cancelled;
        }

        tracing::debug!(?outcome, "form submitted");
        (outcome, effects)
    }

    fn show_banner_with_effects(&mut self, kind: BannerKind, message: String) -> BannerEffects {
        let policy = self.config.banner.policy();
        let now = self.clock.now();
        let timer = self.state.banner.show(kind, message, now, policy);

        BannerEffects {
            timer,
            scroll_to_top: policy == BannerPolicy::UntilNextSubmit,
        }
    }

    fn registration(&mut self) -> Option<Registration> {
        let mut normalized = |name| self.controller(name).validate().into_result().ok();

        Some(Registration {
            full_name: normalized(FieldName::FullName)?,
            email: normalized(FieldName::Email)?,
            phone: normalized(FieldName::Phone)?,
            password: normalized(FieldName::Password)?,
        })
    }

    fn dependents_of(&self, name: FieldName) -> Vec<FieldName> {
        self.state
            .fields()
            .iter()
            .filter(|spec| spec.validator.depends_on() == Some(name))
            .map(|spec| spec.name)
            .collect()
    }
}

impl Default for FormOrchestrator {
    fn default() -> Self {
        Self::new(SignupConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::{Duration, TimeZone, Utc};
    use rusty_signup_validation::FieldError;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn clock() -> ManualClock {
        ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap())
    }

    fn input(form: &mut FormOrchestrator, name: FieldName, value: &str) -> Render {
        form.dispatch(Message::FieldInput {
            name,
            value: value.to_string(),
        })
    }

    fn fill_valid(form: &mut FormOrchestrator) {
        input(form, FieldName::FullName, "Al");
        input(form, FieldName::Email, "al@x.co");
        input(form, FieldName::Phone, "5551234567");
        input(form, FieldName::Password, "Passw0rd");
        input(form, FieldName::ConfirmPassword, "Passw0rd");
    }

    #[test]
    fn test_input_does_not_validate_text_fields() {
        let mut form = FormOrchestrator::default();
        let render = input(&mut form, FieldName::Email, "nope");

        assert_eq!(render.field(FieldName::Email).unwrap().state, DisplayState::Neutral);
        assert!(render.field(FieldName::Email).unwrap().replace_value.is_none());
    }

    #[test]
    fn test_phone_input_sanitizes_and_validates() {
        let mut form = FormOrchestrator::default();

        let render = input(&mut form, FieldName::Phone, "555-123");
        let phone = render.field(FieldName::Phone).unwrap();
        assert_eq!(phone.replace_value.as_deref(), Some("555123"));
        assert_eq!(phone.state, DisplayState::Error);

        let render = input(&mut form, FieldName::Phone, "5551234567");
        let phone = render.field(FieldName::Phone).unwrap();
        assert!(phone.replace_value.is_none());
        assert_eq!(phone.state, DisplayState::Success);
    }

    #[test]
    fn test_blur_validates_only_that_field() {
        let mut form = FormOrchestrator::default();
        let render = form.dispatch(Message::FieldBlurred {
            name: FieldName::FullName,
        });

        assert_eq!(render.field(FieldName::FullName).unwrap().state, DisplayState::Error);
        assert_eq!(render.field(FieldName::Email).unwrap().state, DisplayState::Neutral);
    }

    #[test]
    fn test_password_blur_revalidates_styled_confirmation() {
        let mut form = FormOrchestrator::default();
        input(&mut form, FieldName::Password, "Passw0rd");
        input(&mut form, FieldName::ConfirmPassword, "Passw0rd");
        form.handle_blur(FieldName::ConfirmPassword);
        assert_eq!(
            form.state().field(FieldName::ConfirmPassword).display_state,
            DisplayState::Success
        );

        input(&mut form, FieldName::Password, "Passw0rd2");
        form.handle_blur(FieldName::Password);
        assert_eq!(
            form.state().field(FieldName::ConfirmPassword).error,
            Some(FieldError::Mismatch)
        );
    }

    #[test]
    fn test_password_blur_leaves_untouched_confirmation_neutral() {
        let mut form = FormOrchestrator::default();
        input(&mut form, FieldName::Password, "Passw0rd");
        form.handle_blur(FieldName::Password);

        assert_eq!(
            form.state().field(FieldName::ConfirmPassword).display_state,
            DisplayState::Neutral
        );
    }

    #[test]
    fn test_stale_confirmation_when_revalidation_disabled() {
        let mut config = SignupConfig::default();
        config.behavior.revalidate_confirm_on_password_change = false;
        let mut form = FormOrchestrator::new(config);

        input(&mut form, FieldName::Password, "Passw0rd");
        input(&mut form, FieldName::ConfirmPassword, "Passw0rd");
        form.handle_blur(FieldName::ConfirmPassword);
        input(&mut form, FieldName::Password, "Passw0rd2");
        form.handle_blur(FieldName::Password);

        assert_eq!(
            form.state().field(FieldName::ConfirmPassword).display_state,
            DisplayState::Success
        );
    }

    #[test]
    fn test_submit_accepts_and_hands_off() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut form = FormOrchestrator::default()
            .with_clock(clock())
            .with_submitter(move |r: &Registration| sink.borrow_mut().push(r.clone()));
        fill_valid(&mut form);

        let render = form.dispatch(Message::SubmitRequested);

        assert!(render.prevent_default);
        assert_eq!(render.outcome, Some(SubmissionOutcome::Accepted));
        assert_eq!(render.banner.kind, BannerKind::Success);
        assert_eq!(render.banner.message, "Registration successful!");
        assert_eq!(
            render.timer,
            TimerInstruction::Schedule {
                generation: 2,
                delay_ms: 3000
            }
        );

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].phone, "5551234567");
        assert_eq!(seen[0].password, "Passw0rd");
    }

    #[test]
    fn test_submit_rejects_without_hand_off() {
        let calls = Rc::new(RefCell::new(0));
        let counter = calls.clone();
        let mut form = FormOrchestrator::default()
            .with_submitter(move |_: &Registration| *counter.borrow_mut() += 1);
        fill_valid(&mut form);
        input(&mut form, FieldName::ConfirmPassword, "Passw0rd!");

        assert_eq!(form.handle_submit(), SubmissionOutcome::Rejected);
        assert_eq!(*calls.borrow(), 0);
        assert_eq!(form.state().banner.kind, BannerKind::Error);
        assert_eq!(
            form.state().field(FieldName::FullName).display_state,
            DisplayState::Success
        );
        assert_eq!(
            form.state().field(FieldName::ConfirmPassword).error,
            Some(FieldError::Mismatch)
        );
    }

    #[test]
    fn test_repeated_submits_supersede_timer() {
        let mut form = FormOrchestrator::default().with_clock(clock());

        let first = form.dispatch(Message::SubmitRequested);
        let second = form.dispatch(Message::SubmitRequested);

        let TimerInstruction::Schedule {
            generation: first_gen,
            ..
        } = first.timer
        else {
            panic!("expected a scheduled timer, got {:?}", first.timer);
        };

        // the first timer firing late must not hide the second banner
        let render = form.dispatch(Message::BannerExpired {
            generation: first_gen,
        });
        assert!(render.banner.visible);

        let TimerInstruction::Schedule { generation, .. } = second.timer else {
            panic!("expected a scheduled timer, got {:?}", second.timer);
        };
        let render = form.dispatch(Message::BannerExpired { generation });
        assert!(!render.banner.visible);
    }

    #[test]
    fn test_until_next_submit_policy() {
        let mut config = SignupConfig::default();
        config.banner.policy = crate::config::BannerPolicyChoice::UntilNextSubmit;
        let clock = clock();
        let mut form = FormOrchestrator::new(config).with_clock(clock.clone());

        let render = form.dispatch(Message::SubmitRequested);
        assert!(render.scroll_to_top);
        assert_eq!(render.timer, TimerInstruction::None);

        clock.advance(Duration::minutes(5));
        assert!(!form.tick());
        assert!(form.state().banner.is_visible());
    }

    #[test]
    fn test_tick_hides_banner_after_delay() {
        let clock = clock();
        let mut form = FormOrchestrator::default().with_clock(clock.clone());
        form.handle_submit();

        clock.advance(Duration::milliseconds(2999));
        assert!(!form.tick());
        clock.advance(Duration::milliseconds(1));
        assert!(form.tick());
        assert!(!form.state().banner.is_visible());
    }

    #[test]
    fn test_toggle_requests() {
        let mut form = FormOrchestrator::default();

        let render = form.dispatch(Message::ToggleRequested {
            name: FieldName::ConfirmPassword,
        });
        assert_eq!(render.toggle(FieldName::ConfirmPassword).unwrap().label, "Hide");
        // toggles are independent
        assert_eq!(render.toggle(FieldName::Password).unwrap().label, "Show");

        assert_eq!(
            form.toggle_password_visibility(FieldName::Email),
            Err(FormError::NotPasswordField(FieldName::Email))
        );
        let render = form.dispatch(Message::ToggleRequested {
            name: FieldName::Email,
        });
        assert_eq!(render.toggles.len(), 2);
    }
}
