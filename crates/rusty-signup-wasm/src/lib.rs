//! Rusty Signup WASM
//!
//! Binds the registration form to the page: DOM events become [`Message`]s,
//! the orchestrator's [`Render`] is written back to the elements, and banner
//! timers run on `window.setTimeout`.
//!
//! The individual validators are exported as well for pages that only need
//! client-side checks.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::str::FromStr;

use rusty_signup::validation::{self, PasswordPolicy, DEFAULT_PHONE_DIGITS};
use rusty_signup::{
    FieldName, FormOrchestrator, Message, Registration, Render, SignupConfig, Submitter,
    TimerInstruction,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlInputElement, Window};

const DEFAULT_FORM_ID: &str = "registration-form";
const DEFAULT_BANNER_ID: &str = "message-box";

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Writes accepted registrations to the browser console
struct ConsoleSubmitter;

impl Submitter for ConsoleSubmitter {
    fn submit(&mut self, registration: &Registration) {
        let line = format!(
            "registration accepted: {} <{}> {}",
            registration.full_name, registration.email, registration.phone
        );
        web_sys::console::log_1(&JsValue::from_str(&line));
    }
}

/// Pending banner timer: the `setTimeout` handle and the callback it will run
type PendingTimer = (i32, Closure<dyn FnMut()>);

struct Page {
    form: RefCell<FormOrchestrator>,
    window: Window,
    document: Document,
    form_id: String,
    banner_id: String,
    timer: RefCell<Option<PendingTimer>>,
}

impl Page {
    fn element(&self, id: &str) -> Result<Element, JsValue> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| js_error(format!("missing element #{}", id)))
    }

    fn input(&self, name: FieldName) -> Result<HtmlInputElement, JsValue> {
        self.element(name.dom_id())?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| js_error(format!("#{} is not an input", name.dom_id())))
    }

    fn dispatch(self: &Rc<Self>, message: Message) -> Result<Render, JsValue> {
        let render = self.form.borrow_mut().dispatch(message);
        self.apply(&render)?;
        Ok(render)
    }

    fn apply(self: &Rc<Self>, render: &Render) -> Result<(), JsValue> {
        for view in &render.fields {
            let input = self.input(view.name)?;
            let classes = input.class_list();
            classes.remove_2("error", "success")?;
            if !view.class.is_empty() {
                classes.add_1(view.class)?;
            }
            if let Some(value) = &view.replace_value {
                input.set_value(value);
            }

            // inline reason is optional markup: <span id="{field}-error">
            let error_id = format!("{}-error", view.id);
            if let Some(slot) = self.document.get_element_by_id(&error_id) {
                slot.set_text_content(view.message.as_deref());
            }
        }

        for view in &render.toggles {
            self.input(view.field)?.set_type(view.input_type);
            self.element(view.toggle_id)?
                .set_text_content(Some(view.label));
        }

        let banner = self.element(&self.banner_id)?;
        banner.set_class_name(&render.banner.class);
        banner.set_text_content(Some(&render.banner.message));
        banner.set_attribute("style", if render.banner.visible { "" } else { "display: none" })?;

        if render.scroll_to_top {
            self.window.scroll_to_with_x_and_y(0.0, 0.0);
        }

        self.run_timer(render.timer)
    }

    fn run_timer(self: &Rc<Self>, instruction: TimerInstruction) -> Result<(), JsValue> {
        match instruction {
            TimerInstruction::None => Ok(()),
            TimerInstruction::Cancel => {
                self.cancel_timer();
                Ok(())
            }
            TimerInstruction::Schedule {
                generation,
                delay_ms,
            } => {
                self.cancel_timer();

                let page = Rc::downgrade(self);
                let callback = Closure::<dyn FnMut()>::new(move || {
                    if let Some(page) = page.upgrade() {
                        if let Err(err) = page.dispatch(Message::BannerExpired { generation }) {
                            web_sys::console::error_1(&err);
                        }
                    }
                });
                let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
                let handle = self
                    .window
                    .set_timeout_with_callback_and_timeout_and_arguments_0(
                        callback.as_ref().unchecked_ref(),
                        delay,
                    )?;
                *self.timer.borrow_mut() = Some((handle, callback));
                Ok(())
            }
        }
    }

    fn cancel_timer(&self) {
        if let Some((handle, _callback)) = self.timer.borrow_mut().take() {
            self.window.clear_timeout_with_handle(handle);
        }
    }
}

/// A bound DOM listener, kept so it can be removed again
struct Listener {
    target: Element,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn remove(self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref())
        {
            web_sys::console::error_1(&err);
        }
    }
}

fn listen(
    target: &Element,
    event: &'static str,
    page: &Rc<Page>,
    to_message: impl Fn(&Event) -> Option<Message> + 'static,
) -> Result<Listener, JsValue> {
    let page = Rc::downgrade(page);
    let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(page) = Weak::upgrade(&page) else {
            return;
        };
        let Some(message) = to_message(&event) else {
            return;
        };
        match page.dispatch(message) {
            Ok(render) if render.prevent_default => event.prevent_default(),
            Ok(_) => {}
            Err(err) => web_sys::console::error_1(&err),
        }
    });
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    Ok(Listener {
        target: target.clone(),
        event,
        callback,
    })
}

/// The registration form bound to the current document
#[wasm_bindgen]
pub struct SignupForm {
    page: Rc<Page>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl SignupForm {
    /// Create the form from an optional config object
    ///
    /// The object has the same shape as `signup.toml`:
    ///
    /// ```javascript
    /// const form = new SignupForm({ banner: { policy: "until_next_submit" } });
    /// form.attach();
    /// ```
    #[wasm_bindgen(constructor)]
    pub fn new(
        config: JsValue,
        form_id: Option<String>,
        banner_id: Option<String>,
    ) -> Result<SignupForm, JsValue> {
        let config: SignupConfig = if config.is_undefined() || config.is_null() {
            SignupConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| js_error(format!("Failed to parse config: {}", e)))?
        };
        config.validate().map_err(|e| js_error(format!("{:#}", e)))?;

        let window = web_sys::window().ok_or_else(|| js_error("no window"))?;
        let document = window.document().ok_or_else(|| js_error("no document"))?;

        let page = Page {
            form: RefCell::new(FormOrchestrator::new(config).with_submitter(ConsoleSubmitter)),
            window,
            document,
            form_id: form_id.unwrap_or_else(|| DEFAULT_FORM_ID.to_string()),
            banner_id: banner_id.unwrap_or_else(|| DEFAULT_BANNER_ID.to_string()),
            timer: RefCell::new(None),
        };

        Ok(SignupForm {
            page: Rc::new(page),
            listeners: Vec::new(),
        })
    }

    /// Bind blur/input/submit/click listeners and paint the initial state
    pub fn attach(&mut self) -> Result<(), JsValue> {
        self.detach();
        let page = &self.page;

        for name in FieldName::ORDER {
            let input = page.input(name)?;

            self.listeners.push(listen(&input, "blur", page, move |_| {
                Some(Message::FieldBlurred { name })
            })?);

            let source = input.clone();
            self.listeners.push(listen(&input, "input", page, move |_| {
                Some(Message::FieldInput {
                    name,
                    value: source.value(),
                })
            })?);

            if let Some(toggle_id) = name.toggle_id() {
                let toggle = page.element(toggle_id)?;
                self.listeners.push(listen(&toggle, "click", page, move |_| {
                    Some(Message::ToggleRequested { name })
                })?);
            }
        }

        let form = page.element(&page.form_id)?;
        self.listeners.push(listen(&form, "submit", page, |_| {
            Some(Message::SubmitRequested)
        })?);

        let render = Render::snapshot(page.form.borrow().state());
        page.apply(&render)
    }

    /// Remove every listener and pending timer
    pub fn detach(&mut self) {
        for listener in self.listeners.drain(..) {
            listener.remove();
        }
        self.page.cancel_timer();
    }

    /// Dispatch a message object, e.g. `{ type: "SubmitRequested" }`, and return the render
    pub fn dispatch(&self, message: JsValue) -> Result<JsValue, JsValue> {
        let message: Message = serde_wasm_bindgen::from_value(message)
            .map_err(|e| js_error(format!("Failed to parse message: {}", e)))?;
        let render = self.page.dispatch(message)?;
        Ok(serde_wasm_bindgen::to_value(&render)?)
    }

    /// Validate one field by element id without restyling it
    pub fn validate(&self, field_id: &str) -> Result<JsValue, JsValue> {
        let name = FieldName::from_str(field_id).map_err(js_error)?;
        let result = self.page.form.borrow_mut().controller(name).validate();
        Ok(serde_wasm_bindgen::to_value(&result)?)
    }
}

impl Drop for SignupForm {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Quick email validation
#[wasm_bindgen(js_name = isValidEmail)]
pub fn is_valid_email_js(email: &str) -> bool {
    validation::is_valid_email(email.trim())
}

/// Quick phone validation; returns the failure message, if any
#[wasm_bindgen(js_name = validatePhone)]
pub fn validate_phone_js(phone: &str) -> Option<String> {
    validation::validate_phone(phone, DEFAULT_PHONE_DIGITS)
        .reason
        .map(|reason| reason.to_string())
}

/// Strip everything but digits
#[wasm_bindgen(js_name = sanitizePhone)]
pub fn sanitize_phone_js(phone: &str) -> String {
    validation::sanitize_phone(phone)
}

/// Quick password validation against the standard policy
#[wasm_bindgen(js_name = validatePassword)]
pub fn validate_password_js(password: &str) -> Option<String> {
    validation::validate_password(password, &PasswordPolicy::standard())
        .reason
        .map(|reason| reason.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusty_signup::config::CharsetChoice;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const PAGE: &str = r#"
        <form id="registration-form">
            <input id="full-name">
            <input id="email">
            <input id="phone">
            <input id="password" type="password"><button id="toggle-password">Show</button>
            <input id="confirm-password" type="password"><button id="toggle-confirm-password">Show</button>
        </form>
        <div id="message-box" class="message"></div>
    "#;

    fn mounted_form() -> SignupForm {
        let document = web_sys::window().unwrap().document().unwrap();
        document.body().unwrap().set_inner_html(PAGE);

        let mut form = SignupForm::new(JsValue::UNDEFINED, None, None).unwrap();
        form.attach().unwrap();
        form
    }

    fn pending_timer(form: &SignupForm) -> Option<i32> {
        form.page.timer.borrow().as_ref().map(|(handle, _)| *handle)
    }

    #[wasm_bindgen_test]
    fn test_resubmit_replaces_pending_timer() {
        let form = mounted_form();
        assert_eq!(pending_timer(&form), None);

        let first = form.page.dispatch(Message::SubmitRequested).unwrap();
        let first_handle = pending_timer(&form).unwrap();
        let TimerInstruction::Schedule {
            generation: stale, ..
        } = first.timer
        else {
            panic!("expected a scheduled timer, got {:?}", first.timer);
        };

        form.page.dispatch(Message::SubmitRequested).unwrap();
        let second_handle = pending_timer(&form).unwrap();
        assert_ne!(first_handle, second_handle);

        // the first timer's expiry arriving late leaves the new banner up
        form.page
            .dispatch(Message::BannerExpired { generation: stale })
            .unwrap();
        let banner = form.page.element(DEFAULT_BANNER_ID).unwrap();
        assert_eq!(banner.class_name(), "message error");
        assert_eq!(banner.get_attribute("style").as_deref(), Some(""));
        assert_eq!(pending_timer(&form), Some(second_handle));
    }

    #[wasm_bindgen_test]
    fn test_detach_drops_pending_timer() {
        let mut form = mounted_form();
        form.page.dispatch(Message::SubmitRequested).unwrap();
        assert!(pending_timer(&form).is_some());

        form.detach();
        assert_eq!(pending_timer(&form), None);
        assert!(form.listeners.is_empty());
    }

    #[wasm_bindgen_test]
    fn test_constructor_rejects_unsatisfiable_password_rules() {
        let mut config = SignupConfig::default();
        config.password.charset = CharsetChoice::Alphanumeric;
        config.password.require_symbol = true;
        let config = serde_wasm_bindgen::to_value(&config).unwrap();

        let err = SignupForm::new(config, None, None).err().unwrap();
        assert!(err.as_string().unwrap().contains("Invalid [password] section"));
    }

    #[wasm_bindgen_test]
    fn test_email_validation() {
        assert!(is_valid_email_js("a.b+c@sub.domain.io"));
        assert!(!is_valid_email_js("a@b"));
    }

    #[wasm_bindgen_test]
    fn test_phone_validation() {
        assert_eq!(sanitize_phone_js("123-456-7890"), "1234567890");
        assert!(validate_phone_js("123-456-7890").is_none());
        assert_eq!(
            validate_phone_js("12345").as_deref(),
            Some("Phone number must be exactly 10 digits.")
        );
    }

    #[wasm_bindgen_test]
    fn test_password_validation() {
        assert!(validate_password_js("Passw0rd").is_none());
        assert!(validate_password_js("password").is_some());
        assert!(validate_password_js("PASS1234").is_some());
    }
}
