//! The validator state machine shared by every rule.

use crate::core::ValidatorBuilder;
use crate::core::display::{ErrorTarget, transfer};
use crate::core::options::{ValidatorOption, ValidatorOptions};
use crate::error::{ConfigError, Result};
use crate::field::{FieldAdapter, find_error_container};
use crate::messages::{DefaultMessages, MessageKey, MessageProvider};
use crate::notify::{Subscription, ValidateObserver};
use crate::rules::{Evaluate, EvaluationContext, Rule};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Outcome latched by the most recent validation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationState {
    /// The last pass found no error.
    Valid,
    /// The last pass reported an error.
    Invalid,
}

/// Binds one field to one rule, its triggers and its error display.
///
/// A validation pass runs the required check first, then the rule. The
/// resulting message (or its absence) is shown on the active error target
/// when error display is on, and reported to the observer. Passes are
/// synchronous and only ever look at the text at the moment of the call.
///
/// By default a validator validates on focus loss, shows errors on the
/// field, and is not required.
///
/// # Examples
///
/// ```rust
/// use field_validator::prelude::*;
/// use std::rc::Rc;
///
/// let field = Rc::new(MemoryField::new("email"));
/// let validator = Validator::new(field.clone(), Rule::email());
///
/// field.set_text("not an email");
/// assert!(!validator.validate());
/// assert_eq!(field.error().as_deref(), Some("Email address is invalid"));
///
/// field.set_text("someone@example.com");
/// assert!(validator.validate());
/// assert_eq!(field.error(), None);
/// ```
pub struct Validator {
    inner: Rc<ValidatorInner>,
}

struct ValidatorInner {
    field: Rc<dyn FieldAdapter>,
    messages: Rc<dyn MessageProvider>,
    state: RefCell<ValidatorState>,
}

struct ValidatorState {
    rule: Rule,
    observer: Option<ValidateObserver>,
    required: bool,
    required_message: String,
    show_errors: bool,
    target: ErrorTarget,
    keystroke: Option<Subscription>,
    focus_loss: Option<Subscription>,
    last: Option<ValidationState>,
}

impl Validator {
    /// Bind `rule` to `field` using the built-in English messages.
    pub fn new(field: Rc<dyn FieldAdapter>, rule: impl Into<Rule>) -> Self {
        Self::with_messages(field, rule, Rc::new(DefaultMessages))
    }

    /// Bind `rule` to `field`, looking default messages up in `messages`.
    pub fn with_messages(
        field: Rc<dyn FieldAdapter>,
        rule: impl Into<Rule>,
        messages: Rc<dyn MessageProvider>,
    ) -> Self {
        let required_message = messages.lookup(MessageKey::RequiredField, &[]);
        let validator = Self {
            inner: Rc::new(ValidatorInner {
                field,
                messages,
                state: RefCell::new(ValidatorState {
                    rule: rule.into(),
                    observer: None,
                    required: false,
                    required_message,
                    show_errors: true,
                    target: ErrorTarget::Field,
                    keystroke: None,
                    focus_loss: None,
                    last: None,
                }),
            }),
        };
        validator.set_validate_on_focus_loss(true);
        validator
    }

    /// Start a builder for a validator on `field`.
    pub fn builder(field: Rc<dyn FieldAdapter>, rule: impl Into<Rule>) -> ValidatorBuilder {
        ValidatorBuilder::new(field, rule)
    }

    /// Another handle to the same validator.
    pub(crate) fn handle(&self) -> Validator {
        Validator {
            inner: Rc::clone(&self.inner),
        }
    }

    /// Validate the field's current text.
    pub fn validate(&self) -> bool {
        let text = self.inner.field.text();
        self.validate_text(&text)
    }

    /// Validate `text` as if it were the field's content.
    ///
    /// The required check always runs before the rule. Empty or whitespace-only
    /// text fails a required validator with the required message, whatever
    /// the rule would say.
    pub fn validate_text(&self, text: &str) -> bool {
        let (error, show_errors, target, observer, rule_kind) = {
            let state = self.inner.state.borrow();
            let error = if state.required && text.trim().is_empty() {
                Some(state.required_message.clone())
            } else {
                let ctx = EvaluationContext::new(self.inner.messages.as_ref(), state.required);
                state.rule.evaluate(text, &ctx)
            };
            (
                error,
                state.show_errors,
                state.target.clone(),
                state.observer.clone(),
                state.rule.kind(),
            )
        };

        if show_errors {
            target.show(self.inner.field.as_ref(), error.as_deref());
        }

        let outcome = if error.is_some() {
            ValidationState::Invalid
        } else {
            ValidationState::Valid
        };
        self.inner.state.borrow_mut().last = Some(outcome);

        // No borrow is held here: observers may call back into this validator.
        match error {
            Some(message) => {
                tracing::debug!(
                    field = %self.inner.field.name(),
                    rule = rule_kind,
                    error = %message,
                    "validation failed"
                );
                if let Some(observer) = observer {
                    observer.notify_error(&message);
                }
                false
            }
            None => {
                tracing::debug!(
                    field = %self.inner.field.name(),
                    rule = rule_kind,
                    "validation passed"
                );
                if let Some(observer) = observer {
                    observer.notify_success();
                }
                true
            }
        }
    }

    fn on_text_changed(&self, text: &str) {
        tracing::trace!(field = %self.inner.field.name(), "text changed");
        if !text.is_empty() || self.is_required() {
            self.validate();
        } else {
            self.set_error(None);
        }
    }

    fn on_focus_lost(&self) {
        tracing::trace!(field = %self.inner.field.name(), "focus lost");
        self.validate();
    }

    /// Mark the field required.
    ///
    /// `message` replaces the provider's "required field" text.
    pub fn set_required(&self, required: bool, message: Option<&str>) {
        let message = match message {
            Some(message) => message.to_string(),
            None => self.inner.messages.lookup(MessageKey::RequiredField, &[]),
        };
        let mut state = self.inner.state.borrow_mut();
        state.required = required;
        state.required_message = message;
    }

    /// Choose which events trigger validation.
    pub fn set_trigger(&self, on_keystroke: bool, on_focus_loss: bool) {
        self.set_validate_on_keystroke(on_keystroke);
        self.set_validate_on_focus_loss(on_focus_loss);
    }

    /// Validate after every edit.
    ///
    /// Non-empty text is validated. Empty text is validated only when the
    /// field is required; otherwise the error is cleared without running the
    /// rule. Disabling is idempotent.
    pub fn set_validate_on_keystroke(&self, enabled: bool) {
        let registered = self.inner.state.borrow().keystroke.is_some();
        if enabled && !registered {
            let weak = Rc::downgrade(&self.inner);
            let id = self
                .inner
                .field
                .subscribe_text_changed(Rc::new(move |text: &str| {
                    if let Some(inner) = weak.upgrade() {
                        Validator { inner }.on_text_changed(text);
                    }
                }));
            let subscription = Subscription::new(&self.inner.field, id);
            self.inner.state.borrow_mut().keystroke = Some(subscription);
        } else if !enabled {
            // Dropped outside the borrow; dropping unsubscribes.
            let previous = self.inner.state.borrow_mut().keystroke.take();
            drop(previous);
        }
    }

    /// Validate whenever the field loses focus. Disabling is idempotent.
    pub fn set_validate_on_focus_loss(&self, enabled: bool) {
        let registered = self.inner.state.borrow().focus_loss.is_some();
        if enabled && !registered {
            let weak = Rc::downgrade(&self.inner);
            let id = self.inner.field.subscribe_focus_lost(Rc::new(move || {
                if let Some(inner) = weak.upgrade() {
                    Validator { inner }.on_focus_lost();
                }
            }));
            let subscription = Subscription::new(&self.inner.field, id);
            self.inner.state.borrow_mut().focus_loss = Some(subscription);
        } else if !enabled {
            let previous = self.inner.state.borrow_mut().focus_loss.take();
            drop(previous);
        }
    }

    /// Turn error display on or off.
    ///
    /// Turning it off clears the visible error at once. The latched
    /// validation state is left alone and nothing is re-evaluated.
    pub fn set_show_errors(&self, show: bool) {
        let target = {
            let mut state = self.inner.state.borrow_mut();
            state.show_errors = show;
            state.target.clone()
        };
        if !show {
            target.show(self.inner.field.as_ref(), None);
        }
    }

    /// Show errors on the nearest error container instead of the field.
    ///
    /// Enabling walks the field's ancestors for a node that hosts errors and
    /// moves any visible error onto it; disabling moves it back.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoContainerFound` when enabling and no ancestor
    /// hosts errors. The current target is left unchanged.
    pub fn set_container_display(&self, use_container: bool) -> Result<()> {
        let current = self.inner.state.borrow().target.clone();
        let field = self.inner.field.as_ref();

        match (use_container, current) {
            (true, ErrorTarget::Field) => {
                let container = find_error_container(field).ok_or_else(|| {
                    tracing::warn!(field = %field.name(), "no error container among ancestors");
                    ConfigError::no_container(field.name())
                })?;
                transfer(field, container.as_ref());
                self.inner.state.borrow_mut().target = ErrorTarget::Container(container);
                tracing::debug!(field = %field.name(), "error display moved to container");
            }
            (false, ErrorTarget::Container(container)) => {
                transfer(container.as_ref(), field);
                self.inner.state.borrow_mut().target = ErrorTarget::Field;
                tracing::debug!(field = %field.name(), "error display moved to field");
            }
            _ => {}
        }
        Ok(())
    }

    /// Replace the observer told about each validation pass.
    pub fn set_observer(&self, observer: Option<ValidateObserver>) {
        self.inner.state.borrow_mut().observer = observer;
    }

    /// Set one option by its dispatch key.
    ///
    /// # Errors
    ///
    /// Fails only when enabling container display without a container.
    pub fn toggle(&self, option: ValidatorOption, enabled: bool) -> Result<()> {
        match option {
            ValidatorOption::Required => {
                self.set_required(enabled, None);
            }
            ValidatorOption::ValidateOnKeystroke => self.set_validate_on_keystroke(enabled),
            ValidatorOption::ValidateOnFocusLoss => self.set_validate_on_focus_loss(enabled),
            ValidatorOption::ShowErrors => self.set_show_errors(enabled),
            ValidatorOption::UseContainerDisplay => self.set_container_display(enabled)?,
        }
        tracing::debug!(field = %self.inner.field.name(), %option, enabled, "option toggled");
        Ok(())
    }

    /// Apply every setting in `options`.
    ///
    /// # Errors
    ///
    /// Fails when `options` enables container display and the field has no
    /// container; earlier settings have already been applied at that point.
    pub fn apply_options(&self, options: &ValidatorOptions) -> Result<()> {
        self.set_required(options.required, options.required_message.as_deref());
        self.set_trigger(options.validate_on_keystroke, options.validate_on_focus_loss);
        self.set_show_errors(options.show_errors);
        self.set_container_display(options.use_container_display)
    }

    /// Snapshot of the current settings.
    pub fn options(&self) -> ValidatorOptions {
        let state = self.inner.state.borrow();
        ValidatorOptions {
            required: state.required,
            required_message: Some(state.required_message.clone()),
            validate_on_keystroke: state.keystroke.is_some(),
            validate_on_focus_loss: state.focus_loss.is_some(),
            show_errors: state.show_errors,
            use_container_display: state.target.is_container(),
        }
    }

    /// Create a validator for `field` with the same settings, rule,
    /// observer and message provider.
    ///
    /// Subscriptions and the error container are set up fresh for the new
    /// field.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoContainerFound` if container display is on and
    /// the new field has no container.
    pub fn clone_for(&self, field: Rc<dyn FieldAdapter>) -> Result<Validator> {
        let (rule, observer) = {
            let state = self.inner.state.borrow();
            (state.rule.clone(), state.observer.clone())
        };
        let validator = Validator::with_messages(field, rule, Rc::clone(&self.inner.messages));
        validator.apply_options(&self.options())?;
        validator.set_observer(observer);

        tracing::debug!(
            from = %self.inner.field.name(),
            to = %validator.inner.field.name(),
            "validator cloned"
        );
        Ok(validator)
    }

    /// Show `error` on the active target, bypassing the show-errors flag.
    pub fn set_error(&self, error: Option<&str>) {
        let target = self.inner.state.borrow().target.clone();
        target.show(self.inner.field.as_ref(), error);
    }

    /// The error currently shown on the active target.
    pub fn error(&self) -> Option<String> {
        let target = self.inner.state.borrow().target.clone();
        target.current(self.inner.field.as_ref())
    }

    /// The field's current text.
    pub fn text(&self) -> String {
        self.inner.field.text()
    }

    /// The bound field.
    pub fn field(&self) -> &Rc<dyn FieldAdapter> {
        &self.inner.field
    }

    /// The message provider.
    pub fn messages(&self) -> Rc<dyn MessageProvider> {
        Rc::clone(&self.inner.messages)
    }

    /// A copy of the rule.
    pub fn rule(&self) -> Rule {
        self.inner.state.borrow().rule.clone()
    }

    /// Change the rule in place; takes effect on the next pass.
    pub fn update_rule<R>(&self, update: impl FnOnce(&mut Rule) -> R) -> R {
        update(&mut self.inner.state.borrow_mut().rule)
    }

    /// Outcome of the last pass, `None` before the first.
    pub fn state(&self) -> Option<ValidationState> {
        self.inner.state.borrow().last
    }

    /// Whether the field is required.
    pub fn is_required(&self) -> bool {
        self.inner.state.borrow().required
    }

    /// The message shown when a required field is empty.
    pub fn required_message(&self) -> String {
        self.inner.state.borrow().required_message.clone()
    }

    /// Whether edits trigger validation.
    pub fn validates_on_keystroke(&self) -> bool {
        self.inner.state.borrow().keystroke.is_some()
    }

    /// Whether focus loss triggers validation.
    pub fn validates_on_focus_loss(&self) -> bool {
        self.inner.state.borrow().focus_loss.is_some()
    }

    /// Whether errors are displayed.
    pub fn shows_errors(&self) -> bool {
        self.inner.state.borrow().show_errors
    }

    /// Whether errors go to a container instead of the field.
    pub fn uses_container_display(&self) -> bool {
        self.inner.state.borrow().target.is_container()
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("Validator")
            .field("field", &self.inner.field.name())
            .field("rule", &state.rule)
            .field("required", &state.required)
            .field("keystroke", &state.keystroke.is_some())
            .field("focus_loss", &state.focus_loss.is_some())
            .field("show_errors", &state.show_errors)
            .field("container", &state.target.is_container())
            .field("last", &state.last)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{ErrorDisplay, MemoryContainer, MemoryField, MemoryNode};
    use crate::rules::PasswordRule;
    use std::cell::Cell;

    fn email_field() -> (Rc<MemoryField>, Validator) {
        let field = Rc::new(MemoryField::new("email"));
        let validator = Validator::new(field.clone(), Rule::email());
        (field, validator)
    }

    #[test]
    fn test_defaults() {
        let (field, validator) = email_field();
        assert!(!validator.is_required());
        assert!(!validator.validates_on_keystroke());
        assert!(validator.validates_on_focus_loss());
        assert!(validator.shows_errors());
        assert!(!validator.uses_container_display());
        assert_eq!(validator.state(), None);
        assert_eq!(field.focus_subscriber_count(), 1);
        assert_eq!(field.text_subscriber_count(), 0);
    }

    #[test]
    fn test_optional_empty_passes_and_clears() {
        let (field, validator) = email_field();
        field.set_error(Some("stale"));

        assert!(validator.validate());
        assert_eq!(field.error(), None);
        assert_eq!(validator.state(), Some(ValidationState::Valid));
    }

    #[test]
    fn test_required_blank_fails_with_default_message() {
        let (field, validator) = email_field();
        validator.set_required(true, None);
        field.set_text("   ");

        assert!(!validator.validate());
        assert_eq!(field.error().as_deref(), Some("Required field"));
        assert_eq!(validator.state(), Some(ValidationState::Invalid));
    }

    #[test]
    fn test_required_custom_message() {
        let (field, validator) = email_field();
        validator.set_required(true, Some("We need your email"));

        assert!(!validator.validate());
        assert_eq!(field.error().as_deref(), Some("We need your email"));
    }

    #[test]
    fn test_required_check_precedes_rule() {
        let field = Rc::new(MemoryField::new("password"));
        let validator = Validator::new(
            field.clone(),
            PasswordRule::new().require_upper_case(Some("upper")),
        );
        validator.set_required(true, None);

        assert!(!validator.validate_text(""));
        assert_eq!(field.error().as_deref(), Some("Required field"));
    }

    #[test]
    fn test_hidden_errors_still_fail() {
        let (field, validator) = email_field();
        validator.set_show_errors(false);
        field.set_text("nope");

        assert!(!validator.validate());
        assert_eq!(field.error(), None);
    }

    #[test]
    fn test_disabling_show_errors_clears_without_revalidating() {
        let (field, validator) = email_field();
        let passes = Rc::new(Cell::new(0));
        let passes_clone = Rc::clone(&passes);
        validator.set_observer(Some(ValidateObserver::new().on_error(move |_| {
            passes_clone.set(passes_clone.get() + 1);
        })));

        field.set_text("nope");
        assert!(!validator.validate());
        assert_eq!(passes.get(), 1);

        validator.set_show_errors(false);
        assert_eq!(field.error(), None);
        assert_eq!(passes.get(), 1);
        assert_eq!(validator.state(), Some(ValidationState::Invalid));
    }

    #[test]
    fn test_observer_receives_outcomes() {
        let (field, validator) = email_field();
        let log = Rc::new(RefCell::new(Vec::new()));

        let errors = Rc::clone(&log);
        let successes = Rc::clone(&log);
        validator.set_observer(Some(
            ValidateObserver::new()
                .on_error(move |message| errors.borrow_mut().push(format!("error:{message}")))
                .on_success(move || successes.borrow_mut().push("success".to_string())),
        ));

        field.set_text("nope");
        validator.validate();
        field.set_text("ok@example.com");
        validator.validate();

        assert_eq!(
            *log.borrow(),
            vec![
                "error:Email address is invalid".to_string(),
                "success".to_string()
            ]
        );
    }

    #[test]
    fn test_keystroke_trigger() {
        let (field, validator) = email_field();
        validator.set_validate_on_keystroke(true);
        assert_eq!(field.text_subscriber_count(), 1);

        field.type_text("no");
        assert_eq!(field.error().as_deref(), Some("Email address is invalid"));

        // Empty and optional: cleared without running the rule.
        field.type_text("");
        assert_eq!(field.error(), None);
        assert_eq!(validator.state(), Some(ValidationState::Invalid));
    }

    #[test]
    fn test_keystroke_empty_required_validates() {
        let (field, validator) = email_field();
        validator.set_validate_on_keystroke(true);
        validator.set_required(true, None);

        field.type_text("");
        assert_eq!(field.error().as_deref(), Some("Required field"));
    }

    #[test]
    fn test_trigger_registration_is_idempotent() {
        let (field, validator) = email_field();
        validator.set_trigger(true, true);
        validator.set_trigger(true, true);
        assert_eq!(field.text_subscriber_count(), 1);
        assert_eq!(field.focus_subscriber_count(), 1);

        validator.set_trigger(false, false);
        validator.set_trigger(false, false);
        assert_eq!(field.text_subscriber_count(), 0);
        assert_eq!(field.focus_subscriber_count(), 0);

        field.type_text("nope");
        field.blur();
        assert_eq!(field.error(), None);
        assert_eq!(validator.state(), None);
    }

    #[test]
    fn test_focus_loss_trigger() {
        let (field, validator) = email_field();
        field.set_text("nope");
        field.blur();
        assert_eq!(field.error().as_deref(), Some("Email address is invalid"));
        assert_eq!(validator.state(), Some(ValidationState::Invalid));
    }

    #[test]
    fn test_drop_unsubscribes() {
        let (field, validator) = email_field();
        validator.set_validate_on_keystroke(true);
        drop(validator);

        assert_eq!(field.text_subscriber_count(), 0);
        assert_eq!(field.focus_subscriber_count(), 0);
        field.type_text("nope");
        assert_eq!(field.error(), None);
    }

    #[test]
    fn test_container_display_moves_error_both_ways() {
        let container = Rc::new(MemoryContainer::new());
        let layout = Rc::new(MemoryNode::new().with_container(container.clone()));
        let field = Rc::new(MemoryField::new("email").with_ancestor(layout));
        let validator = Validator::new(field.clone(), Rule::email());

        field.set_text("nope");
        validator.validate();
        assert_eq!(field.error().as_deref(), Some("Email address is invalid"));

        validator.set_container_display(true).unwrap();
        assert_eq!(field.error(), None);
        assert_eq!(container.error().as_deref(), Some("Email address is invalid"));
        assert_eq!(validator.error().as_deref(), Some("Email address is invalid"));

        validator.set_container_display(false).unwrap();
        assert_eq!(container.error(), None);
        assert_eq!(field.error().as_deref(), Some("Email address is invalid"));
    }

    #[test]
    fn test_container_display_without_container() {
        let root = Rc::new(MemoryNode::new());
        let field = Rc::new(MemoryField::new("email").with_ancestor(root));
        let validator = Validator::new(field.clone(), Rule::email());
        field.set_text("nope");
        validator.validate();

        let err = validator.set_container_display(true).unwrap_err();
        assert!(matches!(err, ConfigError::NoContainerFound { ref field } if field == "email"));
        assert!(!validator.uses_container_display());
        assert_eq!(field.error().as_deref(), Some("Email address is invalid"));
    }

    #[test]
    fn test_toggle_dispatch() {
        let (field, validator) = email_field();
        validator.toggle(ValidatorOption::ValidateOnKeystroke, true).unwrap();
        validator.toggle(ValidatorOption::Required, true).unwrap();
        assert!(validator.validates_on_keystroke());
        assert!(validator.is_required());

        assert!(
            validator
                .toggle(ValidatorOption::UseContainerDisplay, true)
                .is_err()
        );
        validator.toggle(ValidatorOption::ShowErrors, false).unwrap();
        field.type_text("");
        assert_eq!(field.error(), None);
    }

    #[test]
    fn test_clone_for_copies_settings_and_rule() {
        let password = Rc::new(MemoryField::new("password"));
        let confirm = Rc::new(MemoryField::new("confirm"));
        let validator = Validator::new(password.clone(), PasswordRule::new().min_length(3));
        validator.set_trigger(true, false);
        validator.set_required(false, Some("Say something"));

        let copy = validator.clone_for(confirm.clone()).unwrap();
        assert!(copy.validates_on_keystroke());
        assert!(!copy.validates_on_focus_loss());
        assert_eq!(copy.required_message(), "Say something");
        assert_eq!(copy.rule(), validator.rule());
        assert_eq!(confirm.text_subscriber_count(), 1);
        assert_eq!(password.text_subscriber_count(), 1);

        confirm.type_text("ab");
        assert_eq!(
            confirm.error().as_deref(),
            Some("Password must contain at least 3 characters")
        );
        assert_eq!(password.error(), None);
    }

    #[test]
    fn test_update_rule_at_runtime() {
        let field = Rc::new(MemoryField::new("password").with_text("abc"));
        let validator = Validator::new(field.clone(), Rule::password());
        assert!(validator.validate());

        validator.update_rule(|rule| {
            if let Some(password) = rule.as_password_mut() {
                password.set_digit(true, None);
            }
        });
        assert!(!validator.validate());
        assert_eq!(
            field.error().as_deref(),
            Some("Password must contain at least one digit")
        );
    }

    #[test]
    fn test_observer_may_reenter_validator() {
        let (field, validator) = email_field();
        let handle = validator.handle();
        validator.set_observer(Some(ValidateObserver::new().on_error(move |_| {
            let _ = handle.text();
            handle.set_error(Some("overridden"));
        })));

        field.set_text("nope");
        assert!(!validator.validate());
        assert_eq!(field.error().as_deref(), Some("overridden"));
    }
}
