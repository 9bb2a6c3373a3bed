//! Builder for constructing Validator instances.

use crate::core::{Validator, ValidatorOptions};
use crate::error::Result;
use crate::field::FieldAdapter;
use crate::messages::MessageProvider;
use crate::notify::ValidateObserver;
use crate::rules::Rule;
use std::rc::Rc;

/// Builder for constructing a `Validator`.
///
/// Collects settings and applies them in a fixed sequence on `build`. There is
/// no logic here beyond what the validator's own setters do.
///
/// # Examples
///
/// ```rust
/// use field_validator::prelude::*;
/// use std::rc::Rc;
///
/// let field = Rc::new(MemoryField::new("email"));
/// let validator = Validator::builder(field.clone(), Rule::email())
///     .required(true)
///     .validate_on_keystroke(true)
///     .build()?;
///
/// field.type_text("someone@");
/// assert_eq!(field.error().as_deref(), Some("Email address is invalid"));
/// # Ok::<(), ConfigError>(())
/// ```
pub struct ValidatorBuilder {
    field: Rc<dyn FieldAdapter>,
    rule: Rule,
    messages: Option<Rc<dyn MessageProvider>>,
    options: ValidatorOptions,
    observer: Option<ValidateObserver>,
}

impl ValidatorBuilder {
    /// Create a new builder with default settings.
    pub fn new(field: Rc<dyn FieldAdapter>, rule: impl Into<Rule>) -> Self {
        Self {
            field,
            rule: rule.into(),
            messages: None,
            options: ValidatorOptions::default(),
            observer: None,
        }
    }

    /// Start from a full set of options, e.g. loaded from a settings file.
    ///
    /// Later setter calls override individual values.
    pub fn options(mut self, options: ValidatorOptions) -> Self {
        self.options = options;
        self
    }

    /// Mark the field required, with the provider's default message.
    pub fn required(mut self, required: bool) -> Self {
        self.options.required = required;
        self
    }

    /// Mark the field required with a custom message.
    pub fn required_with_message(mut self, message: impl Into<String>) -> Self {
        self.options.required = true;
        self.options.required_message = Some(message.into());
        self
    }

    /// Validate after every edit.
    pub fn validate_on_keystroke(mut self, enabled: bool) -> Self {
        self.options.validate_on_keystroke = enabled;
        self
    }

    /// Validate when the field loses focus.
    pub fn validate_on_focus_loss(mut self, enabled: bool) -> Self {
        self.options.validate_on_focus_loss = enabled;
        self
    }

    /// Display errors.
    pub fn show_errors(mut self, show: bool) -> Self {
        self.options.show_errors = show;
        self
    }

    /// Display errors on the nearest error container.
    pub fn use_container_display(mut self, use_container: bool) -> Self {
        self.options.use_container_display = use_container;
        self
    }

    /// Report validation outcomes to `observer`.
    pub fn observer(mut self, observer: ValidateObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Look default messages up in `messages`.
    pub fn messages(mut self, messages: Rc<dyn MessageProvider>) -> Self {
        self.messages = Some(messages);
        self
    }

    /// Build the validator and subscribe it to its field.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoContainerFound` if container display was
    /// requested and the field has no error container.
    pub fn build(self) -> Result<Validator> {
        let validator = match self.messages {
            Some(messages) => Validator::with_messages(self.field, self.rule, messages),
            None => Validator::new(self.field, self.rule),
        };
        validator.apply_options(&self.options)?;
        validator.set_observer(self.observer);
        Ok(validator)
    }
}
