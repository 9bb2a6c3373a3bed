//! Email address rule.

use super::{Evaluate, EvaluationContext};
use crate::messages::MessageKey;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9+._%\-]{1,256}@[a-zA-Z0-9][a-zA-Z0-9\-]{0,64}(\.[a-zA-Z0-9][a-zA-Z0-9\-]{0,25})+$",
    )
    .expect("email pattern is valid")
});

/// Fails non-empty text that is not shaped like an email address.
///
/// Empty text passes; combine with `required` to reject it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailRule {
    message: Option<String>,
}

impl EmailRule {
    /// Create a rule using the provider's default message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `message` instead of the default.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set or clear the custom message.
    pub fn set_message(&mut self, message: Option<String>) {
        self.message = message;
    }

    /// The custom message, if set.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Whether `text` is shaped like an email address.
    pub fn matches(text: &str) -> bool {
        EMAIL_REGEX.is_match(text)
    }
}

impl Evaluate for EmailRule {
    fn evaluate(&self, text: &str, ctx: &EvaluationContext<'_>) -> Option<String> {
        if !text.is_empty() && !Self::matches(text) {
            return Some(ctx.message_or(self.message(), MessageKey::EmailInvalid, &[]));
        }
        None
    }
}
