//! Phone number rule.

use super::{Evaluate, EvaluationContext};
use crate::messages::MessageKey;
use once_cell::sync::Lazy;
use regex::Regex;

static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\+[0-9]+[\- .]*)?(\([0-9]+\)[\- .]*)?([0-9][0-9\- .]+[0-9])$")
        .expect("phone pattern is valid")
});

/// Fails text longer than one character that is not shaped like a phone number.
///
/// Single-character input is let through so a user who has only typed the
/// first digit is not flagged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneRule {
    message: Option<String>,
}

impl PhoneRule {
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

    /// Whether `text` is shaped like a phone number.
    pub fn matches(text: &str) -> bool {
        PHONE_REGEX.is_match(text)
    }
}

impl Evaluate for PhoneRule {
    fn evaluate(&self, text: &str, ctx: &EvaluationContext<'_>) -> Option<String> {
        if text.chars().count() > 1 && !Self::matches(text) {
            return Some(ctx.message_or(self.message(), MessageKey::PhoneInvalid, &[]));
        }
        None
    }
}
