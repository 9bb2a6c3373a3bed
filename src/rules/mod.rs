//! Rule strategies.
//!
//! A rule turns a piece of text into either an error message or nothing. Rules
//! run only after the validator's required-field check has passed, so they may
//! still see empty text and must decide explicitly what empty means for them.

mod email;
mod password;
mod phone;

pub use email::EmailRule;
pub use password::{CharClassCheck, DEFAULT_SPECIAL_CHARACTERS, PasswordRule};
pub use phone::PhoneRule;

use crate::messages::{MessageKey, MessageProvider};

/// What a rule may consult besides the text itself.
pub struct EvaluationContext<'a> {
    /// Source of default messages.
    pub messages: &'a dyn MessageProvider,
    /// Whether the owning validator marks the field as required.
    pub required: bool,
}

impl<'a> EvaluationContext<'a> {
    /// Create a context.
    pub fn new(messages: &'a dyn MessageProvider, required: bool) -> Self {
        Self { messages, required }
    }

    /// Pick the custom message when set, else the provider's message for `key`.
    pub fn message_or(&self, custom: Option<&str>, key: MessageKey, args: &[&str]) -> String {
        match custom {
            Some(message) => message.to_string(),
            None => self.messages.lookup(key, args),
        }
    }
}

/// The single capability every rule provides.
pub trait Evaluate {
    /// Return the error message for `text`, or `None` when it passes.
    fn evaluate(&self, text: &str, ctx: &EvaluationContext<'_>) -> Option<String>;
}

/// The closed set of rule strategies a validator can run.
///
/// New kinds of rule are added as new variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Email address shape.
    Email(EmailRule),
    /// Phone number shape.
    Phone(PhoneRule),
    /// Password length and character classes.
    Password(PasswordRule),
}

impl Rule {
    /// An email rule with default messages.
    pub fn email() -> Self {
        Rule::Email(EmailRule::new())
    }

    /// A phone rule with default messages.
    pub fn phone() -> Self {
        Rule::Phone(PhoneRule::new())
    }

    /// A password rule with no checks enabled.
    pub fn password() -> Self {
        Rule::Password(PasswordRule::new())
    }

    /// Short name of the rule kind (for logging/debugging).
    pub fn kind(&self) -> &'static str {
        match self {
            Rule::Email(_) => "email",
            Rule::Phone(_) => "phone",
            Rule::Password(_) => "password",
        }
    }

    /// The password settings, when this is a password rule.
    pub fn as_password_mut(&mut self) -> Option<&mut PasswordRule> {
        match self {
            Rule::Password(rule) => Some(rule),
            _ => None,
        }
    }
}

impl Evaluate for Rule {
    fn evaluate(&self, text: &str, ctx: &EvaluationContext<'_>) -> Option<String> {
        match self {
            Rule::Email(rule) => rule.evaluate(text, ctx),
            Rule::Phone(rule) => rule.evaluate(text, ctx),
            Rule::Password(rule) => rule.evaluate(text, ctx),
        }
    }
}

impl From<EmailRule> for Rule {
    fn from(rule: EmailRule) -> Self {
        Rule::Email(rule)
    }
}

impl From<PhoneRule> for Rule {
    fn from(rule: PhoneRule) -> Self {
        Rule::Phone(rule)
    }
}

impl From<PasswordRule> for Rule {
    fn from(rule: PasswordRule) -> Self {
        Rule::Password(rule)
    }
}
