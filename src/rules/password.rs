//! Password rule.

use super::{Evaluate, EvaluationContext};
use crate::messages::MessageKey;

/// Characters counted as "special" unless overridden.
pub const DEFAULT_SPECIAL_CHARACTERS: &str = "~!";

/// One optional character-class requirement.
///
/// The enabled flag and the custom message are always set and cleared
/// together; an enabled check without a custom message uses the provider's
/// default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharClassCheck {
    enabled: bool,
    message: Option<String>,
}

impl CharClassCheck {
    /// An enabled check, optionally with a custom message.
    pub fn enabled(message: Option<String>) -> Self {
        Self {
            enabled: true,
            message,
        }
    }

    /// A disabled check.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Whether the check runs.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The custom message, if set.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn set(&mut self, enabled: bool, message: Option<String>) {
        self.enabled = enabled;
        self.message = if enabled { message } else { None };
    }
}

/// Minimum length plus optional upper, lower, digit and special-character
/// requirements.
///
/// Checks run in a fixed order and stop at the first failure: minimum length,
/// upper case, lower case, digit, special character.
///
/// The minimum length only applies while the owning validator is *not*
/// required. A required field that is long enough to be non-empty skips the
/// length floor.
///
/// # Examples
///
/// ```rust
/// use field_validator::messages::DefaultMessages;
/// use field_validator::rules::{Evaluate, EvaluationContext, PasswordRule};
///
/// let rule = PasswordRule::new()
///     .min_length(8)
///     .require_upper_case(None)
///     .require_digit(Some("Add a number"));
///
/// let ctx = EvaluationContext::new(&DefaultMessages, false);
/// assert_eq!(rule.evaluate("Sunshine", &ctx).as_deref(), Some("Add a number"));
/// assert_eq!(rule.evaluate("Sunshine7", &ctx), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordRule {
    min_length: usize,
    min_length_message: Option<String>,
    upper_case: CharClassCheck,
    lower_case: CharClassCheck,
    digit: CharClassCheck,
    special: CharClassCheck,
    special_characters: String,
}

impl Default for PasswordRule {
    fn default() -> Self {
        Self {
            min_length: 0,
            min_length_message: None,
            upper_case: CharClassCheck::disabled(),
            lower_case: CharClassCheck::disabled(),
            digit: CharClassCheck::disabled(),
            special: CharClassCheck::disabled(),
            special_characters: DEFAULT_SPECIAL_CHARACTERS.to_string(),
        }
    }
}

impl PasswordRule {
    /// Create a rule with no checks enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require at least `min_length` characters, with the default message.
    pub fn min_length(mut self, min_length: usize) -> Self {
        self.set_min_length(min_length, None);
        self
    }

    /// Require at least `min_length` characters, with a custom message.
    pub fn min_length_with_message(mut self, min_length: usize, message: impl Into<String>) -> Self {
        self.set_min_length(min_length, Some(message.into()));
        self
    }

    /// Require an upper-case letter; `message` overrides the default.
    pub fn require_upper_case(mut self, message: Option<&str>) -> Self {
        self.set_upper_case(true, message.map(str::to_string));
        self
    }

    /// Require a lower-case letter; `message` overrides the default.
    pub fn require_lower_case(mut self, message: Option<&str>) -> Self {
        self.set_lower_case(true, message.map(str::to_string));
        self
    }

    /// Require a digit; `message` overrides the default.
    pub fn require_digit(mut self, message: Option<&str>) -> Self {
        self.set_digit(true, message.map(str::to_string));
        self
    }

    /// Require a special character; `message` overrides the default.
    pub fn require_special(mut self, message: Option<&str>) -> Self {
        self.set_special(true, message.map(str::to_string));
        self
    }

    /// Replace the set of characters counted as special.
    pub fn special_characters(mut self, characters: impl Into<String>) -> Self {
        self.special_characters = characters.into();
        self
    }

    /// Set the minimum length and its custom message.
    pub fn set_min_length(&mut self, min_length: usize, message: Option<String>) {
        self.min_length = min_length;
        self.min_length_message = message;
    }

    /// Enable or disable the upper-case check.
    pub fn set_upper_case(&mut self, enabled: bool, message: Option<String>) {
        self.upper_case.set(enabled, message);
    }

    /// Enable or disable the lower-case check.
    pub fn set_lower_case(&mut self, enabled: bool, message: Option<String>) {
        self.lower_case.set(enabled, message);
    }

    /// Enable or disable the digit check.
    pub fn set_digit(&mut self, enabled: bool, message: Option<String>) {
        self.digit.set(enabled, message);
    }

    /// Enable or disable the special-character check.
    pub fn set_special(&mut self, enabled: bool, message: Option<String>) {
        self.special.set(enabled, message);
    }

    /// The configured minimum length (0 disables the check).
    pub fn get_min_length(&self) -> usize {
        self.min_length
    }

    /// The upper-case check.
    pub fn upper_case(&self) -> &CharClassCheck {
        &self.upper_case
    }

    /// The lower-case check.
    pub fn lower_case(&self) -> &CharClassCheck {
        &self.lower_case
    }

    /// The digit check.
    pub fn digit(&self) -> &CharClassCheck {
        &self.digit
    }

    /// The special-character check.
    pub fn special(&self) -> &CharClassCheck {
        &self.special
    }

    fn class_failure(
        check: &CharClassCheck,
        present: bool,
        key: MessageKey,
        ctx: &EvaluationContext<'_>,
    ) -> Option<String> {
        if check.is_enabled() && !present {
            return Some(ctx.message_or(check.message(), key, &[]));
        }
        None
    }
}

impl Evaluate for PasswordRule {
    fn evaluate(&self, text: &str, ctx: &EvaluationContext<'_>) -> Option<String> {
        if !ctx.required && text.chars().count() < self.min_length {
            let min_length = self.min_length.to_string();
            return Some(ctx.message_or(
                self.min_length_message.as_deref(),
                MessageKey::PasswordTooShort,
                &[&min_length],
            ));
        }

        Self::class_failure(
            &self.upper_case,
            text.chars().any(|c| c.is_ascii_uppercase()),
            MessageKey::PasswordNeedsUpper,
            ctx,
        )
        .or_else(|| {
            Self::class_failure(
                &self.lower_case,
                text.chars().any(|c| c.is_ascii_lowercase()),
                MessageKey::PasswordNeedsLower,
                ctx,
            )
        })
        .or_else(|| {
            Self::class_failure(
                &self.digit,
                text.chars().any(|c| c.is_ascii_digit()),
                MessageKey::PasswordNeedsDigit,
                ctx,
            )
        })
        .or_else(|| {
            Self::class_failure(
                &self.special,
                text.chars().any(|c| self.special_characters.contains(c)),
                MessageKey::PasswordNeedsSpecial,
                ctx,
            )
        })
    }
}
