//! Message keys and the lookup capability.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every message the validators can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKey {
    /// A required field is empty.
    RequiredField,
    /// Text is not an email address.
    EmailInvalid,
    /// Text is not a phone number.
    PhoneInvalid,
    /// Password shorter than the minimum; `{0}` is the minimum length.
    PasswordTooShort,
    /// Password lacks an upper-case letter.
    PasswordNeedsUpper,
    /// Password lacks a lower-case letter.
    PasswordNeedsLower,
    /// Password lacks a digit.
    PasswordNeedsDigit,
    /// Password lacks a special character.
    PasswordNeedsSpecial,
    /// Password and confirmation differ.
    PasswordsDoNotMatch,
}

impl MessageKey {
    /// All keys, in declaration order.
    pub const ALL: [MessageKey; 9] = [
        MessageKey::RequiredField,
        MessageKey::EmailInvalid,
        MessageKey::PhoneInvalid,
        MessageKey::PasswordTooShort,
        MessageKey::PasswordNeedsUpper,
        MessageKey::PasswordNeedsLower,
        MessageKey::PasswordNeedsDigit,
        MessageKey::PasswordNeedsSpecial,
        MessageKey::PasswordsDoNotMatch,
    ];

    /// The snake_case name used in message catalog files.
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKey::RequiredField => "required_field",
            MessageKey::EmailInvalid => "email_invalid",
            MessageKey::PhoneInvalid => "phone_invalid",
            MessageKey::PasswordTooShort => "password_too_short",
            MessageKey::PasswordNeedsUpper => "password_needs_upper",
            MessageKey::PasswordNeedsLower => "password_needs_lower",
            MessageKey::PasswordNeedsDigit => "password_needs_digit",
            MessageKey::PasswordNeedsSpecial => "password_needs_special",
            MessageKey::PasswordsDoNotMatch => "passwords_do_not_match",
        }
    }

    /// The built-in English template for this key.
    pub fn default_template(self) -> &'static str {
        match self {
            MessageKey::RequiredField => "Required field",
            MessageKey::EmailInvalid => "Email address is invalid",
            MessageKey::PhoneInvalid => "Phone number is invalid",
            MessageKey::PasswordTooShort => "Password must contain at least {0} characters",
            MessageKey::PasswordNeedsUpper => {
                "Password must contain at least one upper case letter"
            }
            MessageKey::PasswordNeedsLower => {
                "Password must contain at least one lower case letter"
            }
            MessageKey::PasswordNeedsDigit => "Password must contain at least one digit",
            MessageKey::PasswordNeedsSpecial => {
                "Password must contain at least one special character"
            }
            MessageKey::PasswordsDoNotMatch => "Passwords do not match",
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MessageKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownOption(s.to_string()))
    }
}

/// Supplies localized message strings.
///
/// Templates use positional placeholders `{0}`, `{1}`, ... which are
/// replaced by `args`.
pub trait MessageProvider {
    /// Look up the message for `key`, interpolating `args`.
    fn lookup(&self, key: MessageKey, args: &[&str]) -> String;
}

/// The built-in English messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMessages;

impl MessageProvider for DefaultMessages {
    fn lookup(&self, key: MessageKey, args: &[&str]) -> String {
        interpolate(key.default_template(), args)
    }
}

/// Replace `{n}` placeholders in `template` with `args[n]`.
///
/// Placeholders without a matching argument are kept verbatim.
pub fn interpolate(template: &str, args: &[&str]) -> String {
    if args.is_empty() {
        return template.to_string();
    }

    let mut out = template.to_string();
    for (index, arg) in args.iter().enumerate() {
        out = out.replace(&format!("{{{index}}}"), arg);
    }
    out
}
