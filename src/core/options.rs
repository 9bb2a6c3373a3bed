//! Declarative validator options and the option dispatch table.

use crate::error::{ConfigError, Result};
use crate::sources::FileSource;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// A single on/off validator setting, addressable by its snake_case key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidatorOption {
    /// `required`
    Required,
    /// `validate_on_keystroke`
    ValidateOnKeystroke,
    /// `validate_on_focus_loss`
    ValidateOnFocusLoss,
    /// `show_errors`
    ShowErrors,
    /// `use_container_display`
    UseContainerDisplay,
}

impl ValidatorOption {
    /// All options, in the order they are applied.
    pub const ALL: [ValidatorOption; 5] = [
        ValidatorOption::Required,
        ValidatorOption::ValidateOnKeystroke,
        ValidatorOption::ValidateOnFocusLoss,
        ValidatorOption::ShowErrors,
        ValidatorOption::UseContainerDisplay,
    ];

    /// The option's key.
    pub fn as_str(self) -> &'static str {
        match self {
            ValidatorOption::Required => "required",
            ValidatorOption::ValidateOnKeystroke => "validate_on_keystroke",
            ValidatorOption::ValidateOnFocusLoss => "validate_on_focus_loss",
            ValidatorOption::ShowErrors => "show_errors",
            ValidatorOption::UseContainerDisplay => "use_container_display",
        }
    }
}

impl fmt::Display for ValidatorOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidatorOption {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ValidatorOption::ALL
            .into_iter()
            .find(|option| option.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownOption(s.to_string()))
    }
}

/// Every configuration flag of a validator, as plain data.
///
/// Missing fields take their defaults, so a settings file only lists what it
/// changes. Unknown fields are rejected.
///
/// # Examples
///
/// ```rust
/// use field_validator::core::ValidatorOptions;
///
/// let mut options = ValidatorOptions::default();
/// options.set("validate_on_keystroke", "true")?;
/// assert!(options.validate_on_keystroke);
/// assert!(options.set("validate_on_paste", "true").is_err());
/// # Ok::<(), field_validator::error::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorOptions {
    /// Reject empty or blank text.
    pub required: bool,
    /// Message for the required check; the provider's default when `None`.
    pub required_message: Option<String>,
    /// Validate after every edit.
    pub validate_on_keystroke: bool,
    /// Validate when the field loses focus.
    pub validate_on_focus_loss: bool,
    /// Display errors on the field or its container.
    pub show_errors: bool,
    /// Display errors on the nearest error container instead of the field.
    pub use_container_display: bool,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            required: false,
            required_message: None,
            validate_on_keystroke: false,
            validate_on_focus_loss: true,
            show_errors: true,
            use_container_display: false,
        }
    }
}

impl ValidatorOptions {
    /// Load options from a YAML, TOML or JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has an unsupported
    /// extension, or contains unknown or mistyped keys.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let source = FileSource::new(path.as_ref());
        let options: ValidatorOptions = source.load()?;
        tracing::debug!(source = %source.name(), ?options, "loaded validator options");
        Ok(options)
    }

    /// Current value of `option`.
    pub fn get(&self, option: ValidatorOption) -> bool {
        match option {
            ValidatorOption::Required => self.required,
            ValidatorOption::ValidateOnKeystroke => self.validate_on_keystroke,
            ValidatorOption::ValidateOnFocusLoss => self.validate_on_focus_loss,
            ValidatorOption::ShowErrors => self.show_errors,
            ValidatorOption::UseContainerDisplay => self.use_container_display,
        }
    }

    /// Set `option` to `enabled`.
    pub fn set_option(&mut self, option: ValidatorOption, enabled: bool) {
        match option {
            ValidatorOption::Required => self.required = enabled,
            ValidatorOption::ValidateOnKeystroke => self.validate_on_keystroke = enabled,
            ValidatorOption::ValidateOnFocusLoss => self.validate_on_focus_loss = enabled,
            ValidatorOption::ShowErrors => self.show_errors = enabled,
            ValidatorOption::UseContainerDisplay => self.use_container_display = enabled,
        }
    }

    /// Set an option from string key and value.
    ///
    /// Accepted values: `true`/`false`, `yes`/`no`, `on`/`off`, `1`/`0`.
    ///
    /// # Errors
    ///
    /// `UnknownOption` for an unrecognized key, `InvalidValue` for a value
    /// that is not a boolean.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let option: ValidatorOption = key.parse()?;
        let enabled = parse_flag(value).ok_or_else(|| ConfigError::invalid_value(key, value))?;
        self.set_option(option, enabled);
        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}
