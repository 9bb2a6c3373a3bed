//! Overridable message catalogs.

use super::{MessageKey, MessageProvider, interpolate};
use crate::error::Result;
use crate::sources::FileSource;
use std::collections::HashMap;
use std::path::Path;

/// A message provider backed by a table of templates.
///
/// Keys missing from the table fall back to the built-in English templates,
/// so a catalog only needs to list the messages it changes.
///
/// # Examples
///
/// ```rust
/// use field_validator::messages::{MessageCatalog, MessageKey, MessageProvider};
///
/// let catalog = MessageCatalog::new()
///     .with_template(MessageKey::RequiredField, "Pflichtfeld");
///
/// assert_eq!(catalog.lookup(MessageKey::RequiredField, &[]), "Pflichtfeld");
/// assert_eq!(catalog.lookup(MessageKey::PhoneInvalid, &[]), "Phone number is invalid");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    templates: HashMap<MessageKey, String>,
}

impl MessageCatalog {
    /// Create an empty catalog (all lookups use the defaults).
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the template for `key`.
    pub fn with_template(mut self, key: MessageKey, template: impl Into<String>) -> Self {
        self.templates.insert(key, template.into());
        self
    }

    /// Build a catalog from snake_case key names.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownOption` for a key that names no message.
    pub fn from_map(entries: HashMap<String, String>) -> Result<Self> {
        let mut templates = HashMap::with_capacity(entries.len());
        for (name, template) in entries {
            let key: MessageKey = name.parse()?;
            templates.insert(key, template);
        }
        Ok(Self { templates })
    }

    /// Load a catalog from a YAML, TOML or JSON file.
    ///
    /// The file is a flat table of key names to templates:
    ///
    /// ```yaml
    /// required_field: "Pflichtfeld"
    /// password_too_short: "Mindestens {0} Zeichen"
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or names an
    /// unknown message key.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let entries: HashMap<String, String> = FileSource::new(path.as_ref()).load()?;
        let catalog = Self::from_map(entries)?;
        tracing::debug!(
            path = %path.as_ref().display(),
            overrides = catalog.templates.len(),
            "loaded message catalog"
        );
        Ok(catalog)
    }

    /// The template used for `key`.
    pub fn template(&self, key: MessageKey) -> &str {
        self.templates
            .get(&key)
            .map(String::as_str)
            .unwrap_or_else(|| key.default_template())
    }
}

impl MessageProvider for MessageCatalog {
    fn lookup(&self, key: MessageKey, args: &[&str]) -> String {
        interpolate(self.template(key), args)
    }
}
