//! Error types for field-validator.
//!
//! Only setup-time faults are errors. A field that fails its rules is not an
//! error: `Validator::validate` returns `false` and reports the message through
//! the error display and the observer.

/// Result type alias for field-validator configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Faults raised while wiring validators to fields.
///
/// These indicate a programming or deployment mistake (a field placed outside
/// any error container, a misspelled option key) and surface immediately from
/// the configuring call.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Container display was requested but no ancestor of the field can host an error.
    #[error("No error container found in the ancestor chain of field '{field}'")]
    NoContainerFound {
        /// Name of the field whose ancestors were searched
        field: String,
    },

    /// An option or message key is not recognized.
    #[error("Unknown configuration option: {0}")]
    UnknownOption(String),

    /// An option value could not be interpreted.
    #[error("Invalid value '{value}' for option '{key}'")]
    InvalidValue {
        /// The option key
        key: String,
        /// The rejected value
        value: String,
    },

    /// Failed to load a settings file.
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    /// Failed to deserialize a settings file.
    #[error("Failed to deserialize configuration: {0}")]
    DeserializationError(String),
}

impl ConfigError {
    /// Create a `NoContainerFound` error for the named field.
    pub fn no_container(field: impl Into<String>) -> Self {
        Self::NoContainerFound {
            field: field.into(),
        }
    }

    /// Create an `InvalidValue` error.
    pub fn invalid_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_container_message_names_field() {
        let err = ConfigError::no_container("email");
        assert_eq!(
            err.to_string(),
            "No error container found in the ancestor chain of field 'email'"
        );
    }

    #[test]
    fn test_invalid_value_message() {
        let err = ConfigError::invalid_value("show_errors", "maybe");
        assert!(err.to_string().contains("show_errors"));
        assert!(err.to_string().contains("maybe"));
    }
}
