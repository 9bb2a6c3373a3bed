//! File-based settings source.

use crate::error::{ConfigError, Result};
use config::File;
use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// File-based settings source.
///
/// Loads validator options or message catalogs from YAML, TOML, or JSON files
/// with automatic format detection based on file extension. Which formats are
/// available depends on the `yaml`, `toml` and `json` crate features.
///
/// # Examples
///
/// ```rust,no_run
/// use field_validator::core::ValidatorOptions;
/// use field_validator::sources::FileSource;
///
/// let options: ValidatorOptions = FileSource::new("forms/email.yaml").load()?;
/// # Ok::<(), field_validator::error::ConfigError>(())
/// ```
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a new file source.
    ///
    /// The format is detected from the file extension:
    /// - `.yaml`, `.yml` -> YAML
    /// - `.toml` -> TOML
    /// - `.json` -> JSON
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Validate that the file extension is supported.
    fn validate_extension(&self) -> Result<()> {
        let extension = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                ConfigError::LoadError(format!(
                    "Unable to determine file format for: {}",
                    self.path.display()
                ))
            })?;

        match extension {
            "yaml" | "yml" | "toml" | "json" => Ok(()),
            _ => Err(ConfigError::LoadError(format!(
                "Unsupported file extension: {}. Supported: .yaml, .yml, .toml, .json",
                extension
            ))),
        }
    }

    /// Load and deserialize the file into `T`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The extension is not supported
    /// - The file does not exist or cannot be parsed
    /// - The contents do not match `T`
    pub fn load<T>(&self) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.validate_extension()?;

        if !self.path.exists() {
            return Err(ConfigError::LoadError(format!(
                "Settings file not found: {}",
                self.path.display()
            )));
        }

        // The config crate auto-detects the format from the extension
        let settings = config::Config::builder()
            .add_source(File::from(self.path.clone()).required(true))
            .build()
            .map_err(|e| ConfigError::LoadError(format!("Failed to load file: {}", e)))?;

        settings.try_deserialize::<T>().map_err(|e| {
            ConfigError::DeserializationError(format!(
                "Failed to parse {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Get a human-readable name for this source (for logging/debugging).
    pub fn name(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
