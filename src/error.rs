//! Error types for the vest vitals core.
//!
//! ```text
//! Error (top-level)
//! ├── ConfigurationError  (subject inputs, mode controls, settings files)
//! └── WireError           (live sensor payloads)
//! ```
//!
//! None of these are fatal: the session keeps showing its last good state.

use std::path::PathBuf;

use thiserror::Error;

/// Convenient `Result` alias for crate-level operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Wire error: {0}")]
    Wire(#[from] WireError),
}

/// Invalid subject calibration, mode control or settings.
///
/// Every variant names the field that was rejected, see [`ConfigurationError::field`].
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Unknown breed `{0}`")]
    UnknownBreed(String),

    #[error("Unknown size `{0}`")]
    UnknownSize(String),

    #[error("Invalid age `{value}`: {reason}")]
    InvalidAge { value: String, reason: &'static str },

    #[error("Invalid weight `{value}`: {reason}")]
    InvalidWeight { value: String, reason: &'static str },

    /// A mode button identifier that does not belong to the signal.
    #[error("Unknown {signal} mode control `{control}`")]
    UnknownControl { signal: &'static str, control: String },

    #[error("Invalid value for `{field}`: {reason}")]
    InvalidSetting { field: &'static str, reason: String },

    #[error("Cannot read settings file `{path}`: {source}")]
    SettingsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse settings file `{path}`: {source}")]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigurationError {
    pub fn invalid_setting(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the rejected field.
    pub fn field(&self) -> &'static str {
        match self {
            ConfigurationError::UnknownBreed(_) => "breed",
            ConfigurationError::UnknownSize(_) => "size",
            ConfigurationError::InvalidAge { .. } => "age",
            ConfigurationError::InvalidWeight { .. } => "weight",
            ConfigurationError::UnknownControl { .. } => "mode",
            ConfigurationError::InvalidSetting { field, .. } => *field,
            ConfigurationError::SettingsRead { .. } | ConfigurationError::SettingsParse { .. } => {
                "settings"
            }
        }
    }
}

/// A live sensor payload that could not be decoded.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WireError {
    #[error("Truncated payload: need {needed} bytes, got {got}")]
    Truncated { needed: usize, got: usize },

    #[error("Non-finite `{field}` in payload")]
    NonFinite { field: &'static str },
}
