//! Domain error types
//!
//! This module defines the error hierarchy for punkt-export.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main punkt-export error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum PunktError {
    /// Parameter loading failed
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Two distinct inputs rendered to the same output key (strict mode only)
    #[error("Key collision in {group}: \"{key}\"")]
    KeyCollision { group: String, key: String },

    /// A synthetic key cannot be split back into its parts (strict mode only)
    #[error("Ambiguous key in {group}: \"{key}\"")]
    AmbiguousKey { group: String, key: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Failure to materialize a parameter set from its serialized source
///
/// This is the only way an export can fail before it begins.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The input resource does not exist
    #[error("Input not found: {0}")]
    NotFound(String),

    /// The input exists but could not be read
    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },

    /// The bytes are not valid for the declared format
    #[error("Failed to decode {format} input: {message}")]
    Decode { format: String, message: String },

    /// The decoded value does not have the parameter set structure
    #[error("Unexpected parameter structure: {0}")]
    Shape(String),
}

impl LoadError {
    /// Builds a decode error for the given format
    pub fn decode(format: impl Into<String>, message: impl ToString) -> Self {
        LoadError::Decode {
            format: format.into(),
            message: message.to_string(),
        }
    }

    /// Builds a shape error
    pub fn shape(message: impl Into<String>) -> Self {
        LoadError::Shape(message.into())
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for PunktError {
    fn from(err: std::io::Error) -> Self {
        PunktError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for PunktError {
    fn from(err: serde_json::Error) -> Self {
        PunktError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for PunktError {
    fn from(err: toml::de::Error) -> Self {
        PunktError::Configuration(format!("TOML parse error: {err}"))
    }
}
