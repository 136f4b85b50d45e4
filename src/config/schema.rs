//! Configuration schema types

use crate::adapters::source::SourceFormat;
use crate::core::export::{ExportOptions, KeyPolicy, OutputStyle};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Main punkt-export configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PunktConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PunktConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output layout (compact or pretty)
    #[serde(default = "default_style")]
    pub style: String,

    /// Reject colliding or ambiguous keys instead of overwriting
    #[serde(default)]
    pub strict: bool,

    /// Input format (auto, pickle, json or msgpack)
    #[serde(default = "default_format")]
    pub format: String,

    /// Terminate documents with a newline
    #[serde(default = "default_true")]
    pub trailing_newline: bool,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        self.output_style().map_err(|e| e.to_string())?;
        self.source_format()?;
        Ok(())
    }

    /// Parsed output style
    pub fn output_style(&self) -> crate::domain::Result<OutputStyle> {
        OutputStyle::from_str(&self.style)
    }

    /// Parsed input format; `None` means detect from the file extension
    pub fn source_format(&self) -> Result<Option<SourceFormat>, String> {
        if self.format.eq_ignore_ascii_case("auto") {
            return Ok(None);
        }
        SourceFormat::from_str(&self.format).map(Some)
    }

    /// Key policy for the `strict` flag
    pub fn key_policy(&self) -> KeyPolicy {
        KeyPolicy::from_strict(self.strict)
    }

    /// Export options described by this section
    pub fn export_options(&self) -> crate::domain::Result<ExportOptions> {
        Ok(ExportOptions::new(self.output_style()?, self.key_policy()))
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            style: default_style(),
            strict: false,
            format: default_format(),
            trailing_newline: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log file path
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when file logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_style() -> String {
    "compact".to_string()
}

fn default_format() -> String {
    "auto".to_string()
}

fn default_true() -> bool {
    true
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
