//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::PunktConfig;
use crate::domain::errors::PunktError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Prefix of environment variables that override configuration values
pub const ENV_PREFIX: &str = "PUNKT_EXPORT_";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into PunktConfig
/// 4. Applies environment variable overrides (PUNKT_EXPORT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, a referenced environment
/// variable is not set, parsing fails, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use punkt_export::config::loader::load_config;
///
/// let config = load_config("punkt-export.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<PunktConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(PunktError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        PunktError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: PunktConfig = toml::from_str(&contents)
        .map_err(|e| PunktError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        PunktError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Loads configuration, falling back to defaults when the file is absent
///
/// A missing file is only an error when the path was given explicitly.
/// Environment overrides apply to the defaults as well.
pub fn load_config_or_default(path: impl AsRef<Path>, explicit: bool) -> Result<PunktConfig> {
    let path = path.as_ref();
    if path.exists() || explicit {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "No configuration file, using defaults");
    let mut config = PunktConfig::default();
    apply_env_overrides(&mut config);
    config.validate().map_err(|e| {
        PunktError::Configuration(format!("Configuration validation failed: {}", e))
    })?;
    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied unchanged.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| PunktError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(PunktError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using the PUNKT_EXPORT_* prefix
///
/// Variables follow the pattern PUNKT_EXPORT_<SECTION>_<KEY>, for example
/// PUNKT_EXPORT_EXPORT_STYLE or PUNKT_EXPORT_LOGGING_LOCAL_PATH.
fn apply_env_overrides(config: &mut PunktConfig) {
    let var = |key: &str| std::env::var(format!("{ENV_PREFIX}{key}")).ok();

    // Application overrides
    if let Some(val) = var("APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Export overrides
    if let Some(val) = var("EXPORT_STYLE") {
        config.export.style = val;
    }
    if let Some(val) = var("EXPORT_STRICT") {
        config.export.strict = val.parse().unwrap_or(false);
    }
    if let Some(val) = var("EXPORT_FORMAT") {
        config.export.format = val;
    }
    if let Some(val) = var("EXPORT_TRAILING_NEWLINE") {
        config.export.trailing_newline = val.parse().unwrap_or(true);
    }

    // Logging overrides
    if let Some(val) = var("LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Some(val) = var("LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = var("LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}
