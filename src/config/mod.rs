//! Configuration management for punkt-export.
//!
//! Configuration is optional. When present it is a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Environment variable overrides (`PUNKT_EXPORT_<SECTION>_<KEY>`)
//! - Default values for every setting
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [export]
//! style = "compact"
//! strict = false
//! format = "auto"
//! trailing_newline = true
//!
//! [logging]
//! local_enabled = false
//! local_path = "./logs"
//! local_rotation = "daily"
//! ```
//!
//! # Loading
//!
//! ```rust,no_run
//! use punkt_export::config::load_config_or_default;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config_or_default("punkt-export.toml", false)?;
//! println!("Output style: {}", config.export.style);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default, ENV_PREFIX};
pub use schema::{ApplicationConfig, ExportConfig, LoggingConfig, PunktConfig};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "punkt-export.toml";
