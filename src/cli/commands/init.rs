//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::{EXIT_CONFIG, EXIT_FATAL, EXIT_SUCCESS};
use crate::config::DEFAULT_CONFIG_FILE;
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            eprintln!("❌ Configuration file already exists: {}", self.output);
            eprintln!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(()) => {
                eprintln!("✅ Configuration file created: {}", self.output);
                eprintln!();
                eprintln!("Next steps:");
                eprintln!("  1. Edit {} with your settings", self.output);
                eprintln!("  2. Export a model: punkt-export export english.pickle");
                eprintln!("  3. Convert a directory: punkt-export batch models/ sentences/");
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                tracing::error!(output = %self.output, error = %e, "Failed to write configuration");
                eprintln!("❌ Failed to write configuration file");
                eprintln!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Sample configuration with every setting at its default
    fn generate_config() -> String {
        r#"# punkt-export configuration
#
# Every setting is optional. Values can reference environment variables
# with ${VAR_NAME} and be overridden by PUNKT_EXPORT_<SECTION>_<KEY>.

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

[export]
# Output layout: "compact" or "pretty"
style = "compact"

# Fail on colliding or ambiguous keys instead of overwriting
strict = false

# Input format: "auto", "pickle", "json" or "msgpack"
format = "auto"

# Terminate documents with a newline
trailing_newline = true

[logging]
# JSON log file in addition to stderr
local_enabled = false
local_path = "./logs"

# Log rotation: "daily", "hourly" or "never"
local_rotation = "daily"
"#
        .to_string()
    }
}
