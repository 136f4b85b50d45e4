//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for punkt-export using clap.

pub mod commands;

use crate::config::DEFAULT_CONFIG_FILE;
use clap::{Parser, Subcommand};

/// punkt-export - export Punkt sentence tokenizer parameters as JSON
#[derive(Parser, Debug)]
#[command(name = "punkt-export")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults to ./punkt-export.toml when present)
    #[arg(short, long, env = "PUNKT_EXPORT_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "PUNKT_EXPORT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Configuration path and whether it was named explicitly
    pub fn config_path(&self) -> (&str, bool) {
        match &self.config {
            Some(path) => (path.as_str(), true),
            None => (DEFAULT_CONFIG_FILE, false),
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export one parameter file as a JSON document
    Export(commands::export::ExportArgs),

    /// Convert every parameter file in a directory to <language>.json
    Batch(commands::batch::BatchArgs),

    /// Check an exported document
    Verify(commands::verify::VerifyArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
