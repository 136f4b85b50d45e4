//! Export command implementation
//!
//! This module implements the `export` command, which converts a single
//! parameter file into a JSON document on stdout or in a file.

use super::{apply_export_overrides, exit_code_for, EXIT_CONFIG, EXIT_SUCCESS};
use crate::adapters::source::{load_parameters, SourceFormat};
use crate::config::PunktConfig;
use crate::core::export::{export, write_document, write_to};
use crate::domain::Result;
use clap::Args;
use std::path::Path;
use std::time::Instant;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Parameter file to export
    pub input: String,

    /// Input format (pickle, json, msgpack); detected from the extension by default
    #[arg(short, long)]
    pub format: Option<String>,

    /// Write the document to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output layout (compact or pretty)
    #[arg(short, long)]
    pub style: Option<String>,

    /// Fail on colliding or ambiguous keys instead of overwriting
    #[arg(long)]
    pub strict: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self, config: &PunktConfig) -> anyhow::Result<i32> {
        tracing::debug!(input = %self.input, "Starting export command");

        let config = apply_export_overrides(
            config,
            self.format.as_deref(),
            self.style.as_deref(),
            self.strict,
        );

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Invalid export options");
            eprintln!("Invalid export options: {e}");
            return Ok(EXIT_CONFIG);
        }

        match self.run(&config) {
            Ok(()) => Ok(EXIT_SUCCESS),
            Err(e) => {
                crate::log_error_with_context!(&e, self.input);
                eprintln!("Error: {e}");
                Ok(exit_code_for(&e))
            }
        }
    }

    fn run(&self, config: &PunktConfig) -> Result<()> {
        let start = Instant::now();
        let options = config.export.export_options()?;
        let format = config
            .export
            .source_format()
            .map_err(crate::domain::PunktError::Configuration)?
            .unwrap_or_else(|| SourceFormat::detect(&self.input));

        crate::log_export_start!(self.input, format);

        let params = load_parameters(&self.input, Some(format))?;
        let text = export(&params, &options)?;

        match &self.output {
            Some(path) => {
                write_document(Path::new(path), &text, config.export.trailing_newline)?;
                tracing::info!(output = %path, "Document written");
            }
            None => {
                let stdout = std::io::stdout();
                write_to(stdout.lock(), &text, config.export.trailing_newline)?;
            }
        }

        crate::log_export_complete!(params.len(), start.elapsed());
        Ok(())
    }
}
