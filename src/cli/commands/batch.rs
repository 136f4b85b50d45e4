//! Batch command implementation
//!
//! Converts a directory of parameter files into `<language>.json` documents.

use super::{apply_export_overrides, exit_code_for, EXIT_CONFIG, EXIT_SUCCESS, EXIT_VALIDATION};
use crate::config::PunktConfig;
use crate::core::export::{convert_directory, BatchOptions, BatchSummary};
use crate::domain::{PunktError, Result};
use clap::Args;
use std::path::Path;

/// Arguments for the batch command
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Directory containing parameter files
    pub input_dir: String,

    /// Directory that receives the JSON documents
    pub output_dir: String,

    /// Input format for every file (pickle, json, msgpack); detected per file by default
    #[arg(short, long)]
    pub format: Option<String>,

    /// Output layout (compact or pretty)
    #[arg(short, long)]
    pub style: Option<String>,

    /// Fail on colliding or ambiguous keys instead of overwriting
    #[arg(long)]
    pub strict: bool,

    /// Stop at the first file that fails
    #[arg(long)]
    pub fail_fast: bool,
}

impl BatchArgs {
    /// Execute the batch command
    pub fn execute(&self, config: &PunktConfig) -> anyhow::Result<i32> {
        let config = apply_export_overrides(
            config,
            self.format.as_deref(),
            self.style.as_deref(),
            self.strict,
        );

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Invalid batch options");
            eprintln!("Invalid batch options: {e}");
            return Ok(EXIT_CONFIG);
        }

        let summary = match self.run(&config) {
            Ok(summary) => summary,
            Err(e) => {
                crate::log_error_with_context!(&e, self.input_dir);
                eprintln!("Error: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        Self::print_summary(&summary);

        if summary.is_successful() {
            Ok(EXIT_SUCCESS)
        } else {
            Ok(EXIT_VALIDATION)
        }
    }

    fn run(&self, config: &PunktConfig) -> Result<BatchSummary> {
        let options = BatchOptions {
            format: config
                .export
                .source_format()
                .map_err(PunktError::Configuration)?,
            export: config.export.export_options()?,
            fail_fast: self.fail_fast,
            trailing_newline: config.export.trailing_newline,
        };

        convert_directory(
            Path::new(&self.input_dir),
            Path::new(&self.output_dir),
            &options,
        )
    }

    fn print_summary(summary: &BatchSummary) {
        eprintln!("📊 Batch Summary:");
        eprintln!("  Converted: {}", summary.converted.len());
        eprintln!("  Failed: {}", summary.failures.len());
        eprintln!("  Skipped: {}", summary.skipped);
        eprintln!("  Entries: {}", summary.total_entries);
        eprintln!("  Duration: {:.2}s", summary.duration.as_secs_f64());

        if !summary.failures.is_empty() {
            eprintln!();
            eprintln!("⚠️  Failures:");
            for failure in &summary.failures {
                eprintln!("  - {}: {}", failure.path.display(), failure.message);
            }
        }
    }
}
