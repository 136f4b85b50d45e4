//! Verify command implementation
//!
//! Re-reads an exported document and checks it against the document schema.

use super::{EXIT_FATAL, EXIT_SUCCESS, EXIT_VALIDATION};
use crate::core::verification::verify_document;
use clap::Args;
use std::fs;

/// Arguments for the verify command
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Exported JSON document
    pub document: String,
}

impl VerifyArgs {
    /// Execute the verify command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(document = %self.document, "Verifying document");

        let text = match fs::read_to_string(&self.document) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(document = %self.document, error = %e, "Failed to read document");
                eprintln!("❌ Failed to read {}: {e}", self.document);
                return Ok(EXIT_FATAL);
            }
        };

        let report = match verify_document(&text) {
            Ok(report) => report,
            Err(e) => {
                crate::log_error_with_context!(&e, self.document);
                eprintln!("❌ {e}");
                return Ok(EXIT_VALIDATION);
            }
        };

        println!("{}", report.format_summary());

        if report.is_success() {
            tracing::info!(entries = report.total_verified, "Document verified");
            Ok(EXIT_SUCCESS)
        } else {
            tracing::warn!(failed = report.failed, "Document verification failed");
            Ok(EXIT_VALIDATION)
        }
    }
}
