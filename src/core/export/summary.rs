//! Batch conversion summary and reporting

use std::path::PathBuf;
use std::time::Duration;

/// A file that could not be converted
#[derive(Debug, Clone)]
pub struct FileFailure {
    /// Input file
    pub path: PathBuf,

    /// Error message
    pub message: String,
}

impl FileFailure {
    /// Create a new file failure
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Summary of a batch conversion
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// Documents written, as (input, output) paths
    pub converted: Vec<(PathBuf, PathBuf)>,

    /// Files that failed to load or export
    pub failures: Vec<FileFailure>,

    /// Files skipped for an unknown format or as earlier exports
    pub skipped: usize,

    /// Total entries exported across all documents
    pub total_entries: usize,

    /// Duration of the conversion
    pub duration: Duration,
}

impl BatchSummary {
    /// Create a new empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record a converted file
    pub fn add_converted(&mut self, input: PathBuf, output: PathBuf, entries: usize) {
        self.converted.push((input, output));
        self.total_entries += entries;
    }

    /// Record a failed file
    pub fn add_failure(&mut self, failure: FileFailure) {
        self.failures.push(failure);
    }

    /// Record a skipped file
    pub fn add_skipped(&mut self) {
        self.skipped += 1;
    }

    /// Number of files attempted
    pub fn attempted(&self) -> usize {
        self.converted.len() + self.failures.len()
    }

    /// Check if every attempted file was converted
    pub fn is_successful(&self) -> bool {
        self.failures.is_empty()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            converted = self.converted.len(),
            failed = self.failures.len(),
            skipped = self.skipped,
            total_entries = self.total_entries,
            duration_ms = self.duration.as_millis(),
            "Batch conversion completed"
        );

        for failure in &self.failures {
            tracing::warn!(
                path = %failure.path.display(),
                message = %failure.message,
                "Conversion failed"
            );
        }
    }
}
