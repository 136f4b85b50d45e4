//! Logging and observability
//!
//! Logs go to stderr so that exported documents written to stdout stay
//! clean. Optionally a JSON log file with rotation is written as well.
//!
//! # Example
//!
//! ```no_run
//! use punkt_export::logging::init_logging;
//! use punkt_export::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of an export operation
///
/// # Example
///
/// ```no_run
/// use punkt_export::log_export_start;
/// use punkt_export::adapters::source::SourceFormat;
///
/// log_export_start!("english.pickle", SourceFormat::Pickle);
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($input:expr, $format:expr) => {
        tracing::info!(
            input = %$input,
            format = %$format,
            "Starting export"
        );
    };
}

/// Log the completion of an export operation
///
/// # Example
///
/// ```no_run
/// use punkt_export::log_export_complete;
/// use std::time::Duration;
///
/// log_export_complete!(42, Duration::from_millis(12));
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($entries:expr, $duration:expr) => {
        tracing::info!(
            entries = $entries,
            duration_ms = $duration.as_millis() as u64,
            "Export completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use punkt_export::log_error_with_context;
/// use punkt_export::domain::PunktError;
///
/// let error = PunktError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = %$context,
            "Error occurred"
        );
    };
}
