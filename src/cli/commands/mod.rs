//! CLI command implementations
//!
//! Every command returns the process exit code.

pub mod batch;
pub mod export;
pub mod init;
pub mod verify;

use crate::config::PunktConfig;
use crate::domain::PunktError;

/// Successful run
pub const EXIT_SUCCESS: i32 = 0;
/// Configuration or usage error
pub const EXIT_CONFIG: i32 = 2;
/// Strict-mode rejection, failed verification or batch with failures
pub const EXIT_VALIDATION: i32 = 3;
/// Parameters could not be loaded
pub const EXIT_LOAD: i32 = 4;
/// Any other failure
pub const EXIT_FATAL: i32 = 5;

/// Exit code for an error
pub fn exit_code_for(error: &PunktError) -> i32 {
    match error {
        PunktError::Load(_) => EXIT_LOAD,
        PunktError::Configuration(_) => EXIT_CONFIG,
        PunktError::Validation(_)
        | PunktError::KeyCollision { .. }
        | PunktError::AmbiguousKey { .. } => EXIT_VALIDATION,
        PunktError::Serialization(_) | PunktError::Io(_) => EXIT_FATAL,
    }
}

/// Merge CLI overrides into the `[export]` section
///
/// Values are checked by the caller through `PunktConfig::validate`.
pub(crate) fn apply_export_overrides(
    config: &PunktConfig,
    format: Option<&str>,
    style: Option<&str>,
    strict: bool,
) -> PunktConfig {
    let mut config = config.clone();
    if let Some(format) = format {
        config.export.format = format.to_string();
    }
    if let Some(style) = style {
        config.export.style = style.to_string();
    }
    if strict {
        config.export.strict = true;
    }
    config
}
