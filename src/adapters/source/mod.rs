//! Parameter sources
//!
//! Readers that materialize a [`ParameterSet`] from a serialized model file:
//!
//! - [`PickleSource`] - Python pickle (the usual distribution format)
//! - [`JsonSource`] - JSON with the [`ParameterSet`] field names
//! - [`MessagePackSource`] - MessagePack with the same field names

pub mod json;
pub mod msgpack;
pub mod pickle;
pub mod traits;

pub use json::JsonSource;
pub use msgpack::MessagePackSource;
pub use pickle::PickleSource;
pub use traits::{ParamSource, SourceFormat};

use crate::domain::{LoadError, ParameterSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Create the parameter source for a format
pub fn create_source(format: SourceFormat) -> Box<dyn ParamSource> {
    match format {
        SourceFormat::Pickle => Box::new(PickleSource),
        SourceFormat::Json => Box::new(JsonSource),
        SourceFormat::MessagePack => Box::new(MessagePackSource),
    }
}

/// Load a parameter set from a file
///
/// When `format` is `None` it is detected from the file extension. The file
/// handle is released before this function returns.
///
/// # Errors
///
/// Returns a [`LoadError`] if the file is missing, unreadable, or does not
/// decode to a parameter set.
///
/// # Examples
///
/// ```no_run
/// use punkt_export::adapters::source::load_parameters;
///
/// let params = load_parameters("russian.pickle", None).expect("Failed to load parameters");
/// println!("{} abbreviations", params.abbrev_types.len());
/// ```
pub fn load_parameters(
    path: impl AsRef<Path>,
    format: Option<SourceFormat>,
) -> Result<ParameterSet, LoadError> {
    let path = path.as_ref();
    let format = format.unwrap_or_else(|| SourceFormat::detect(path));

    if !path.exists() {
        return Err(LoadError::NotFound(path.display().to_string()));
    }

    let file = File::open(path).map_err(|e| LoadError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    tracing::debug!(path = %path.display(), format = %format, "Loading parameters");

    let mut reader = BufReader::new(file);
    let params = create_source(format).load(&mut reader)?;

    tracing::info!(
        path = %path.display(),
        format = %format,
        entries = params.len(),
        "Parameters loaded"
    );

    Ok(params)
}
