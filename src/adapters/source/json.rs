//! JSON parameter source

use super::traits::{ParamSource, SourceFormat};
use crate::domain::{LoadError, ParameterSet};
use std::io::Read;

/// Reads a [`ParameterSet`] from JSON using its serde field names
///
/// Collocations are two-element arrays:
///
/// ```json
/// {
///   "ortho_context": {"the": 2},
///   "collocations": [["new", "york"]],
///   "abbrev_types": ["dr"],
///   "sent_starters": ["however"]
/// }
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSource;

impl ParamSource for JsonSource {
    fn format(&self) -> SourceFormat {
        SourceFormat::Json
    }

    fn load(&self, reader: &mut dyn Read) -> Result<ParameterSet, LoadError> {
        serde_json::from_reader(reader).map_err(|e| {
            if e.is_data() {
                LoadError::shape(e.to_string())
            } else {
                LoadError::decode("json", e)
            }
        })
    }
}
