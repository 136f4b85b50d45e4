//! MessagePack parameter source

use super::traits::{ParamSource, SourceFormat};
use crate::domain::{LoadError, ParameterSet};
use std::io::Read;

/// Reads a [`ParameterSet`] from MessagePack
///
/// Both the map (named fields) and the array (positional fields) encodings
/// produced by `rmp-serde` are accepted.
#[derive(Debug, Default, Clone, Copy)]
pub struct MessagePackSource;

impl ParamSource for MessagePackSource {
    fn format(&self) -> SourceFormat {
        SourceFormat::MessagePack
    }

    fn load(&self, reader: &mut dyn Read) -> Result<ParameterSet, LoadError> {
        rmp_serde::from_read(reader).map_err(|e| LoadError::decode("msgpack", e))
    }
}
