//! Parameter source trait definition
//!
//! A parameter source turns the bytes of a serialized tokenizer model into a
//! [`ParameterSet`]. The exporter never looks at the serialized form itself.

use crate::domain::{LoadError, ParameterSet};
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// Serialized formats a parameter set can be read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Python pickle of the trained parameters
    Pickle,
    /// JSON with the [`ParameterSet`] field names
    Json,
    /// MessagePack with the [`ParameterSet`] field names
    MessagePack,
}

impl SourceFormat {
    /// Guess the format from a file extension
    ///
    /// Unknown or missing extensions are treated as pickle, which is what
    /// trained models are usually shipped as.
    ///
    /// # Examples
    ///
    /// ```
    /// use punkt_export::adapters::source::SourceFormat;
    ///
    /// assert_eq!(SourceFormat::detect("russian.pickle"), SourceFormat::Pickle);
    /// assert_eq!(SourceFormat::detect("params.json"), SourceFormat::Json);
    /// ```
    pub fn detect(path: impl AsRef<Path>) -> Self {
        Self::from_extension(path.as_ref()).unwrap_or(SourceFormat::Pickle)
    }

    /// Map a file extension to a format, if it is a known one
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "pickle" | "pkl" => Some(SourceFormat::Pickle),
            "json" => Some(SourceFormat::Json),
            "msgpack" | "mpk" => Some(SourceFormat::MessagePack),
            _ => None,
        }
    }

    /// Short lowercase name used in messages and configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::Pickle => "pickle",
            SourceFormat::Json => "json",
            SourceFormat::MessagePack => "msgpack",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pickle" | "pkl" => Ok(SourceFormat::Pickle),
            "json" => Ok(SourceFormat::Json),
            "msgpack" | "messagepack" | "mpk" => Ok(SourceFormat::MessagePack),
            _ => Err(format!(
                "Invalid source format: {s}. Expected 'pickle', 'json' or 'msgpack'"
            )),
        }
    }
}

/// Trait for parameter source implementations
///
/// Implementations read the complete serialized value from `reader` and
/// return the materialized parameter set, or a [`LoadError`] if the bytes
/// cannot be decoded or do not have the expected structure.
pub trait ParamSource {
    /// The format this source reads
    fn format(&self) -> SourceFormat;

    /// Load a parameter set from a reader
    fn load(&self, reader: &mut dyn Read) -> Result<ParameterSet, LoadError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_by_extension() {
        assert_eq!(SourceFormat::detect("russian.pickle"), SourceFormat::Pickle);
        assert_eq!(SourceFormat::detect("english.PKL"), SourceFormat::Pickle);
        assert_eq!(SourceFormat::detect("a/b/params.json"), SourceFormat::Json);
        assert_eq!(
            SourceFormat::detect("params.msgpack"),
            SourceFormat::MessagePack
        );
        assert_eq!(SourceFormat::detect("params.mpk"), SourceFormat::MessagePack);
    }

    #[test]
    fn test_detect_falls_back_to_pickle() {
        assert_eq!(SourceFormat::detect("russian"), SourceFormat::Pickle);
        assert_eq!(SourceFormat::detect("model.bin"), SourceFormat::Pickle);
        assert_eq!(SourceFormat::from_extension(Path::new("model.bin")), None);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("pickle".parse::<SourceFormat>().unwrap(), SourceFormat::Pickle);
        assert_eq!("JSON".parse::<SourceFormat>().unwrap(), SourceFormat::Json);
        assert_eq!(
            "msgpack".parse::<SourceFormat>().unwrap(),
            SourceFormat::MessagePack
        );
        assert!("yaml".parse::<SourceFormat>().is_err());
    }

    #[test]
    fn test_format_display() {
        assert_eq!(SourceFormat::MessagePack.to_string(), "msgpack");
    }
}
