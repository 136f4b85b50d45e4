//! Document rendering
//!
//! Two layouts carry the same content:
//!
//! - **Compact**: one line, `", "` between entries and `": "` after keys,
//!   byte-compatible with documents consumed by existing sentence segmenters
//! - **Pretty**: indented JSON for humans

use crate::domain::{ExportDocument, ParameterGroup, PunktError, Result};
use std::fmt::{self, Write};
use std::str::FromStr;

/// Text layout of an exported document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputStyle {
    /// Single-line legacy layout
    #[default]
    Compact,
    /// Indented JSON
    Pretty,
}

impl FromStr for OutputStyle {
    type Err = PunktError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            _ => Err(PunktError::Configuration(format!(
                "Invalid output style: {s}. Expected 'compact' or 'pretty'"
            ))),
        }
    }
}

impl fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputStyle::Compact => f.write_str("compact"),
            OutputStyle::Pretty => f.write_str("pretty"),
        }
    }
}

/// Render a document as JSON text in the given style
///
/// # Examples
///
/// ```
/// use punkt_export::core::export::{render, OutputStyle};
/// use punkt_export::domain::ExportDocument;
///
/// let mut doc = ExportDocument::default();
/// doc.ortho_context.insert("the".to_string(), 2);
///
/// let text = render(&doc, OutputStyle::Compact).unwrap();
/// assert!(text.starts_with(r#"{"OrthoContext": {"the": 2},"Colocations": {}"#));
/// ```
pub fn render(doc: &ExportDocument, style: OutputStyle) -> Result<String> {
    match style {
        OutputStyle::Compact => render_compact(doc),
        OutputStyle::Pretty => Ok(serde_json::to_string_pretty(doc)?),
    }
}

fn render_compact(doc: &ExportDocument) -> Result<String> {
    let mut buf = String::with_capacity(estimate_size(doc));

    buf.push('{');
    for (i, group) in ParameterGroup::ALL.iter().enumerate() {
        if i > 0 {
            buf.push(',');
        }
        write_key(&mut buf, group.key())?;
        buf.push_str(": {");
        for (j, (key, value)) in doc.group(*group).iter().enumerate() {
            if j > 0 {
                buf.push_str(", ");
            }
            write_key(&mut buf, key)?;
            write!(buf, ": {value}").map_err(|e| PunktError::Serialization(e.to_string()))?;
        }
        buf.push('}');
    }
    buf.push('}');

    Ok(buf)
}

/// Append a key as a JSON string literal
fn write_key(buf: &mut String, key: &str) -> Result<()> {
    buf.push_str(&serde_json::to_string(key)?);
    Ok(())
}

fn estimate_size(doc: &ExportDocument) -> usize {
    // quotes, separators and a short value per entry
    ParameterGroup::ALL
        .iter()
        .flat_map(|g| doc.group(*g).keys())
        .map(|k| k.len() + 8)
        .sum::<usize>()
        + 80
}
