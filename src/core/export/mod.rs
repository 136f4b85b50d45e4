//! Parameter export
//!
//! The core transformation from a [`ParameterSet`] to an [`ExportDocument`]
//! and its JSON text. Nothing in here touches the filesystem; loading and
//! writing happen at the command boundary.
//!
//! # Transformation
//!
//! - `OrthoContext`: every token keeps its integer flags
//! - `Colocations`: every pair `(a, b)` becomes the key `"a,b"` with value `1`
//! - `AbbrevTypes`, `SentStarters`: every member becomes a key with value `1`
//!
//! Two inputs that render to the same key keep a single entry; the later one
//! in iteration order wins. [`KeyPolicy::Strict`] turns that into an error.

pub mod batch;
pub mod output;
pub mod render;
pub mod summary;

pub use batch::{convert_directory, output_path_for, BatchOptions};
pub use output::{write_document, write_to};
pub use render::{render, OutputStyle};
pub use summary::{BatchSummary, FileFailure};

use crate::domain::{ExportDocument, GroupEntries, ParameterGroup, ParameterSet, PunktError};
use crate::domain::{Result, PRESENT};
use std::str::FromStr;

/// Separator placed between the two tokens of a collocation key
pub const COLLOCATION_SEPARATOR: char = ',';

/// How keys that render identically are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyPolicy {
    /// Later entries replace earlier ones with the same key
    #[default]
    Overwrite,
    /// Colliding or ambiguous keys are errors
    Strict,
}

impl KeyPolicy {
    /// Policy for a `strict` flag
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            KeyPolicy::Strict
        } else {
            KeyPolicy::Overwrite
        }
    }

    /// Returns true for the strict policy
    pub fn is_strict(&self) -> bool {
        matches!(self, KeyPolicy::Strict)
    }
}

impl FromStr for KeyPolicy {
    type Err = PunktError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "overwrite" => Ok(Self::Overwrite),
            "strict" => Ok(Self::Strict),
            _ => Err(PunktError::Configuration(format!(
                "Invalid key policy: {s}. Expected 'overwrite' or 'strict'"
            ))),
        }
    }
}

/// Options for a single export
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    /// Text layout of the document
    pub style: OutputStyle,
    /// Handling of identical keys
    pub key_policy: KeyPolicy,
}

impl ExportOptions {
    /// Create export options
    pub fn new(style: OutputStyle, key_policy: KeyPolicy) -> Self {
        Self { style, key_policy }
    }
}

/// Build the synthetic key of a collocation pair
///
/// # Examples
///
/// ```
/// use punkt_export::core::export::collocation_key;
///
/// assert_eq!(collocation_key("new", "york"), "new,york");
/// ```
pub fn collocation_key(first: &str, second: &str) -> String {
    let mut key = String::with_capacity(first.len() + second.len() + 1);
    key.push_str(first);
    key.push(COLLOCATION_SEPARATOR);
    key.push_str(second);
    key
}

/// Transform a parameter set into an export document
///
/// # Errors
///
/// Only fails under [`KeyPolicy::Strict`], with
/// [`PunktError::KeyCollision`] when two inputs render to the same key, or
/// [`PunktError::AmbiguousKey`] when a collocation token contains the
/// separator.
///
/// # Examples
///
/// ```
/// use punkt_export::core::export::{build_document, KeyPolicy};
/// use punkt_export::domain::ParameterSet;
///
/// let params = ParameterSet::builder().collocation("new", "york").build();
/// let doc = build_document(&params, KeyPolicy::Overwrite).unwrap();
/// assert_eq!(doc.colocations["new,york"], 1);
/// ```
pub fn build_document(params: &ParameterSet, policy: KeyPolicy) -> Result<ExportDocument> {
    let mut doc = ExportDocument::default();

    for (token, flags) in &params.ortho_context {
        insert_entry(
            &mut doc.ortho_context,
            ParameterGroup::OrthoContext,
            token.clone(),
            *flags,
            policy,
        )?;
    }

    for (first, second) in &params.collocations {
        insert_entry(
            &mut doc.colocations,
            ParameterGroup::Colocations,
            collocation_key(first, second),
            PRESENT,
            policy,
        )?;
    }

    // Checked after the whole group so a collision is reported first
    if policy.is_strict() {
        if let Some((first, second)) = params.collocations.iter().find(|(first, second)| {
            first.contains(COLLOCATION_SEPARATOR) || second.contains(COLLOCATION_SEPARATOR)
        }) {
            return Err(PunktError::AmbiguousKey {
                group: ParameterGroup::Colocations.to_string(),
                key: collocation_key(first, second),
            });
        }
    }

    for token in &params.abbrev_types {
        insert_entry(
            &mut doc.abbrev_types,
            ParameterGroup::AbbrevTypes,
            token.clone(),
            PRESENT,
            policy,
        )?;
    }

    for token in &params.sent_starters {
        insert_entry(
            &mut doc.sent_starters,
            ParameterGroup::SentStarters,
            token.clone(),
            PRESENT,
            policy,
        )?;
    }

    Ok(doc)
}

fn insert_entry(
    entries: &mut GroupEntries,
    group: ParameterGroup,
    key: String,
    value: i64,
    policy: KeyPolicy,
) -> Result<()> {
    if entries.contains_key(&key) {
        if policy.is_strict() {
            return Err(PunktError::KeyCollision {
                group: group.to_string(),
                key,
            });
        }
        tracing::debug!(group = %group, key = %key, "Duplicate key, keeping later entry");
    }
    entries.insert(key, value);
    Ok(())
}

/// Export a parameter set as JSON text
///
/// This is a pure function: the whole document is built in memory and
/// returned, so callers can write it in a single operation.
///
/// # Examples
///
/// ```
/// use punkt_export::core::export::{export, ExportOptions};
/// use punkt_export::domain::ParameterSet;
///
/// let text = export(&ParameterSet::new(), &ExportOptions::default()).unwrap();
/// assert_eq!(
///     text,
///     r#"{"OrthoContext": {},"Colocations": {},"AbbrevTypes": {},"SentStarters": {}}"#
/// );
/// ```
pub fn export(params: &ParameterSet, options: &ExportOptions) -> Result<String> {
    let doc = build_document(params, options.key_policy)?;
    render(&doc, options.style)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ParameterSet {
        ParameterSet::builder()
            .ortho_context("the", 2)
            .ortho_context("mr", 4)
            .collocation("new", "york")
            .abbrev_type("dr")
            .abbrev_type("mr")
            .sent_starter("however")
            .build()
    }

    #[test]
    fn test_key_policy_from_str() {
        assert_eq!(KeyPolicy::from_str("strict").unwrap(), KeyPolicy::Strict);
        assert_eq!(
            KeyPolicy::from_str("Overwrite").unwrap(),
            KeyPolicy::Overwrite
        );
        assert!(KeyPolicy::from_str("dedupe").is_err());
        assert_eq!(KeyPolicy::from_strict(true), KeyPolicy::Strict);
        assert_eq!(KeyPolicy::default(), KeyPolicy::Overwrite);
    }

    #[test]
    fn test_build_document_groups() {
        let doc = build_document(&sample(), KeyPolicy::Overwrite).unwrap();

        assert_eq!(doc.ortho_context.len(), 2);
        assert_eq!(doc.ortho_context["mr"], 4);
        assert_eq!(doc.colocations["new,york"], 1);
        assert_eq!(doc.abbrev_types["dr"], 1);
        assert_eq!(doc.abbrev_types["mr"], 1);
        assert_eq!(doc.sent_starters["however"], 1);
        assert_eq!(doc.total_entries(), 6);
    }

    #[test]
    fn test_ortho_values_are_not_presence_flags() {
        let params = ParameterSet::builder().ortho_context("the", 0).build();
        let doc = build_document(&params, KeyPolicy::Overwrite).unwrap();
        assert_eq!(doc.ortho_context["the"], 0);
    }

    #[test]
    fn test_collision_overwrites_by_default() {
        let params = ParameterSet::builder()
            .collocation("a,b", "c")
            .collocation("a", "b,c")
            .build();

        let doc = build_document(&params, KeyPolicy::Overwrite).unwrap();
        assert_eq!(doc.colocations.len(), 1);
        assert_eq!(doc.colocations["a,b,c"], 1);
    }

    #[test]
    fn test_collision_is_error_in_strict_mode() {
        let params = ParameterSet::builder()
            .collocation("a,b", "c")
            .collocation("a", "b,c")
            .build();

        let err = build_document(&params, KeyPolicy::Strict).unwrap_err();
        match err {
            PunktError::KeyCollision { group, key } => {
                assert_eq!(group, "Colocations");
                assert_eq!(key, "a,b,c");
            }
            other => panic!("expected KeyCollision, got {other:?}"),
        }
    }

    #[test]
    fn test_ambiguous_key_in_strict_mode() {
        let params = ParameterSet::builder().collocation("1,000", "people").build();

        assert!(build_document(&params, KeyPolicy::Overwrite).is_ok());
        assert!(matches!(
            build_document(&params, KeyPolicy::Strict),
            Err(PunktError::AmbiguousKey { .. })
        ));
    }

    #[test]
    fn test_strict_mode_accepts_clean_input() {
        let doc = build_document(&sample(), KeyPolicy::Strict).unwrap();
        assert_eq!(doc.total_entries(), 6);
    }

    #[test]
    fn test_export_contains_bare_integer() {
        let params = ParameterSet::builder().ortho_context("the", 2).build();
        let text = export(&params, &ExportOptions::default()).unwrap();
        assert!(text.contains(r#""OrthoContext": {"the": 2}"#));
    }

    #[test]
    fn test_export_collocation_key() {
        let params = ParameterSet::builder().collocation("new", "york").build();
        let text = export(&params, &ExportOptions::default()).unwrap();
        assert!(text.contains(r#""Colocations": {"new,york": 1}"#));
    }

    #[test]
    fn test_export_is_deterministic() {
        let options = ExportOptions::default();
        let first = export(&sample(), &options).unwrap();
        let second = export(&sample().clone(), &options).unwrap();
        assert_eq!(first, second);
    }
}
