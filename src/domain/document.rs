//! Exported document model
//!
//! The JSON document a parameter set is exported to: one object with four
//! fixed top-level keys, each mapping string keys to integers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Value written for members of set-valued groups
///
/// It marks presence only and is never a count.
pub const PRESENT: i64 = 1;

/// Entries of a single document group
pub type GroupEntries = BTreeMap<String, i64>;

/// Top-level groups of an exported document, in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParameterGroup {
    /// Orthographic context flags
    OrthoContext,
    /// Collocation pairs joined with a comma
    Colocations,
    /// Abbreviation types
    AbbrevTypes,
    /// Sentence starters
    SentStarters,
}

impl ParameterGroup {
    /// All groups in document order
    pub const ALL: [ParameterGroup; 4] = [
        ParameterGroup::OrthoContext,
        ParameterGroup::Colocations,
        ParameterGroup::AbbrevTypes,
        ParameterGroup::SentStarters,
    ];

    /// The top-level JSON key of this group
    pub fn key(&self) -> &'static str {
        match self {
            ParameterGroup::OrthoContext => "OrthoContext",
            ParameterGroup::Colocations => "Colocations",
            ParameterGroup::AbbrevTypes => "AbbrevTypes",
            ParameterGroup::SentStarters => "SentStarters",
        }
    }

    /// Whether every value in this group is the presence flag
    pub fn is_presence_set(&self) -> bool {
        !matches!(self, ParameterGroup::OrthoContext)
    }
}

impl fmt::Display for ParameterGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// An exported parameter document
///
/// Field order matches the fixed top-level key order of the output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    #[serde(rename = "OrthoContext")]
    pub ortho_context: GroupEntries,

    #[serde(rename = "Colocations")]
    pub colocations: GroupEntries,

    #[serde(rename = "AbbrevTypes")]
    pub abbrev_types: GroupEntries,

    #[serde(rename = "SentStarters")]
    pub sent_starters: GroupEntries,
}

impl ExportDocument {
    /// Returns the entries of a group
    pub fn group(&self, group: ParameterGroup) -> &GroupEntries {
        match group {
            ParameterGroup::OrthoContext => &self.ortho_context,
            ParameterGroup::Colocations => &self.colocations,
            ParameterGroup::AbbrevTypes => &self.abbrev_types,
            ParameterGroup::SentStarters => &self.sent_starters,
        }
    }

    /// Returns the entries of a group for modification
    pub fn group_mut(&mut self, group: ParameterGroup) -> &mut GroupEntries {
        match group {
            ParameterGroup::OrthoContext => &mut self.ortho_context,
            ParameterGroup::Colocations => &mut self.colocations,
            ParameterGroup::AbbrevTypes => &mut self.abbrev_types,
            ParameterGroup::SentStarters => &mut self.sent_starters,
        }
    }

    /// Total number of entries across all groups
    pub fn total_entries(&self) -> usize {
        ParameterGroup::ALL
            .iter()
            .map(|g| self.group(*g).len())
            .sum()
    }
}
