//! Punkt parameter set
//!
//! The statistical parameters a trained Punkt sentence tokenizer carries.
//! This is the public data contract every parameter source produces; the
//! exporter only ever reads it.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A token pair that tends to straddle a sentence boundary without ending it
pub type Collocation = (String, String);

/// Trained tokenizer parameters
///
/// All collections are ordered so that iterating them, and every document
/// derived from them, is reproducible.
///
/// # Examples
///
/// ```
/// use punkt_export::domain::ParameterSet;
///
/// let params = ParameterSet::builder()
///     .ortho_context("the", 2)
///     .collocation("new", "york")
///     .abbrev_type("dr")
///     .sent_starter("however")
///     .build();
///
/// assert_eq!(params.ortho_context["the"], 2);
/// assert_eq!(params.len(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSet {
    /// Orthographic context bit flags per token
    pub ortho_context: BTreeMap<String, i64>,

    /// Collocation pairs
    pub collocations: BTreeSet<Collocation>,

    /// Abbreviation types (lowercase, without the trailing period)
    pub abbrev_types: BTreeSet<String>,

    /// Frequent sentence starters
    pub sent_starters: BTreeSet<String>,
}

impl ParameterSet {
    /// Creates an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a builder for constructing parameter sets
    pub fn builder() -> ParameterSetBuilder {
        ParameterSetBuilder::default()
    }

    /// Total number of entries across all four collections
    pub fn len(&self) -> usize {
        self.ortho_context.len()
            + self.collocations.len()
            + self.abbrev_types.len()
            + self.sent_starters.len()
    }

    /// Returns true if all four collections are empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builder for constructing ParameterSet instances
#[derive(Debug, Default)]
pub struct ParameterSetBuilder {
    params: ParameterSet,
}

impl ParameterSetBuilder {
    /// Creates a new ParameterSetBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the orthographic context flags of a token
    pub fn ortho_context(mut self, token: impl Into<String>, flags: i64) -> Self {
        self.params.ortho_context.insert(token.into(), flags);
        self
    }

    /// Adds a collocation pair
    pub fn collocation(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.params
            .collocations
            .insert((first.into(), second.into()));
        self
    }

    /// Adds an abbreviation type
    pub fn abbrev_type(mut self, token: impl Into<String>) -> Self {
        self.params.abbrev_types.insert(token.into());
        self
    }

    /// Adds a sentence starter
    pub fn sent_starter(mut self, token: impl Into<String>) -> Self {
        self.params.sent_starters.insert(token.into());
        self
    }

    /// Builds the parameter set
    pub fn build(self) -> ParameterSet {
        self.params
    }
}
