//! Domain models and types for punkt-export.
//!
//! The domain layer provides:
//! - **Input contract** ([`ParameterSet`]) produced by parameter sources
//! - **Output model** ([`ExportDocument`], [`ParameterGroup`])
//! - **Error types** ([`PunktError`], [`LoadError`])
//! - **Result type alias** ([`Result`])
//!
//! # Example
//!
//! ```rust
//! use punkt_export::domain::{ParameterGroup, ParameterSet};
//!
//! let params = ParameterSet::builder().abbrev_type("dr").build();
//! assert_eq!(params.abbrev_types.len(), 1);
//! assert_eq!(ParameterGroup::AbbrevTypes.key(), "AbbrevTypes");
//! ```

pub mod document;
pub mod errors;
pub mod params;
pub mod result;

// Re-export commonly used types for convenience
pub use document::{ExportDocument, GroupEntries, ParameterGroup, PRESENT};
pub use errors::{LoadError, PunktError};
pub use params::{Collocation, ParameterSet, ParameterSetBuilder};
pub use result::Result;
