//! Core logic for punkt-export.
//!
//! # Modules
//!
//! - [`export`] - Transformation, rendering and batch conversion
//! - [`verification`] - Schema checks and checksums for exported documents
//!
//! # Example
//!
//! ```rust
//! use punkt_export::core::export::{export, ExportOptions};
//! use punkt_export::core::verification::verify_document;
//! use punkt_export::domain::ParameterSet;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let params = ParameterSet::builder().abbrev_type("dr").build();
//! let text = export(&params, &ExportOptions::default())?;
//!
//! let report = verify_document(&text)?;
//! assert!(report.is_success());
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod verification;
