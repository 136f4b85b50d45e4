//! # punkt-export
//!
//! Exports the learned parameters of a Punkt sentence tokenizer as a
//! language-neutral JSON document, so that sentence segmenters written in
//! other languages can reuse models trained elsewhere.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Export transformation, rendering, batch conversion and verification
//! - [`adapters`] - Parameter sources (pickle, JSON, MessagePack)
//! - [`domain`] - Parameter set, document model and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use punkt_export::adapters::source::load_parameters;
//! use punkt_export::core::export::{export, ExportOptions};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let params = load_parameters("english.pickle", None)?;
//!     let text = export(&params, &ExportOptions::default())?;
//!     println!("{text}");
//!     Ok(())
//! }
//! ```
//!
//! ## Document Layout
//!
//! The document has four groups in a fixed order. `OrthoContext` keeps the
//! orthographic flags; the other groups are sets, so every key maps to `1`.
//! Collocation pairs are joined with a comma.
//!
//! ```rust
//! use punkt_export::core::export::{export, ExportOptions};
//! use punkt_export::domain::ParameterSet;
//!
//! let params = ParameterSet::builder()
//!     .ortho_context("the", 2)
//!     .collocation("new", "york")
//!     .build();
//! let text = export(&params, &ExportOptions::default()).unwrap();
//! assert_eq!(
//!     text,
//!     r#"{"OrthoContext": {"the": 2},"Colocations": {"new,york": 1},"AbbrevTypes": {},"SentStarters": {}}"#
//! );
//! ```
//!
//! ## Error Handling
//!
//! Library functions return [`domain::Result`], whose error type is
//! [`domain::PunktError`]. Loading failures are [`domain::LoadError`] values.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
