//! External system integrations for punkt-export.
//!
//! - [`source`] - Readers for serialized tokenizer parameters
//!
//! # Design Pattern
//!
//! Adapters isolate the serialized formats behind the
//! [`source::ParamSource`] trait, so the exporter only ever sees a
//! [`crate::domain::ParameterSet`].
//!
//! ```rust,no_run
//! use punkt_export::adapters::source::{load_parameters, SourceFormat};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let params = load_parameters("english.pickle", Some(SourceFormat::Pickle))?;
//! println!("{} sentence starters", params.sent_starters.len());
//! # Ok(())
//! # }
//! ```

pub mod source;
