//! Verification of exported documents
//!
//! Re-reads exported text, checks it against the document schema, and
//! reports entry counts and a content checksum.

pub mod checksum;
pub mod report;
pub mod verify;

pub use checksum::{calculate_checksum, calculate_checksum_bytes};
pub use report::{VerificationFailure, VerificationReport};
pub use verify::{verify_document, verify_roundtrip};
