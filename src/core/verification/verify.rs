//! Verification of exported documents
//!
//! Checks an exported document against the fixed document schema, and
//! optionally against the parameter set it was exported from.

use super::checksum::calculate_checksum;
use super::report::{VerificationFailure, VerificationReport};
use crate::core::export::{build_document, KeyPolicy, COLLOCATION_SEPARATOR};
use crate::domain::{ExportDocument, ParameterGroup, ParameterSet, PunktError, Result, PRESENT};
use serde_json::Value;
use std::time::Instant;

/// Verify the structure of an exported document
///
/// Every group must be present and map keys to integers, set-valued groups
/// may only carry the presence flag, and collocation keys must contain the
/// separator. Violations are collected in the report rather than returned
/// as errors.
///
/// # Errors
///
/// Returns [`PunktError::Validation`] if the text is not a JSON object at all.
///
/// # Examples
///
/// ```
/// use punkt_export::core::verification::verify_document;
///
/// let text = r#"{"OrthoContext": {"the": 2},"Colocations": {"new,york": 1},"AbbrevTypes": {},"SentStarters": {}}"#;
/// let report = verify_document(text).unwrap();
/// assert!(report.is_success());
/// assert_eq!(report.passed, 2);
/// ```
pub fn verify_document(text: &str) -> Result<VerificationReport> {
    let start = Instant::now();
    let mut report = VerificationReport::new();

    let value: Value = serde_json::from_str(text)
        .map_err(|e| PunktError::Validation(format!("Document is not valid JSON: {e}")))?;

    let Value::Object(top) = &value else {
        return Err(PunktError::Validation(
            "Document must be a JSON object".to_string(),
        ));
    };

    for group in ParameterGroup::ALL {
        let Some(entries) = top.get(group.key()) else {
            report.record_failure(VerificationFailure::group(group.key(), "group is missing"));
            continue;
        };
        let Value::Object(entries) = entries else {
            report.record_failure(VerificationFailure::group(
                group.key(),
                "group must be an object",
            ));
            continue;
        };

        report.set_group_count(group.key(), entries.len());
        for (key, entry) in entries {
            match check_entry(group, key, entry) {
                Some(reason) => {
                    report.record_failure(VerificationFailure::entry(group.key(), key, reason))
                }
                None => report.record_pass(),
            }
        }
    }

    for key in top.keys() {
        if !ParameterGroup::ALL.iter().any(|g| g.key() == key) {
            report.record_failure(VerificationFailure::group(
                key.as_str(),
                "unexpected top-level key",
            ));
        }
    }

    report.set_checksum(calculate_checksum(&value)?);
    report.set_duration(start.elapsed().as_millis() as u64);

    tracing::info!(
        passed = report.passed,
        failed = report.failed,
        duration_ms = report.duration_ms,
        "Verification completed"
    );

    Ok(report)
}

fn check_entry(group: ParameterGroup, key: &str, entry: &Value) -> Option<String> {
    let Some(value) = entry.as_i64() else {
        return Some(format!("value must be an integer, found {entry}"));
    };

    if group.is_presence_set() && value != PRESENT {
        return Some(format!("expected presence flag {PRESENT}, found {value}"));
    }

    if group == ParameterGroup::Colocations && !key.contains(COLLOCATION_SEPARATOR) {
        return Some(format!("key has no '{COLLOCATION_SEPARATOR}' separator"));
    }

    None
}

/// Verify that a document holds exactly what `params` exports to
///
/// The document is parsed and compared group by group, as sets of key/value
/// pairs, with the result of [`build_document`] under the same policy.
///
/// # Errors
///
/// Returns an error if the text does not parse as a document, or if
/// building the expected document fails under a strict policy.
pub fn verify_roundtrip(
    params: &ParameterSet,
    text: &str,
    policy: KeyPolicy,
) -> Result<VerificationReport> {
    let start = Instant::now();
    let mut report = VerificationReport::new();

    let actual: ExportDocument = serde_json::from_str(text)
        .map_err(|e| PunktError::Validation(format!("Document does not parse: {e}")))?;
    let expected = build_document(params, policy)?;

    for group in ParameterGroup::ALL {
        let want = expected.group(group);
        let have = actual.group(group);
        report.set_group_count(group.key(), have.len());

        for (key, value) in want {
            match have.get(key) {
                Some(found) if found == value => report.record_pass(),
                Some(found) => report.record_failure(VerificationFailure::entry(
                    group.key(),
                    key.as_str(),
                    format!("expected {value}, found {found}"),
                )),
                None => report.record_failure(VerificationFailure::entry(
                    group.key(),
                    key.as_str(),
                    "entry is missing",
                )),
            }
        }

        for key in have.keys().filter(|k| !want.contains_key(*k)) {
            report.record_failure(VerificationFailure::entry(
                group.key(),
                key.as_str(),
                "entry is not in the parameters",
            ));
        }
    }

    report.set_checksum(calculate_checksum(&serde_json::to_value(&actual)?)?);
    report.set_duration(start.elapsed().as_millis() as u64);
    Ok(report)
}
