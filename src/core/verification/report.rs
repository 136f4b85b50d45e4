//! Verification report structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Verification report for an exported document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    /// When the verification was performed
    pub verified_at: DateTime<Utc>,

    /// Entries per top-level group
    pub group_counts: BTreeMap<String, usize>,

    /// Total number of entries checked
    pub total_verified: usize,

    /// Number of entries that passed
    pub passed: usize,

    /// Number of entries or groups that failed
    pub failed: usize,

    /// List of failed checks with details
    pub failures: Vec<VerificationFailure>,

    /// SHA-256 of the canonical document, when it could be parsed
    pub checksum: Option<String>,

    /// Duration of verification in milliseconds
    pub duration_ms: u64,
}

/// Details of a failed check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationFailure {
    /// Top-level group the failure belongs to
    pub group: String,

    /// Offending entry key, if the failure concerns a single entry
    pub key: Option<String>,

    /// Reason for failure
    pub reason: String,
}

impl VerificationFailure {
    /// Failure of a whole group
    pub fn group(group: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            key: None,
            reason: reason.into(),
        }
    }

    /// Failure of a single entry
    pub fn entry(group: impl Into<String>, key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            key: Some(key.into()),
            reason: reason.into(),
        }
    }
}

impl VerificationReport {
    /// Create a new verification report
    pub fn new() -> Self {
        Self {
            verified_at: Utc::now(),
            group_counts: BTreeMap::new(),
            total_verified: 0,
            passed: 0,
            failed: 0,
            failures: Vec::new(),
            checksum: None,
            duration_ms: 0,
        }
    }

    /// Record a successful entry
    pub fn record_pass(&mut self) {
        self.total_verified += 1;
        self.passed += 1;
    }

    /// Record a failed entry or group
    pub fn record_failure(&mut self, failure: VerificationFailure) {
        if failure.key.is_some() {
            self.total_verified += 1;
        }
        self.failed += 1;
        self.failures.push(failure);
    }

    /// Record the number of entries in a group
    pub fn set_group_count(&mut self, group: impl Into<String>, count: usize) {
        self.group_counts.insert(group.into(), count);
    }

    /// Set the document checksum
    pub fn set_checksum(&mut self, checksum: String) {
        self.checksum = Some(checksum);
    }

    /// Set the duration of verification
    pub fn set_duration(&mut self, duration_ms: u64) {
        self.duration_ms = duration_ms;
    }

    /// Check if all checks passed
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Format the report as a human-readable string
    pub fn format_summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str("📊 Verification Report\n");
        summary.push_str(&format!("  Verified at: {}\n", self.verified_at));
        summary.push_str(&format!("  Duration: {} ms\n", self.duration_ms));
        for (group, count) in &self.group_counts {
            summary.push_str(&format!("  {group}: {count} entries\n"));
        }
        summary.push_str(&format!("  Total verified: {}\n", self.total_verified));
        summary.push_str(&format!("  ✅ Passed: {}\n", self.passed));
        summary.push_str(&format!("  ❌ Failed: {}\n", self.failed));
        if let Some(checksum) = &self.checksum {
            summary.push_str(&format!("  SHA-256: {checksum}\n"));
        }

        if !self.failures.is_empty() {
            summary.push_str("\n❌ Failures:\n");
            for (i, failure) in self.failures.iter().enumerate() {
                match &failure.key {
                    Some(key) => summary.push_str(&format!(
                        "  {}. {} \"{}\": {}\n",
                        i + 1,
                        failure.group,
                        key,
                        failure.reason
                    )),
                    None => summary.push_str(&format!(
                        "  {}. {}: {}\n",
                        i + 1,
                        failure.group,
                        failure.reason
                    )),
                }
            }
        }

        summary
    }
}

impl Default for VerificationReport {
    fn default() -> Self {
        Self::new()
    }
}
