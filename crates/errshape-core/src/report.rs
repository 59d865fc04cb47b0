//! Validation report
//!
//! A [`ShapeReport`] lists the checks that ran, in order, with their status.
//! It passes when no check failed.

use crate::error::ShapeError;
use std::fmt;

/// The fixed checklist, in the order checks run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Check {
    NonNullInput,
    Inheritance,
    SerializableMarker,
    SerializationConstructor,
    DefaultConstructor,
    MessageConstructor,
    MessageCauseConstructor,
    DefaultBehavior,
    MessageBehavior,
    CauseBehavior,
}

impl Check {
    pub const ALL: [Check; 10] = [
        Check::NonNullInput,
        Check::Inheritance,
        Check::SerializableMarker,
        Check::SerializationConstructor,
        Check::DefaultConstructor,
        Check::MessageConstructor,
        Check::MessageCauseConstructor,
        Check::DefaultBehavior,
        Check::MessageBehavior,
        Check::CauseBehavior,
    ];

    /// One-based position in the checklist.
    pub fn number(&self) -> usize {
        *self as usize + 1
    }

    pub fn description(&self) -> &'static str {
        match self {
            Check::NonNullInput => "descriptor is present and configuration is valid",
            Check::Inheritance => "inherits from the base error type",
            Check::SerializableMarker => "carries the serializable marker",
            Check::SerializationConstructor => "declares a serialization constructor",
            Check::DefaultConstructor => "declares a default constructor",
            Check::MessageConstructor => "declares a message constructor",
            Check::MessageCauseConstructor => "declares a message+cause constructor",
            Check::DefaultBehavior => "default constructor leaves the cause absent",
            Check::MessageBehavior => "message constructor propagates the message",
            Check::CauseBehavior => "message+cause constructor propagates message and cause",
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.number(), self.description())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Passed,
    Skipped,
    Failed(ShapeError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRecord {
    pub check: Check,
    pub status: CheckStatus,
}

/// Outcome of validating one error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeReport {
    type_name: String,
    records: Vec<CheckRecord>,
}

impl ShapeReport {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            records: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, check: Check, status: CheckStatus) {
        self.records.push(CheckRecord { check, status });
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn records(&self) -> &[CheckRecord] {
        &self.records
    }

    pub fn status_of(&self, check: Check) -> Option<&CheckStatus> {
        self.records
            .iter()
            .find(|r| r.check == check)
            .map(|r| &r.status)
    }

    pub fn is_pass(&self) -> bool {
        self.failures().next().is_none()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ShapeError> {
        self.records.iter().filter_map(|r| match &r.status {
            CheckStatus::Failed(error) => Some(error),
            _ => None,
        })
    }

    pub fn first_failure(&self) -> Option<&ShapeError> {
        self.failures().next()
    }

    pub fn passed_count(&self) -> usize {
        self.count(|s| matches!(s, CheckStatus::Passed))
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|s| matches!(s, CheckStatus::Skipped))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|s| matches!(s, CheckStatus::Failed(_)))
    }

    fn count(&self, predicate: impl Fn(&CheckStatus) -> bool) -> usize {
        self.records.iter().filter(|r| predicate(&r.status)).count()
    }

    /// `Ok` on pass, otherwise the first failure.
    pub fn into_result(self) -> Result<(), ShapeError> {
        match self.records.into_iter().find_map(|r| match r.status {
            CheckStatus::Failed(error) => Some(error),
            _ => None,
        }) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Multi-line description of every failure, for test failure output.
    pub fn failure_text(&self) -> String {
        self.records
            .iter()
            .filter_map(|r| match &r.status {
                CheckStatus::Failed(error) => Some(format!("  {}: {}", r.check, error)),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn summary(&self) -> String {
        let status = if self.is_pass() { "PASS" } else { "FAIL" };
        let counts = format!(
            "{} passed, {} failed, {} skipped",
            self.passed_count(),
            self.failed_count(),
            self.skipped_count()
        );

        match self.first_failure() {
            Some(error) => format!("[{}] {} ({}) - {}", status, self.type_name, counts, error),
            None => format!("[{}] {} ({})", status, self.type_name, counts),
        }
    }
}

impl fmt::Display for ShapeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Violation;

    fn failing_report() -> ShapeReport {
        let mut report = ShapeReport::new("IoError");
        report.record(Check::NonNullInput, CheckStatus::Passed);
        report.record(Check::Inheritance, CheckStatus::Passed);
        report.record(
            Check::SerializableMarker,
            CheckStatus::Failed(ShapeError::violation(
                "IoError",
                Violation::NotSerializable,
            )),
        );
        report.record(Check::SerializationConstructor, CheckStatus::Skipped);
        report.record(
            Check::DefaultBehavior,
            CheckStatus::Failed(ShapeError::violation(
                "IoError",
                Violation::DefaultCausePresent,
            )),
        );
        report
    }

    #[test]
    fn test_check_numbering_follows_order() {
        for (index, check) in Check::ALL.iter().enumerate() {
            assert_eq!(check.number(), index + 1);
        }
        assert_eq!(Check::CauseBehavior.number(), 10);
    }

    #[test]
    fn test_empty_report_passes() {
        let report = ShapeReport::new("IoError");
        assert!(report.is_pass());
        assert!(report.clone().into_result().is_ok());
        assert!(report.summary().starts_with("[PASS] IoError"));
    }

    #[test]
    fn test_counts_and_first_failure() {
        let report = failing_report();

        assert!(!report.is_pass());
        assert_eq!(report.passed_count(), 2);
        assert_eq!(report.failed_count(), 2);
        assert_eq!(report.skipped_count(), 1);
        assert_eq!(
            report.first_failure().and_then(|e| e.as_violation()),
            Some(&Violation::NotSerializable)
        );
        assert_eq!(
            report.status_of(Check::SerializationConstructor),
            Some(&CheckStatus::Skipped)
        );
        assert_eq!(report.status_of(Check::CauseBehavior), None);
    }

    #[test]
    fn test_into_result_returns_first_failure() {
        let error = failing_report().into_result().unwrap_err();
        assert_eq!(error.as_violation(), Some(&Violation::NotSerializable));
    }

    #[test]
    fn test_failure_text_lists_every_failure() {
        let text = failing_report().failure_text();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("#3"));
        assert!(lines[0].contains("is not serializable"));
        assert!(lines[1].contains("#8"));
    }
}
