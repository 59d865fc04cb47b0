//! # Test Assertions
//!
//! Turns a [`ShapeReport`] into a test failure. Every helper panics with the
//! report's failure text, which is how the Rust test harness records a
//! failing test.

use errshape_core::{
    ConventionalError, ErrorTypeDescriptor, ShapeReport, ShapeValidator, TypeDescriptor,
    Violation,
};

/// Fail the calling test unless `descriptor` follows the error convention.
#[track_caller]
pub fn assert_is_error(descriptor: &dyn ErrorTypeDescriptor) {
    assert_is_error_with(&ShapeValidator::new(), descriptor);
}

/// Same as [`assert_is_error`] with a configured validator.
#[track_caller]
pub fn assert_is_error_with(validator: &ShapeValidator, descriptor: &dyn ErrorTypeDescriptor) {
    let report = validator.validate(descriptor);
    tracing::debug!(summary = %report, "Shape assertion evaluated");
    if !report.is_pass() {
        panic!(
            "{} does not follow the error convention:\n{}",
            report.type_name(),
            report.failure_text()
        );
    }
}

/// Fail the calling test unless the Rust type `T` follows the error convention.
#[track_caller]
pub fn assert_type_is_error<T: ConventionalError>() {
    assert_is_error(&TypeDescriptor::of::<T>());
}

/// Fail the calling test unless validation stops on `expected`.
///
/// Returns the report for further inspection.
#[track_caller]
pub fn assert_shape_violation(
    descriptor: &dyn ErrorTypeDescriptor,
    expected: &Violation,
) -> ShapeReport {
    let report = ShapeValidator::new().validate(descriptor);
    let actual = report.first_failure().and_then(|e| e.as_violation());

    if actual != Some(expected) {
        panic!(
            "expected {} to fail with '{}', got: {}",
            report.type_name(),
            expected,
            report
        );
    }
    report
}

/// Fail the calling test unless validation reports an invalid argument.
#[track_caller]
pub fn assert_invalid_argument(descriptor: Option<&dyn ErrorTypeDescriptor>) -> ShapeReport {
    let report = ShapeValidator::new().validate_optional(descriptor);
    let invalid = report
        .first_failure()
        .is_some_and(|e| e.is_invalid_argument());

    if !invalid {
        panic!("expected an invalid argument failure, got: {}", report);
    }
    report
}
