//! # errshape Testing
//!
//! Adapter between the shape validator and the Rust test harness, plus
//! fixture descriptors for every way an error type can break the convention.
//!
//! ## Components
//!
//! - **Assertions**: panic with the validator's failure text
//! - **Macros**: `assert_error_shape!`, `assert_error_type!`, `assert_violation!`
//! - **Fixtures**: a conforming error type and one descriptor per violation
//! - **Logging**: `tracing` subscriber setup for tests
//!
//! ## Usage
//!
//! ```rust
//! use errshape_testing::{assert_error_shape, assert_violation, fixtures, Violation};
//!
//! assert_error_shape!(fixtures::conforming());
//! assert_violation!(fixtures::not_serializable(), Violation::NotSerializable);
//! ```

/// Assertion functions that fail the calling test
pub mod assertions;
/// Fixture descriptors with known shapes
pub mod fixtures;
/// Test logging setup
pub mod logging;
/// Convenient assertion macros
pub mod macros;

pub use assertions::{
    assert_invalid_argument, assert_is_error, assert_is_error_with, assert_shape_violation,
    assert_type_is_error,
};
pub use fixtures::{BrokenLookup, FixtureError};
pub use logging::init_test_logging;

// Re-export commonly used types from errshape-core for convenience
pub use errshape_core::{
    Check, ConstructorSignature, ErrorTypeDescriptor, FailurePolicy, ShapeError, ShapeReport,
    ShapeValidator, TypeDescriptor, ValidatorConfig, Violation,
};
