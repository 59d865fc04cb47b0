//! # errshape
//!
//! Checks that error types follow the error convention: they descend from the
//! base error type, are marked serializable, declare the default, message,
//! message+cause and serialization constructors, and those constructors keep
//! the message and the cause they are given.
//!
//! - [`errshape_core`]: descriptors, the validator and its report
//! - [`errshape_testing`]: assertions, macros and fixtures for test suites

pub use errshape_core;
pub use errshape_testing;

pub use errshape_core::{ShapeReport, ShapeValidator, TypeDescriptor, ValidatorConfig};
pub use errshape_testing::{assert_is_error, assert_type_is_error};
