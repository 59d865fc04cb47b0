//! # errshape core
//!
//! Checks that an error type follows the error convention: it descends from
//! the base error type, is marked serializable, declares the four
//! conventional constructors and those constructors propagate message and
//! cause correctly.
//!
//! Types are inspected through [`ErrorTypeDescriptor`]; constructors are
//! invoked through factory delegates; results come back as a [`ShapeReport`].
//!
//! ```rust
//! use errshape_core::{ShapeValidator, TypeDescriptor, Violation};
//!
//! let descriptor = TypeDescriptor::new("Widget");
//! let error = ShapeValidator::new().check(&descriptor).unwrap_err();
//! assert_eq!(error.as_violation(), Some(&Violation::NotBaseErrorDescendant));
//! ```

pub mod config;
pub mod conventional;
pub mod descriptor;
pub mod error;
pub mod instance;
pub mod report;
pub mod validator;

pub use config::{DEFAULT_PROBE_MESSAGE, FailurePolicy, ValidatorConfig};
pub use conventional::ConventionalError;
pub use descriptor::{
    ConstructionResult, ConstructorArgs, ConstructorDescriptor, ConstructorSignature,
    ErrorTypeDescriptor, Factory, Marker, ParameterKind, TypeDescriptor, Visibility,
};
pub use error::{ConfigError, ConstructionError, DescriptorError, ShapeError, Violation};
pub use instance::{
    BASE_ERROR_TYPE, ContextPurpose, ErrorInstance, GenericError, SerializationContext,
    SerializedState, SharedError,
};
pub use report::{Check, CheckRecord, CheckStatus, ShapeReport};
pub use validator::{ABSENT_TYPE_NAME, ShapeValidator};
