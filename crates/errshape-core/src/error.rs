//! Error Types
//!
//! Failures produced while validating an error type, plus the errors raised
//! by the collaborators the validator talks to (descriptors, factories and
//! configuration loading).

use crate::descriptor::ConstructorSignature;
use std::fmt;
use thiserror::Error;

/// Failure reported by a shape validation run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// The descriptor is absent or could not be queried.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// The examined type does not follow the error convention.
    #[error("{type_name} {violation}")]
    ShapeViolation {
        type_name: String,
        violation: Violation,
    },
}

impl ShapeError {
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        ShapeError::InvalidArgument {
            reason: reason.into(),
        }
    }

    pub fn violation(type_name: impl Into<String>, violation: Violation) -> Self {
        ShapeError::ShapeViolation {
            type_name: type_name.into(),
            violation,
        }
    }

    /// The violation carried by this error, if it is a shape violation.
    pub fn as_violation(&self) -> Option<&Violation> {
        match self {
            ShapeError::ShapeViolation { violation, .. } => Some(violation),
            ShapeError::InvalidArgument { .. } => None,
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ShapeError::InvalidArgument { .. })
    }
}

/// A specific expectation of the error convention that was not met.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Neither the base error type nor one of its descendants.
    NotBaseErrorDescendant,
    /// The serialization-capable marker is missing.
    NotSerializable,
    /// No constructor with the signature and visibility the convention requires.
    MissingConstructor(ConstructorSignature),
    /// A required constructor exists but failed to produce an instance.
    ConstructionFailed {
        signature: ConstructorSignature,
        reason: String,
    },
    /// The default constructor left a cause on the new instance.
    DefaultCausePresent,
    /// The instance message does not contain the message passed in.
    MessageNotPropagated {
        signature: ConstructorSignature,
        expected: String,
        actual: String,
    },
    /// The message-only constructor left a cause on the new instance.
    MessageCausePresent,
    /// The message+cause constructor dropped the cause.
    CauseDropped,
    /// The message+cause constructor stored a different object than the cause passed in.
    CauseNotPreserved,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::NotBaseErrorDescendant => {
                write!(f, "does not inherit from base error type")
            }
            Violation::NotSerializable => write!(f, "is not serializable"),
            Violation::MissingConstructor(signature) => write!(
                f,
                "has no {} constructor {}",
                signature.required_visibility(),
                signature
            ),
            Violation::ConstructionFailed { signature, reason } => {
                write!(f, "constructor {} failed: {}", signature, reason)
            }
            Violation::DefaultCausePresent => {
                write!(f, "default constructor must leave the cause absent")
            }
            Violation::MessageNotPropagated {
                signature,
                expected,
                actual,
            } => write!(
                f,
                "constructor {} did not propagate the message: expected it to contain '{}', got '{}'",
                signature, expected, actual
            ),
            Violation::MessageCausePresent => {
                write!(f, "message constructor must leave the cause absent")
            }
            Violation::CauseDropped => {
                write!(f, "message+cause constructor dropped the cause")
            }
            Violation::CauseNotPreserved => write!(
                f,
                "message+cause constructor must keep the same cause instance that was passed in"
            ),
        }
    }
}

/// Raised by a descriptor when a constructor query cannot be answered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("constructor lookup for {signature} failed: {reason}")]
    LookupFailed {
        signature: ConstructorSignature,
        reason: String,
    },
}

/// Raised by a constructor factory that could not build an instance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error("constructor {expected} invoked with arguments for {actual}")]
    SignatureMismatch {
        expected: ConstructorSignature,
        actual: ConstructorSignature,
    },

    #[error("failed to restore from serialized state: {0}")]
    Deserialization(String),

    #[error("{0}")]
    Failed(String),
}

impl From<serde_json::Error> for ConstructionError {
    fn from(err: serde_json::Error) -> Self {
        ConstructionError::Deserialization(err.to_string())
    }
}

/// Errors that can occur while loading validator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
