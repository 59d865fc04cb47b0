//! Error instances and serialized state.
//!
//! Instances produced by constructor factories are inspected through the
//! [`ErrorInstance`] trait. Causes are shared as `Arc<dyn ErrorInstance>` so
//! that the validator can tell "the same object" apart from "an equal copy".

use crate::error::ConstructionError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Name of the platform's base error type.
pub const BASE_ERROR_TYPE: &str = "Error";

/// Shared handle to an error used as a cause.
pub type SharedError = Arc<dyn ErrorInstance>;

/// An instantiated error value.
pub trait ErrorInstance: fmt::Debug + Send + Sync {
    /// Human-readable message of the error.
    fn message(&self) -> &str;

    /// The wrapped inner error, if any.
    fn cause(&self) -> Option<&SharedError>;
}

/// The platform's plain base error.
///
/// Used as the fresh cause handed to message+cause constructors.
#[derive(Debug, Clone)]
pub struct GenericError {
    message: String,
    cause: Option<SharedError>,
}

impl GenericError {
    pub const DEFAULT_MESSAGE: &'static str = "Error of type 'Error' was raised.";

    pub fn new() -> Self {
        Self {
            message: Self::DEFAULT_MESSAGE.to_string(),
            cause: None,
        }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_cause(message: impl Into<String>, cause: SharedError) -> Self {
        Self {
            message: message.into(),
            cause: Some(cause),
        }
    }

    /// Wrap into a shared handle suitable for use as a cause.
    pub fn shared(self) -> SharedError {
        Arc::new(self)
    }
}

impl Default for GenericError {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorInstance for GenericError {
    fn message(&self) -> &str {
        &self.message
    }

    fn cause(&self) -> Option<&SharedError> {
        self.cause.as_ref()
    }
}

impl fmt::Display for GenericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for GenericError {}

/// Field holding a captured value that is not a JSON object.
const SCALAR_FIELD: &str = "value";

/// Serialized form of an error, handed to the serialization constructor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SerializedState {
    type_name: String,
    fields: Map<String, Value>,
    /// Set when the captured value was stored under [`SCALAR_FIELD`].
    #[serde(default)]
    scalar: bool,
}

impl SerializedState {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Map::new(),
            scalar: false,
        }
    }

    /// Capture a serializable value as state.
    ///
    /// Struct fields become state fields. Any other value (newtype, tuple,
    /// unit variant) is kept whole under a single `value` field.
    pub fn capture<T: Serialize>(
        type_name: impl Into<String>,
        value: &T,
    ) -> Result<Self, ConstructionError> {
        let (fields, scalar) = match serde_json::to_value(value)? {
            Value::Object(fields) => (fields, false),
            other => {
                let mut fields = Map::new();
                fields.insert(SCALAR_FIELD.to_string(), other);
                (fields, true)
            }
        };

        Ok(Self {
            type_name: type_name.into(),
            fields,
            scalar,
        })
    }

    /// Rebuild a value previously captured with [`SerializedState::capture`].
    pub fn restore<T: DeserializeOwned>(&self) -> Result<T, ConstructionError> {
        let value = if self.scalar {
            self.fields.get(SCALAR_FIELD).cloned().ok_or_else(|| {
                ConstructionError::Deserialization(format!(
                    "state of {} has no '{SCALAR_FIELD}' field",
                    self.type_name
                ))
            })?
        } else {
            Value::Object(self.fields.clone())
        };
        Ok(serde_json::from_value(value)?)
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn add_value(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get_value(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn get_string(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Why a value is being serialized or restored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextPurpose {
    #[default]
    Persistence,
    Remoting,
    Clone,
    Other,
}

/// Context passed alongside [`SerializedState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SerializationContext {
    pub purpose: ContextPurpose,
}

impl SerializationContext {
    pub fn new(purpose: ContextPurpose) -> Self {
        Self { purpose }
    }
}
