//! Bridge for Rust error types that follow the convention natively.
//!
//! A type implementing [`ConventionalError`] gets a full [`TypeDescriptor`]
//! through [`TypeDescriptor::of`], so it can be run through the same
//! checklist as any hand-built descriptor. Its serialization constructor
//! restores the value from [`SerializedState`] with `serde_json`.

use crate::descriptor::{ConstructorDescriptor, Marker, TypeDescriptor};
use crate::error::ConstructionError;
use crate::instance::{ErrorInstance, SerializedState, SharedError};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// An error type with the four conventional constructors.
///
/// `Default` is the `()` constructor. Serde support stands in for the
/// serialization-capable marker and the serialization constructor.
pub trait ConventionalError:
    ErrorInstance + Default + Serialize + DeserializeOwned + 'static
{
    /// Name reported in validation failures.
    const TYPE_NAME: &'static str;

    /// Build with a message and no cause.
    fn with_message(message: String) -> Self;

    /// Build with a message and the given cause, keeping that exact handle.
    fn with_cause(message: String, cause: SharedError) -> Self;

    /// Capture this error as serialized state.
    fn to_state(&self) -> Result<SerializedState, ConstructionError> {
        SerializedState::capture(Self::TYPE_NAME, self)
    }
}

impl TypeDescriptor {
    /// Describe a [`ConventionalError`] type.
    pub fn of<T: ConventionalError>() -> Self {
        TypeDescriptor::error(T::TYPE_NAME)
            .with_marker(Marker::Serializable)
            .with_constructor(ConstructorDescriptor::serialization_ctor(|state, _| {
                let value: T = state.restore()?;
                Ok(Box::new(value) as Box<dyn ErrorInstance>)
            }))
            .with_constructor(ConstructorDescriptor::default_ctor(|| Box::new(T::default())))
            .with_constructor(ConstructorDescriptor::message_ctor(|message| {
                Box::new(T::with_message(message))
            }))
            .with_constructor(ConstructorDescriptor::message_cause_ctor(|message, cause| {
                Box::new(T::with_cause(message, cause))
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ConstructorArgs, ConstructorSignature, ErrorTypeDescriptor};
    use crate::instance::{GenericError, SerializationContext};
    use serde::Deserialize;
    use std::sync::Arc;

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct QuotaError {
        message: String,
        #[serde(skip)]
        cause: Option<SharedError>,
    }

    impl ErrorInstance for QuotaError {
        fn message(&self) -> &str {
            &self.message
        }

        fn cause(&self) -> Option<&SharedError> {
            self.cause.as_ref()
        }
    }

    impl ConventionalError for QuotaError {
        const TYPE_NAME: &'static str = "QuotaError";

        fn with_message(message: String) -> Self {
            Self {
                message,
                cause: None,
            }
        }

        fn with_cause(message: String, cause: SharedError) -> Self {
            Self {
                message,
                cause: Some(cause),
            }
        }
    }

    #[test]
    fn test_descriptor_of_declares_everything() {
        let descriptor = TypeDescriptor::of::<QuotaError>();

        assert_eq!(descriptor.type_name(), "QuotaError");
        assert!(descriptor.has_marker(Marker::Serializable));
        for signature in ConstructorSignature::ALL {
            let ctor = descriptor.constructor(signature).unwrap();
            let ctor = ctor.unwrap_or_else(|| panic!("missing {signature}"));
            assert_eq!(ctor.visibility(), signature.required_visibility());
        }
    }

    #[test]
    fn test_serialization_ctor_restores_message() {
        let original = QuotaError::with_message("quota exceeded".to_string());
        let state = original.to_state().unwrap();
        assert_eq!(state.type_name(), "QuotaError");

        let descriptor = TypeDescriptor::of::<QuotaError>();
        let ctor = descriptor
            .constructor(ConstructorSignature::Serialization)
            .unwrap()
            .unwrap();
        let restored = ctor
            .invoke(ConstructorArgs::Serialization(
                state,
                SerializationContext::default(),
            ))
            .unwrap();

        assert_eq!(restored.message(), "quota exceeded");
        assert!(restored.cause().is_none());
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct CodeError(String);

    impl ErrorInstance for CodeError {
        fn message(&self) -> &str {
            &self.0
        }

        fn cause(&self) -> Option<&SharedError> {
            None
        }
    }

    impl ConventionalError for CodeError {
        const TYPE_NAME: &'static str = "CodeError";

        fn with_message(message: String) -> Self {
            Self(message)
        }

        fn with_cause(message: String, _cause: SharedError) -> Self {
            Self(message)
        }
    }

    #[test]
    fn test_serialization_ctor_restores_newtype() {
        let state = CodeError::with_message("E42".to_string()).to_state().unwrap();

        let descriptor = TypeDescriptor::of::<CodeError>();
        let restored = descriptor
            .constructor(ConstructorSignature::Serialization)
            .unwrap()
            .unwrap()
            .invoke(ConstructorArgs::Serialization(
                state,
                SerializationContext::default(),
            ))
            .unwrap();

        assert_eq!(restored.message(), "E42");
    }

    #[test]
    fn test_cause_ctor_keeps_handle() {
        let descriptor = TypeDescriptor::of::<QuotaError>();
        let cause = GenericError::new().shared();
        let ctor = descriptor
            .constructor(ConstructorSignature::MessageCause)
            .unwrap()
            .unwrap();

        let instance = ctor
            .invoke(ConstructorArgs::MessageCause(
                "wrapped".to_string(),
                cause.clone(),
            ))
            .unwrap();

        assert!(Arc::ptr_eq(instance.cause().unwrap(), &cause));
    }
}
