//! # Fixture Error Types
//!
//! Descriptors with predictable shapes: one that follows the convention and
//! one per way of breaking it. Each fixture starts from [`conforming`] and
//! changes exactly one thing, so a failing validation points at that thing.

use errshape_core::{
    ConstructionError, ConstructorDescriptor, ConstructorSignature, ConventionalError,
    DescriptorError, ErrorInstance, ErrorTypeDescriptor, GenericError, Marker, SharedError,
    TypeDescriptor, Visibility,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message stored by [`ignores_message`] regardless of its argument.
pub const FIXED_MESSAGE: &str = "fixed";

/// A hand-written error type that follows the convention.
#[derive(Debug, Default, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct FixtureError {
    message: String,
    #[serde(skip)]
    cause: Option<SharedError>,
}

impl ErrorInstance for FixtureError {
    fn message(&self) -> &str {
        &self.message
    }

    fn cause(&self) -> Option<&SharedError> {
        self.cause.as_ref()
    }
}

impl ConventionalError for FixtureError {
    const TYPE_NAME: &'static str = "FixtureError";

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

fn boxed(error: FixtureError) -> Box<dyn ErrorInstance> {
    Box::new(error)
}

/// Follows the convention in every respect.
pub fn conforming() -> TypeDescriptor {
    TypeDescriptor::of::<FixtureError>()
}

/// Declares every conventional constructor but is not an error type.
pub fn not_an_error() -> TypeDescriptor {
    conforming()
        .constructors()
        .cloned()
        .fold(
            TypeDescriptor::new("Widget")
                .with_base("Object")
                .with_marker(Marker::Serializable),
            |descriptor, ctor| descriptor.with_constructor(ctor),
        )
}

/// Lacks the serializable marker.
pub fn not_serializable() -> TypeDescriptor {
    conforming().without_marker(Marker::Serializable)
}

/// Lacks the constructor with the given signature.
pub fn missing(signature: ConstructorSignature) -> TypeDescriptor {
    conforming().without_constructor(signature)
}

/// Declares its serialization constructor public.
pub fn public_serialization_constructor() -> TypeDescriptor {
    let descriptor = conforming();
    let ctor = descriptor
        .constructors()
        .find(|c| c.signature() == ConstructorSignature::Serialization)
        .cloned()
        .expect("FixtureError declares a serialization constructor");

    descriptor.with_constructor(ctor.with_visibility(Visibility::Public))
}

/// Message constructor always stores [`FIXED_MESSAGE`].
pub fn ignores_message() -> TypeDescriptor {
    conforming().with_constructor(ConstructorDescriptor::message_ctor(|_| {
        boxed(FixtureError::with_message(FIXED_MESSAGE.to_string()))
    }))
}

/// Message+cause constructor stores a copy of the cause instead of the cause itself.
pub fn copies_cause() -> TypeDescriptor {
    conforming().with_constructor(ConstructorDescriptor::message_cause_ctor(
        |message, cause| {
            let copy = GenericError::with_message(cause.message()).shared();
            boxed(FixtureError::with_cause(message, copy))
        },
    ))
}

/// Default constructor sets a placeholder cause.
pub fn placeholder_default_cause() -> TypeDescriptor {
    conforming().with_constructor(ConstructorDescriptor::default_ctor(|| {
        boxed(FixtureError::with_cause(
            String::new(),
            GenericError::with_message("placeholder").shared(),
        ))
    }))
}

/// Message-only constructor attaches a cause.
pub fn message_ctor_sets_cause() -> TypeDescriptor {
    conforming().with_constructor(ConstructorDescriptor::message_ctor(|message| {
        boxed(FixtureError::with_cause(message, GenericError::new().shared()))
    }))
}

/// The constructor with the given signature fails when invoked.
pub fn failing_constructor(signature: ConstructorSignature) -> TypeDescriptor {
    conforming().with_constructor(ConstructorDescriptor::new(
        signature,
        signature.required_visibility(),
        |_| Err(ConstructionError::Failed("fixture constructor failure".to_string())),
    ))
}

/// A descriptor whose constructor lookups always fail.
pub fn broken_lookup() -> BrokenLookup {
    BrokenLookup {
        inner: conforming(),
    }
}

/// Answers type and marker queries like [`conforming`] but cannot look up constructors.
#[derive(Debug, Clone)]
pub struct BrokenLookup {
    inner: TypeDescriptor,
}

impl ErrorTypeDescriptor for BrokenLookup {
    fn type_name(&self) -> &str {
        self.inner.type_name()
    }

    fn base_chain(&self) -> &[String] {
        self.inner.base_chain()
    }

    fn has_marker(&self, marker: Marker) -> bool {
        self.inner.has_marker(marker)
    }

    fn constructor(
        &self,
        signature: ConstructorSignature,
    ) -> Result<Option<&ConstructorDescriptor>, DescriptorError> {
        Err(DescriptorError::LookupFailed {
            signature,
            reason: "constructor metadata is unavailable".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use errshape_core::ConstructorArgs;
    use std::sync::Arc;

    fn invoke(descriptor: &TypeDescriptor, args: ConstructorArgs) -> Box<dyn ErrorInstance> {
        descriptor
            .constructor(args.signature())
            .unwrap()
            .expect("constructor should be declared")
            .invoke(args)
            .unwrap()
    }

    #[test]
    fn test_fixture_error_display() {
        let error = FixtureError::with_message("boom".to_string());
        assert_eq!(error.to_string(), "boom");
    }

    #[test]
    fn test_not_an_error_keeps_constructors() {
        let descriptor = not_an_error();
        assert_eq!(descriptor.type_name(), "Widget");
        assert_eq!(descriptor.constructors().count(), 4);
        assert!(descriptor.has_marker(Marker::Serializable));
    }

    #[test]
    fn test_missing_removes_one_constructor() {
        for signature in ConstructorSignature::ALL {
            let descriptor = missing(signature);
            assert_eq!(descriptor.constructors().count(), 3);
            assert!(descriptor.constructor(signature).unwrap().is_none());
        }
    }

    #[test]
    fn test_ignores_message_fixture() {
        let instance = invoke(
            &ignores_message(),
            ConstructorArgs::Message("anything".to_string()),
        );
        assert_eq!(instance.message(), FIXED_MESSAGE);
    }

    #[test]
    fn test_copies_cause_fixture() {
        let cause = GenericError::with_message("root").shared();
        let instance = invoke(
            &copies_cause(),
            ConstructorArgs::MessageCause("outer".to_string(), cause.clone()),
        );

        let stored = instance.cause().unwrap();
        assert_eq!(stored.message(), "root");
        assert!(!Arc::ptr_eq(stored, &cause));
    }

    #[test]
    fn test_public_serialization_constructor_fixture() {
        let descriptor = public_serialization_constructor();
        let ctor = descriptor
            .constructor(ConstructorSignature::Serialization)
            .unwrap()
            .unwrap();
        assert_eq!(ctor.visibility(), Visibility::Public);

        let error = errshape_core::ShapeValidator::new()
            .check(&descriptor)
            .unwrap_err();
        assert_eq!(
            error.as_violation(),
            Some(&errshape_core::Violation::MissingConstructor(
                ConstructorSignature::Serialization
            ))
        );
    }

    #[test]
    fn test_broken_lookup_fails_every_query() {
        let descriptor = broken_lookup();
        assert_eq!(descriptor.type_name(), FixtureError::TYPE_NAME);
        for signature in ConstructorSignature::ALL {
            assert!(descriptor.constructor(signature).is_err());
        }
    }
}
