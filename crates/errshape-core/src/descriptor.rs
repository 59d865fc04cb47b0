//! Type descriptors
//!
//! The validator never inspects types directly. Everything it needs is asked
//! through [`ErrorTypeDescriptor`]: the base-type chain, marker presence and
//! constructor lookup by signature. Constructors carry a factory delegate that
//! builds an [`ErrorInstance`] from [`ConstructorArgs`].
//!
//! [`TypeDescriptor`] is the concrete, builder-style implementation used by
//! fixtures and by `TypeDescriptor::of` for conventional Rust error types.

use crate::error::{ConstructionError, DescriptorError};
use crate::instance::{
    BASE_ERROR_TYPE, ErrorInstance, SerializationContext, SerializedState, SharedError,
};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

/// Parameter list identifying one of the conventional constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConstructorSignature {
    /// `()`
    Default,
    /// `(message: string)`
    Message,
    /// `(message: string, cause: error)`
    MessageCause,
    /// `(serialized-state, serialization-context)`
    Serialization,
}

impl ConstructorSignature {
    pub const ALL: [ConstructorSignature; 4] = [
        ConstructorSignature::Serialization,
        ConstructorSignature::Default,
        ConstructorSignature::Message,
        ConstructorSignature::MessageCause,
    ];

    pub fn parameters(&self) -> &'static [ParameterKind] {
        match self {
            ConstructorSignature::Default => &[],
            ConstructorSignature::Message => &[ParameterKind::Message],
            ConstructorSignature::MessageCause => &[ParameterKind::Message, ParameterKind::Cause],
            ConstructorSignature::Serialization => &[
                ParameterKind::SerializedState,
                ParameterKind::SerializationContext,
            ],
        }
    }

    /// Visibility the convention demands for this constructor.
    pub fn required_visibility(&self) -> Visibility {
        match self {
            ConstructorSignature::Serialization => Visibility::NonPublic,
            _ => Visibility::Public,
        }
    }
}

impl fmt::Display for ConstructorSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<&str> = self.parameters().iter().map(|p| p.as_str()).collect();
        write!(f, "({})", params.join(", "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    Message,
    Cause,
    SerializedState,
    SerializationContext,
}

impl ParameterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterKind::Message => "message: string",
            ParameterKind::Cause => "cause: error",
            ParameterKind::SerializedState => "serialized-state",
            ParameterKind::SerializationContext => "serialization-context",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    NonPublic,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::NonPublic => write!(f, "non-public"),
        }
    }
}

/// Type-level markers recognised by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Marker {
    /// The type can be converted to and from [`SerializedState`].
    Serializable,
}

/// Arguments for a constructor invocation.
#[derive(Debug, Clone)]
pub enum ConstructorArgs {
    Default,
    Message(String),
    MessageCause(String, SharedError),
    Serialization(SerializedState, SerializationContext),
}

impl ConstructorArgs {
    pub fn signature(&self) -> ConstructorSignature {
        match self {
            ConstructorArgs::Default => ConstructorSignature::Default,
            ConstructorArgs::Message(_) => ConstructorSignature::Message,
            ConstructorArgs::MessageCause(..) => ConstructorSignature::MessageCause,
            ConstructorArgs::Serialization(..) => ConstructorSignature::Serialization,
        }
    }
}

pub type ConstructionResult = Result<Box<dyn ErrorInstance>, ConstructionError>;

/// Factory delegate standing in for a constructor.
pub type Factory = Arc<dyn Fn(ConstructorArgs) -> ConstructionResult + Send + Sync>;

/// A constructor declared by an error type.
#[derive(Clone)]
pub struct ConstructorDescriptor {
    signature: ConstructorSignature,
    visibility: Visibility,
    is_static: bool,
    factory: Factory,
}

impl ConstructorDescriptor {
    /// Wrap a raw factory. The factory receives arguments matching `signature`.
    pub fn new<F>(signature: ConstructorSignature, visibility: Visibility, factory: F) -> Self
    where
        F: Fn(ConstructorArgs) -> ConstructionResult + Send + Sync + 'static,
    {
        Self {
            signature,
            visibility,
            is_static: false,
            factory: Arc::new(factory),
        }
    }

    /// Public `()` constructor.
    pub fn default_ctor<F>(build: F) -> Self
    where
        F: Fn() -> Box<dyn ErrorInstance> + Send + Sync + 'static,
    {
        Self::new(
            ConstructorSignature::Default,
            Visibility::Public,
            move |_| Ok(build()),
        )
    }

    /// Public `(message)` constructor.
    pub fn message_ctor<F>(build: F) -> Self
    where
        F: Fn(String) -> Box<dyn ErrorInstance> + Send + Sync + 'static,
    {
        Self::new(
            ConstructorSignature::Message,
            Visibility::Public,
            move |args| match args {
                ConstructorArgs::Message(message) => Ok(build(message)),
                other => Err(mismatch(ConstructorSignature::Message, &other)),
            },
        )
    }

    /// Public `(message, cause)` constructor.
    pub fn message_cause_ctor<F>(build: F) -> Self
    where
        F: Fn(String, SharedError) -> Box<dyn ErrorInstance> + Send + Sync + 'static,
    {
        Self::new(
            ConstructorSignature::MessageCause,
            Visibility::Public,
            move |args| match args {
                ConstructorArgs::MessageCause(message, cause) => Ok(build(message, cause)),
                other => Err(mismatch(ConstructorSignature::MessageCause, &other)),
            },
        )
    }

    /// Non-public `(serialized-state, serialization-context)` constructor.
    pub fn serialization_ctor<F>(build: F) -> Self
    where
        F: Fn(SerializedState, SerializationContext) -> ConstructionResult + Send + Sync + 'static,
    {
        Self::new(
            ConstructorSignature::Serialization,
            Visibility::NonPublic,
            move |args| match args {
                ConstructorArgs::Serialization(state, context) => build(state, context),
                other => Err(mismatch(ConstructorSignature::Serialization, &other)),
            },
        )
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Mark as a static (type-level) constructor rather than an instance one.
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn signature(&self) -> ConstructorSignature {
        self.signature
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Invoke the factory.
    pub fn invoke(&self, args: ConstructorArgs) -> ConstructionResult {
        if args.signature() != self.signature {
            return Err(mismatch(self.signature, &args));
        }
        (self.factory)(args)
    }
}

impl fmt::Debug for ConstructorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorDescriptor")
            .field("signature", &self.signature)
            .field("visibility", &self.visibility)
            .field("is_static", &self.is_static)
            .finish_non_exhaustive()
    }
}

fn mismatch(expected: ConstructorSignature, args: &ConstructorArgs) -> ConstructionError {
    ConstructionError::SignatureMismatch {
        expected,
        actual: args.signature(),
    }
}

/// Narrow view of an error type, all the validator is allowed to see.
pub trait ErrorTypeDescriptor: Send + Sync {
    fn type_name(&self) -> &str;

    /// Ancestor type names, nearest first.
    fn base_chain(&self) -> &[String];

    fn has_marker(&self, marker: Marker) -> bool;

    /// Look up the constructor declared with `signature`, whatever its visibility.
    fn constructor(
        &self,
        signature: ConstructorSignature,
    ) -> Result<Option<&ConstructorDescriptor>, DescriptorError>;

    /// Whether the type is `base` or has `base` among its ancestors.
    fn is_or_derives_from(&self, base: &str) -> bool {
        self.type_name() == base || self.base_chain().iter().any(|b| b == base)
    }
}

/// Concrete descriptor assembled from parts.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    name: String,
    base_chain: Vec<String>,
    markers: BTreeSet<Marker>,
    constructors: BTreeMap<ConstructorSignature, ConstructorDescriptor>,
}

impl TypeDescriptor {
    /// A type with no ancestors, markers or constructors.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_chain: Vec::new(),
            markers: BTreeSet::new(),
            constructors: BTreeMap::new(),
        }
    }

    /// A type deriving directly from the base error type.
    pub fn error(name: impl Into<String>) -> Self {
        Self::new(name).with_base(BASE_ERROR_TYPE)
    }

    /// Append an ancestor. Call in order from nearest to furthest.
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base_chain.push(base.into());
        self
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.insert(marker);
        self
    }

    pub fn without_marker(mut self, marker: Marker) -> Self {
        self.markers.remove(&marker);
        self
    }

    /// Declare a constructor, replacing any existing one with the same signature.
    pub fn with_constructor(mut self, constructor: ConstructorDescriptor) -> Self {
        self.constructors
            .insert(constructor.signature(), constructor);
        self
    }

    pub fn without_constructor(mut self, signature: ConstructorSignature) -> Self {
        self.constructors.remove(&signature);
        self
    }

    pub fn markers(&self) -> impl Iterator<Item = Marker> + '_ {
        self.markers.iter().copied()
    }

    pub fn constructors(&self) -> impl Iterator<Item = &ConstructorDescriptor> {
        self.constructors.values()
    }
}

impl ErrorTypeDescriptor for TypeDescriptor {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn base_chain(&self) -> &[String] {
        &self.base_chain
    }

    fn has_marker(&self, marker: Marker) -> bool {
        self.markers.contains(&marker)
    }

    fn constructor(
        &self,
        signature: ConstructorSignature,
    ) -> Result<Option<&ConstructorDescriptor>, DescriptorError> {
        Ok(self.constructors.get(&signature))
    }
}
