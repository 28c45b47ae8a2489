//! Type-Based Serializer Port
//!
//! A serializer converts values of exactly one type to and from strings. The
//! serialized text carries no type information: the caller picks the
//! serializer by the type it expects.

use std::any::Any;

use crate::constants::TRIMMED_SERIALIZED_CHARS;
use crate::value_objects::TypeKey;

/// Boxed value produced by a deserializer
pub type SerializedValue = Box<dyn Any + Send + Sync>;

/// Type-erased serializer as stored by a serializer registry
pub trait TypeBasedSerializer: Send + Sync {
    /// Type this serializer handles
    fn serialized_type(&self) -> TypeKey;

    /// Name used in diagnostics
    fn name(&self) -> &str;

    /// Parse `text`; `None` when the text is not in this serializer's format
    fn try_deserialize(&self, text: &str) -> Option<SerializedValue>;

    /// Format `value`; `None` when the value is not of the serialized type or
    /// the serializer produced no text
    fn try_serialize(&self, value: &dyn Any) -> Option<String>;

    /// Rust expression reconstructing `value`
    fn to_source_code(&self, value: &dyn Any) -> Option<String>;
}

/// Strongly typed serializer
///
/// Wrap implementations in [`TypedSerializer`] to register them.
pub trait ValueSerializer: Send + Sync + 'static {
    /// Serialized type
    type Value: Any + Send + Sync;

    /// Format a value; `None` signals that no text could be produced
    fn serialize(&self, value: &Self::Value) -> Option<String>;

    /// Parse a value
    fn deserialize(&self, text: &str) -> Option<Self::Value>;

    /// Rust expression reconstructing the value
    fn to_source_code(&self, value: &Self::Value) -> String;
}

/// Adapter exposing a [`ValueSerializer`] as a [`TypeBasedSerializer`]
#[derive(Debug, Clone, Default)]
pub struct TypedSerializer<S>(pub S);

impl<S: ValueSerializer> TypeBasedSerializer for TypedSerializer<S> {
    fn serialized_type(&self) -> TypeKey {
        TypeKey::of::<S::Value>()
    }

    fn name(&self) -> &str {
        std::any::type_name::<S>()
    }

    fn try_deserialize(&self, text: &str) -> Option<SerializedValue> {
        self.0
            .deserialize(text.trim_matches(TRIMMED_SERIALIZED_CHARS))
            .map(|value| Box::new(value) as SerializedValue)
    }

    fn try_serialize(&self, value: &dyn Any) -> Option<String> {
        value
            .downcast_ref::<S::Value>()
            .and_then(|value| self.0.serialize(value))
    }

    fn to_source_code(&self, value: &dyn Any) -> Option<String> {
        value
            .downcast_ref::<S::Value>()
            .map(|value| self.0.to_source_code(value))
    }
}
