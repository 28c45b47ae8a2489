//! Serializer registry
//!
//! Maps an exact type to the serializer that converts its values to and from
//! text. The first serializer registered for a type stays active.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use oro_domain::error::{Error, Result};
use oro_domain::ports::{SerializedValue, TypeBasedSerializer, TypedSerializer, ValueSerializer};
use oro_domain::TypeKey;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;
use tracing::{error, warn};

use super::coercion;
use super::identifiers::{GuidSerializer, LibraryReferenceSerializer};
use super::numeric::{F64Serializer, I16Serializer, I32Serializer, I64Serializer, U8Serializer};
use super::temporal::DateTimeSerializer;
use super::text::{BoolSerializer, StringSerializer};

/// Registry of type-based serializers
///
/// # Example
///
/// ```
/// use oro_infrastructure::serialization::SerializerRegistry;
///
/// let registry = SerializerRegistry::with_defaults();
/// let value: i32 = registry.deserialize("2147483647").unwrap();
/// assert_eq!(value, i32::MAX);
/// assert_eq!(registry.serialize(&value).as_deref(), Some("2147483647"));
/// ```
#[derive(Default)]
pub struct SerializerRegistry {
    serializers: DashMap<TypeId, Arc<dyn TypeBasedSerializer>>,
}

impl SerializerRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the serializers for strings, booleans, integers,
    /// doubles, date-times, GUIDs and library references
    ///
    /// The type serializer needs a type catalog and is added by
    /// [`crate::ambient::Globals`].
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register_value(F64Serializer);
        registry.register_value(I64Serializer);
        registry.register_value(I32Serializer);
        registry.register_value(I16Serializer);
        registry.register_value(U8Serializer);
        registry.register_value(BoolSerializer);
        registry.register_value(DateTimeSerializer);
        registry.register_value(GuidSerializer);
        registry.register_value(StringSerializer);
        registry.register_value(LibraryReferenceSerializer);
        registry
    }

    /// Register `serializer` for its serialized type
    ///
    /// Returns `false`, keeping the existing serializer, when the type
    /// already has one.
    pub fn register(&self, serializer: Arc<dyn TypeBasedSerializer>) -> bool {
        let serialized_type = serializer.serialized_type();
        match self.serializers.entry(serialized_type.id()) {
            Entry::Occupied(existing) => {
                warn!(
                    serialized_type = %serialized_type,
                    active = existing.get().name(),
                    rejected = serializer.name(),
                    "Multiple serializers for the same type; the first registered one is used"
                );
                false
            }
            Entry::Vacant(slot) => {
                slot.insert(serializer);
                true
            }
        }
    }

    /// Register a strongly typed serializer
    pub fn register_value<S: ValueSerializer>(&self, serializer: S) -> bool {
        self.register(Arc::new(TypedSerializer(serializer)))
    }

    /// Remove the serializer for `serialized_type`
    pub fn unregister(&self, serialized_type: TypeKey) -> bool {
        self.serializers.remove(&serialized_type.id()).is_some()
    }

    /// Whether `serialized_type` has a serializer
    pub fn has_serializer_for_type(&self, serialized_type: TypeKey) -> bool {
        self.serializers.contains_key(&serialized_type.id())
    }

    /// Serializer registered for `serialized_type`
    pub fn serializer_for_type(
        &self,
        serialized_type: TypeKey,
    ) -> Option<Arc<dyn TypeBasedSerializer>> {
        self.serializers
            .get(&serialized_type.id())
            .map(|entry| Arc::clone(entry.value()))
    }

    /// All registered serializers, ordered by serialized type name
    pub fn registered_serializers(&self) -> Vec<Arc<dyn TypeBasedSerializer>> {
        let mut serializers: Vec<_> = self
            .serializers
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        serializers.sort_by_key(|serializer| serializer.serialized_type().full_name());
        serializers
    }

    /// Parse `text` into a value of `target`
    ///
    /// Logs an error and returns `None` when `target` has no serializer or
    /// the produced value is not assignable to `target`.
    pub fn try_deserialize(&self, target: TypeKey, text: &str) -> Option<SerializedValue> {
        let Some(serializer) = self.serializer_for_type(target) else {
            error!(serialized_type = %target, "No serializer is registered for type");
            return None;
        };

        let value = serializer.try_deserialize(text)?;
        match coercion::coerce(value, target) {
            Ok(value) => Some(value),
            Err(_) => {
                error!(
                    serializer = serializer.name(),
                    expected = %target,
                    "Deserialized value is not assignable to the expected type"
                );
                None
            }
        }
    }

    /// Parse `text` into a `T`, falling back to `default`
    ///
    /// The flag tells whether parsing succeeded.
    pub fn try_deserialize_as<T: Any + Send + Sync>(&self, text: &str, default: T) -> (bool, T) {
        match self
            .try_deserialize(TypeKey::of::<T>(), text)
            .and_then(|value| value.downcast::<T>().ok())
        {
            Some(value) => (true, *value),
            None => (false, default),
        }
    }

    /// Parse `text` into a `T`
    pub fn deserialize<T: Any + Send + Sync>(&self, text: &str) -> Result<T> {
        self.try_deserialize(TypeKey::of::<T>(), text)
            .and_then(|value| value.downcast::<T>().ok())
            .map(|value| *value)
            .ok_or_else(|| {
                Error::serialization(format!(
                    "Failed to deserialize value '{}' to value of type '{}'",
                    text,
                    std::any::type_name::<T>()
                ))
            })
    }

    /// Format `value` with the serializer registered for its runtime type
    ///
    /// Pass the value itself, not a box holding it: the lookup uses the
    /// concrete type behind the reference.
    pub fn try_serialize(&self, value: &dyn Any) -> Option<String> {
        let Some(serializer) = self
            .serializers
            .get(&value.type_id())
            .map(|entry| Arc::clone(entry.value()))
        else {
            error!(type_id = ?value.type_id(), "No serializer is registered for the value's type");
            return None;
        };

        let text = serializer.try_serialize(value);
        if text.is_none() {
            error!(serializer = serializer.name(), "Serializer produced no text");
        }
        text
    }

    /// Format a typed value
    pub fn serialize<T: Any>(&self, value: &T) -> Option<String> {
        self.try_serialize(value)
    }

    /// Rust expression reconstructing `value`
    pub fn to_source_code(&self, value: &dyn Any) -> Option<String> {
        self.serializers
            .get(&value.type_id())
            .map(|entry| Arc::clone(entry.value()))
            .and_then(|serializer| serializer.to_source_code(value))
    }
}

impl fmt::Debug for SerializerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerializerRegistry")
            .field("serializers", &self.serializers.len())
            .finish()
    }
}
