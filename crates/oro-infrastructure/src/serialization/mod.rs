//! Type-based string serializers
//!
//! | Module | Serialized types |
//! |--------|------------------|
//! | [`text`] | `String`, `bool` |
//! | [`numeric`] | `i64`, `i32`, `i16`, `u8`, `f64` |
//! | [`temporal`] | `NaiveDateTime` |
//! | [`identifiers`] | `Uuid`, `TypeKey`, `LibraryReference` |
//!
//! [`SerializerRegistry`] dispatches on the requested or runtime type.

pub mod coercion;
pub mod identifiers;
pub mod numeric;
pub mod registry;
pub mod temporal;
pub mod text;

pub use identifiers::{GuidSerializer, LibraryReferenceSerializer, TypeKeySerializer};
pub use numeric::{F64Serializer, I16Serializer, I32Serializer, I64Serializer, U8Serializer};
pub use registry::SerializerRegistry;
pub use temporal::DateTimeSerializer;
pub use text::{BoolSerializer, StringSerializer};
