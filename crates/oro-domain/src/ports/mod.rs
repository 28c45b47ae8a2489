//! Domain Port Interfaces
//!
//! Contracts between the domain and the infrastructure layer. Every trait
//! here is object safe so implementations can be swapped at runtime through
//! ambient slots or handed to the object factory as trait objects.
//!
//! ## Organization
//!
//! - **serialization** - Type-based string serializers
//! - **resolution** - Service resolution and custom constructor parameter resolvers
//! - **codegen** - Compile step for generated source code
//! - **infrastructure** - Unique ids and disposal

/// Compile step for generated source code
pub mod codegen;
/// Unique ids and disposal
pub mod infrastructure;
/// Service resolution contracts
pub mod resolution;
/// Type-based string serializers
pub mod serialization;

// Re-export commonly used port traits for convenience
pub use codegen::SourceCompiler;
pub use infrastructure::{Disposable, IdGenerator};
pub use resolution::{CustomParameterResolver, ServiceResolver};
pub use serialization::{SerializedValue, TypeBasedSerializer, TypedSerializer, ValueSerializer};
