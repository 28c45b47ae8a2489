//! # ORO Shared
//!
//! Shared utilities of the ORO tooling: a dependency-resolving object
//! factory, type-based value serializers, dynamic source generation and the
//! ambient services tying them together.
//!
//! ## Example
//!
//! ```
//! use oro::infrastructure::serialization::SerializerRegistry;
//!
//! let serializers = SerializerRegistry::with_defaults();
//! let value: i32 = serializers.deserialize("42").unwrap();
//! assert_eq!(serializers.serialize(&value).as_deref(), Some("42"));
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Value objects, errors and port traits
//! - `infrastructure` - Object factory, serializers, code generation, config and logging
//! - `cli` - The `oro` command line tool

pub mod cli;

/// Domain layer - value objects, errors and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use oro_domain::*;
}

/// Infrastructure layer - factory, serializers, codegen, config and logging
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use oro_infrastructure::*;
}

// Re-export commonly used types at the crate root
pub use domain::error::{Error, Result};
pub use domain::value_objects::TypeKey;
pub use infrastructure::Globals;
