//! # Domain Layer
//!
//! Core types shared by every ORO utility: the error type, value objects
//! describing types, instances, libraries and compilation results, and the
//! port traits implemented by the infrastructure layer.
//!
//! ## Module Categories
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Domain error enum and `Result` alias |
//! | [`constants`] | Text formats and naming conventions |
//! | [`ports`] | Serializer, resolver, compiler, id-generator and disposal contracts |
//! | [`value_objects`] | `TypeKey`, `Instance`, `LibraryReference`, compilation types |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, ResolutionError, Result};
pub use value_objects::{Instance, TypeKey};
