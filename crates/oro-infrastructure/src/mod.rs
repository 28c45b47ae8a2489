#![allow(clippy::collapsible_if)]

//! # Infrastructure Layer
//!
//! Implementations of the domain ports and the cross-cutting utilities built
//! on them.
//!
//! ## Module Categories
//!
//! ### Core utilities
//! | Module | Description |
//! |--------|-------------|
//! | [`ambient`] | Swappable slots and the `Globals` root object |
//! | [`serialization`] | Type-based string serializer registry |
//! | [`di`] | Type catalog and default-implementation object factory |
//! | [`codegen`] | Dynamic module builder and syntax-checking compiler |
//! | [`utils`] | Tree processing |
//!
//! ### Configuration & Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment-based TOML + environment configuration |
//! | [`constants`] | Infrastructure constants |
//! | [`logging`] | Structured logging with tracing |
//! | [`error_ext`] | Context extensions for foreign errors |

pub mod ambient;
pub mod codegen;
pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;
pub mod serialization;
pub mod utils;

pub use ambient::Globals;
pub use error_ext::ErrorContext;
