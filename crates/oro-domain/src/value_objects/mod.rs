//! Domain Value Objects
//!
//! Immutable value objects shared by the infrastructure utilities.
//!
//! ## Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`TypeKey`] | Identity and name of a Rust type |
//! | [`Instance`] | Type-erased shared instance produced by the object factory |
//! | [`ParameterInfo`] | Constructor parameter description |
//! | [`LibraryReference`] | Library referenced by generated code |
//! | [`CompilationOutcome`] | Result of compiling generated code |

/// Compilation requests, outcomes and diagnostics
pub mod compilation;
/// Type-erased instances
pub mod instance;
/// Referenced libraries
pub mod library;
/// Parameter resolution value objects
pub mod resolution;
/// Runtime type identity
pub mod type_key;

// Re-export commonly used value objects
pub use compilation::{
    BuildStatus, CompilationOutcome, CompilationRequest, Diagnostic, DiagnosticSeverity,
};
pub use instance::Instance;
pub use library::LibraryReference;
pub use resolution::{ParameterInfo, ResolverId, ResolverPriority};
pub use type_key::TypeKey;
