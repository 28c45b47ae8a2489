//! Source Compiler Port
//!
//! Defines the compile step that turns generated source files into an
//! artifact.

use crate::error::Result;
use crate::value_objects::{CompilationOutcome, CompilationRequest};

/// Compile step for generated code
///
/// Compiler diagnostics are reported through the returned outcome;
/// `Err` is reserved for failures of the compile step itself (for example
/// the artifact could not be written).
pub trait SourceCompiler: Send + Sync {
    /// Compiler name for diagnostics
    fn name(&self) -> &str;

    /// Compile the request
    fn compile(&self, request: &CompilationRequest) -> Result<CompilationOutcome>;
}
