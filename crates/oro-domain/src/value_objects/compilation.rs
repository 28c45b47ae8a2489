//! Compilation value objects
//!
//! Inputs and results of the compile step that turns generated source code
//! into an artifact.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use super::LibraryReference;

/// Lifecycle of a dynamic module build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildStatus {
    /// Sources are still being collected
    Started,
    /// The compile step produced the artifact
    Succeeded,
    /// The compile step reported errors
    Failed,
    /// The build was abandoned and will not be compiled
    Aborted,
}

/// Severity of a compiler diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticSeverity {
    /// Compilation cannot succeed
    Error,
    /// Compilation succeeds but something looks wrong
    Warning,
}

/// A single compiler message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Message severity
    pub severity: DiagnosticSeverity,
    /// Index of the source file the diagnostic refers to
    pub source_index: usize,
    /// One-based line, when known
    pub line: Option<usize>,
    /// One-based column, when known
    pub column: Option<usize>,
    /// Human-readable message
    pub message: String,
}

impl Diagnostic {
    /// Create an error diagnostic
    pub fn error(source_index: usize, message: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Error,
            source_index,
            line: None,
            column: None,
            message: message.into(),
        }
    }

    /// Attach a location
    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            DiagnosticSeverity::Error => "error",
            DiagnosticSeverity::Warning => "warning",
        };
        match (self.line, self.column) {
            (Some(line), Some(column)) => write!(
                f,
                "{severity}: source #{}:{line}:{column}: {}",
                self.source_index, self.message
            ),
            _ => write!(f, "{severity}: source #{}: {}", self.source_index, self.message),
        }
    }
}

/// Everything the compile step needs
#[derive(Debug, Clone, Default)]
pub struct CompilationRequest {
    /// Where the artifact is written
    pub artifact_path: PathBuf,
    /// Complete source files, in order
    pub sources: Vec<String>,
    /// Libraries the sources depend on
    pub references: Vec<LibraryReference>,
}

/// Result of the compile step
#[derive(Debug, Clone, Default)]
pub struct CompilationOutcome {
    /// Whether the artifact was produced
    pub success: bool,
    /// Compiler messages
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationOutcome {
    /// Successful outcome without diagnostics
    pub fn succeeded() -> Self {
        Self {
            success: true,
            diagnostics: Vec::new(),
        }
    }

    /// Failed outcome
    pub fn failed(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            success: false,
            diagnostics,
        }
    }

    /// Error diagnostics only
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity == DiagnosticSeverity::Error)
    }
}
