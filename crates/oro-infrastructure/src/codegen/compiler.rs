//! Syntax-checking compile step
//!
//! Parses every generated source file with `syn`. When all of them parse,
//! the aggregated source is written to the artifact path.

use std::fs;

use oro_domain::error::Result;
use oro_domain::ports::SourceCompiler;
use oro_domain::value_objects::{
    CompilationOutcome, CompilationRequest, Diagnostic, DiagnosticSeverity,
};
use proc_macro2::LineColumn;
use tracing::debug;

use crate::error_ext::ErrorContext;

/// Default [`SourceCompiler`]: `syn` parsing plus artifact output
#[derive(Debug, Clone)]
pub struct SyntaxCheckingCompiler {
    write_artifact: bool,
}

impl SyntaxCheckingCompiler {
    /// Compiler writing the artifact on success
    pub fn new() -> Self {
        Self {
            write_artifact: true,
        }
    }

    /// Enable or disable artifact output
    pub fn with_write_artifact(mut self, write_artifact: bool) -> Self {
        self.write_artifact = write_artifact;
        self
    }

    /// Syntax diagnostics of a single source file
    pub fn check_source(source_index: usize, source: &str) -> Vec<Diagnostic> {
        match syn::parse_file(source) {
            Ok(_) => Vec::new(),
            Err(errors) => errors
                .into_iter()
                .map(|error| {
                    let LineColumn { line, column } = error.span().start();
                    let diagnostic = Diagnostic::error(source_index, error.to_string());
                    if line == 0 {
                        diagnostic
                    } else {
                        diagnostic.at(line, column + 1)
                    }
                })
                .collect(),
        }
    }

    fn missing_references(request: &CompilationRequest) -> Vec<Diagnostic> {
        request
            .references
            .iter()
            .filter(|reference| !reference.path.exists())
            .map(|reference| Diagnostic {
                severity: DiagnosticSeverity::Warning,
                source_index: 0,
                line: None,
                column: None,
                message: format!(
                    "Referenced library '{}' not found at {}",
                    reference.name,
                    reference.path.display()
                ),
            })
            .collect()
    }
}

impl Default for SyntaxCheckingCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceCompiler for SyntaxCheckingCompiler {
    fn name(&self) -> &str {
        "syn"
    }

    fn compile(&self, request: &CompilationRequest) -> Result<CompilationOutcome> {
        let mut diagnostics: Vec<Diagnostic> = request
            .sources
            .iter()
            .enumerate()
            .flat_map(|(index, source)| Self::check_source(index, source))
            .collect();
        diagnostics.extend(Self::missing_references(request));

        let success = !diagnostics
            .iter()
            .any(|diagnostic| diagnostic.severity == DiagnosticSeverity::Error);
        if !success {
            return Ok(CompilationOutcome::failed(diagnostics));
        }

        if self.write_artifact {
            if let Some(parent) = request.artifact_path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)
                        .io_context(format!("Failed to create {}", parent.display()))?;
                }
            }
            fs::write(&request.artifact_path, request.sources.join("\n\n"))
                .io_context(format!("Failed to write {}", request.artifact_path.display()))?;
            debug!(artifact = %request.artifact_path.display(), "Artifact written");
        }

        Ok(CompilationOutcome {
            success: true,
            diagnostics,
        })
    }
}
