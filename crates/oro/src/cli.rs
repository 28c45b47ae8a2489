//! `oro` command line tool
//!
//! Exposes the default serializers and the syntax-checking compile step:
//!
//! | Command | Description |
//! |---------|-------------|
//! | `oro serialize --type i32 " 42"` | Parse a value and print its canonical text |
//! | `oro source-code --type String hello` | Print the Rust expression rebuilding a value |
//! | `oro check generated.rs` | Report syntax diagnostics of source files |
//! | `oro types` | List the types with a registered serializer |

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use oro_domain::ports::TypeBasedSerializer;
use oro_domain::value_objects::DiagnosticSeverity;
use oro_infrastructure::Globals;
use oro_infrastructure::codegen::SyntaxCheckingCompiler;
use oro_infrastructure::config::ConfigLoader;
use oro_infrastructure::logging::init_logging;
use oro_infrastructure::serialization::SerializerRegistry;
use serde::Serialize;
use tracing::{debug, info};

/// Command line interface for the ORO shared utilities
#[derive(Parser, Debug)]
#[command(name = "oro")]
#[command(about = "ORO Shared - serializers and generated source tooling")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands of [`Cli`]
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Parse a value and print its canonical serialized form
    Serialize {
        /// Serialized type, by simple or full name (`i32`, `NaiveDateTime`, `uuid::Uuid`)
        #[arg(short = 't', long = "type")]
        type_name: String,
        /// Text to parse
        value: String,
    },
    /// Parse a value and print the Rust expression reconstructing it
    SourceCode {
        /// Serialized type, by simple or full name
        #[arg(short = 't', long = "type")]
        type_name: String,
        /// Text to parse
        value: String,
    },
    /// Syntax check Rust source files
    Check {
        /// Files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// List the types with a registered serializer
    Types {
        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Registered serializer as listed by `oro types`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SerializerListing {
    /// Simple type name
    pub name: &'static str,
    /// Fully qualified type name
    pub full_name: &'static str,
    /// Serializer name
    pub serializer: String,
}

/// Load configuration, install logging and run the command
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let mut config = loader.load()?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    init_logging(config.logging.clone())?;

    let globals = Globals::new(config)?;
    info!(command = ?cli.command, "Running command");
    let output = execute(&globals, &cli.command)?;
    println!("{output}");
    Ok(())
}

/// Run `command` and return what it prints
///
/// `check` fails when any file has syntax errors; the error message carries
/// the rendered diagnostics.
pub fn execute(globals: &Globals, command: &Command) -> anyhow::Result<String> {
    match command {
        Command::Serialize { type_name, value } => {
            canonical_text(&globals.serializers(), type_name, value)
        }
        Command::SourceCode { type_name, value } => {
            source_code(&globals.serializers(), type_name, value)
        }
        Command::Check { files } => check_files(files),
        Command::Types { json } => {
            let listings = list_serializers(&globals.serializers());
            if *json {
                Ok(serde_json::to_string_pretty(&listings)?)
            } else {
                Ok(listings
                    .iter()
                    .map(|listing| format!("{:<16} {}", listing.name, listing.full_name))
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
        }
    }
}

/// Serializer whose type matches `type_name`
///
/// Simple names compare case-insensitively, full names exactly.
pub fn find_serializer(
    serializers: &SerializerRegistry,
    type_name: &str,
) -> Option<Arc<dyn TypeBasedSerializer>> {
    serializers
        .registered_serializers()
        .into_iter()
        .find(|serializer| {
            let key = serializer.serialized_type();
            key.full_name() == type_name || key.simple_name().eq_ignore_ascii_case(type_name)
        })
}

/// Parse `text` as `type_name` and format it again
pub fn canonical_text(
    serializers: &SerializerRegistry,
    type_name: &str,
    text: &str,
) -> anyhow::Result<String> {
    let serializer = require_serializer(serializers, type_name)?;
    let value = parse(serializer.as_ref(), text)?;
    serializer
        .try_serialize(&*value)
        .with_context(|| format!("Serializer '{}' produced no text", serializer.name()))
}

/// Parse `text` as `type_name` and render the Rust expression rebuilding it
pub fn source_code(
    serializers: &SerializerRegistry,
    type_name: &str,
    text: &str,
) -> anyhow::Result<String> {
    let serializer = require_serializer(serializers, type_name)?;
    let value = parse(serializer.as_ref(), text)?;
    serializer
        .to_source_code(&*value)
        .with_context(|| format!("Serializer '{}' produced no source code", serializer.name()))
}

/// Registered serializers ordered by full type name
pub fn list_serializers(serializers: &SerializerRegistry) -> Vec<SerializerListing> {
    serializers
        .registered_serializers()
        .iter()
        .map(|serializer| {
            let key = serializer.serialized_type();
            SerializerListing {
                name: key.simple_name(),
                full_name: key.full_name(),
                serializer: serializer.name().to_string(),
            }
        })
        .collect()
}

/// Syntax check `files`, one diagnostic per line
pub fn check_files(files: &[PathBuf]) -> anyhow::Result<String> {
    let mut lines = Vec::new();
    let mut errors = 0;
    for (index, path) in files.iter().enumerate() {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let diagnostics = SyntaxCheckingCompiler::check_source(index, &source);
        debug!(file = %path.display(), diagnostics = diagnostics.len(), "Checked file");
        for diagnostic in diagnostics {
            if diagnostic.severity == DiagnosticSeverity::Error {
                errors += 1;
            }
            lines.push(render_diagnostic(path, &diagnostic));
        }
    }

    if errors > 0 {
        bail!("{}\n{errors} syntax error(s) found", lines.join("\n"));
    }
    lines.push(format!("{} file(s) checked, no syntax errors", files.len()));
    Ok(lines.join("\n"))
}

fn require_serializer(
    serializers: &SerializerRegistry,
    type_name: &str,
) -> anyhow::Result<Arc<dyn TypeBasedSerializer>> {
    find_serializer(serializers, type_name)
        .with_context(|| format!("No serializer is registered for type '{type_name}'"))
}

fn parse(
    serializer: &dyn TypeBasedSerializer,
    text: &str,
) -> anyhow::Result<oro_domain::ports::SerializedValue> {
    serializer.try_deserialize(text).with_context(|| {
        format!(
            "Failed to deserialize value '{}' to value of type '{}'",
            text,
            serializer.serialized_type()
        )
    })
}

fn render_diagnostic(path: &Path, diagnostic: &oro_domain::value_objects::Diagnostic) -> String {
    let severity = match diagnostic.severity {
        DiagnosticSeverity::Error => "error",
        DiagnosticSeverity::Warning => "warning",
    };
    match (diagnostic.line, diagnostic.column) {
        (Some(line), Some(column)) => format!(
            "{}:{line}:{column}: {severity}: {}",
            path.display(),
            diagnostic.message
        ),
        _ => format!("{}: {severity}: {}", path.display(), diagnostic.message),
    }
}
