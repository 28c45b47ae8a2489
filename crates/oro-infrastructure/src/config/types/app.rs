//! Main application configuration

use serde::{Deserialize, Serialize};

pub use super::codegen::CodegenConfig;
pub use super::factory::FactoryConfig;
pub use super::logging::LoggingConfig;

/// Root configuration of the ORO utilities
///
/// Every section falls back to its defaults, so a configuration file only
/// needs to name the values it changes:
///
/// ```toml
/// [logging]
/// level = "debug"
///
/// [factory]
/// log_diagnostics = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Object factory configuration
    pub factory: FactoryConfig,

    /// Dynamic code generation configuration
    pub codegen: CodegenConfig,
}
