//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Text formats and naming conventions are defined in `oro_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "oro.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "oro";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "ORO";

/// Separator between nested keys in environment variables (`ORO_LOGGING__LEVEL`)
pub const CONFIG_ENV_NESTING_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "ORO_LOG";

/// File name prefix of rolling log files
pub const LOG_FILE_PREFIX: &str = "oro";

// ============================================================================
// CODE GENERATION CONSTANTS
// ============================================================================

/// Default directory for generated artifacts, relative to the working directory
pub const DEFAULT_CODEGEN_OUTPUT_DIR: &str = "target/oro-generated";

/// Extension of artifacts written by the syntax-checking compiler
pub const GENERATED_ARTIFACT_EXTENSION: &str = "rs";

/// Indentation used in generated source
pub const GENERATED_INDENT: &str = "    ";
