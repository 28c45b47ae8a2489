//! Dynamic code generation configuration types

use crate::constants::DEFAULT_CODEGEN_OUTPUT_DIR;
use oro_domain::constants::DEFAULT_DYNAMIC_NAMESPACE_PREFIX;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Dynamic code generation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodegenConfig {
    /// Directory for generated artifacts
    pub output_dir: PathBuf,

    /// Prefix of the namespace given to classes started without one
    pub default_namespace_prefix: String,

    /// Write the aggregated source to the artifact path after a successful check
    pub write_artifact: bool,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_CODEGEN_OUTPUT_DIR),
            default_namespace_prefix: DEFAULT_DYNAMIC_NAMESPACE_PREFIX.to_string(),
            write_artifact: true,
        }
    }
}
