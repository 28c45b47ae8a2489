//! Object factory configuration types

use serde::{Deserialize, Serialize};

/// Object factory configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactoryConfig {
    /// Log every created instance and every resolver-supplied value
    pub log_diagnostics: bool,

    /// Caching predicate used when the factory is built from configuration:
    /// cache every resolved instance when `true`, none when `false`
    pub cache_by_default: bool,
}
