//! Value objects used while resolving constructor parameters

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::TypeKey;

/// Priority of a custom constructor parameter resolver
///
/// Resolvers with a higher priority are consulted first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum ResolverPriority {
    /// Consulted last
    Low,
    /// Default priority
    #[default]
    Medium,
    /// Consulted first
    High,
}

/// Unique identifier of a custom parameter resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolverId(Uuid);

impl ResolverId {
    /// Random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Identifier from a known UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// The wrapped UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ResolverId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ResolverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Description of one constructor parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterInfo {
    /// Zero-based position in the constructor signature
    pub position: usize,
    /// Parameter name
    pub name: String,
    /// Parameter type
    pub parameter_type: TypeKey,
}

impl ParameterInfo {
    /// Create a parameter description
    pub fn new(position: usize, name: impl Into<String>, parameter_type: TypeKey) -> Self {
        Self {
            position,
            name: name.into(),
            parameter_type,
        }
    }
}
