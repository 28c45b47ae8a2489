//! Infrastructure Service Ports
//!
//! Small capabilities reached through ambient slots.

/// Generator of process-unique, strictly increasing identifiers
pub trait IdGenerator: Send + Sync {
    /// Next identifier
    fn generate_unique_id(&self) -> i64;
}

/// Instances holding resources released when their owner is disposed
pub trait Disposable: Send + Sync {
    /// Release held resources
    fn dispose(&self);
}
