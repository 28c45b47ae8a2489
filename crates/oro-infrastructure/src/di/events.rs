//! Object factory notifications

use oro_domain::value_objects::{Instance, TypeKey};
use std::fmt;
use uuid::Uuid;

/// Raised every time the factory constructs an instance
#[derive(Clone)]
pub struct InstanceCreated {
    /// Type that was requested
    pub resolved_type: TypeKey,
    /// Type that was constructed
    pub implementation_type: TypeKey,
    /// The new instance, viewed as `resolved_type`
    pub instance: Instance,
}

impl fmt::Debug for InstanceCreated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceCreated")
            .field("resolved_type", &self.resolved_type)
            .field("implementation_type", &self.implementation_type)
            .finish_non_exhaustive()
    }
}

/// Subscriber to [`InstanceCreated`]
pub trait InstanceCreatedListener: Send + Sync {
    /// Called after the instance was constructed and cached
    fn on_instance_created(&self, event: &InstanceCreated);
}

impl<F> InstanceCreatedListener for F
where
    F: Fn(&InstanceCreated) + Send + Sync,
{
    fn on_instance_created(&self, event: &InstanceCreated) {
        self(event);
    }
}

/// Handle returned by a subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(Uuid);

impl ListenerId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}
