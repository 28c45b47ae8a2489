//! Service Resolution Port
//!
//! Contracts used while the object factory builds an instance: the scope
//! through which further types can be resolved, and pluggable resolvers that
//! may supply constructor parameter values before the default resolution.

use std::sync::Arc;

use crate::error::{Error, ResolutionError, Result};
use crate::value_objects::instance::{self, Instance};
use crate::value_objects::{ParameterInfo, ResolverId, ResolverPriority, TypeKey};

/// Resolves service types to instances within one resolution request
pub trait ServiceResolver {
    /// Resolve `service` to an instance viewed as `service`
    fn resolve_key(&mut self, service: TypeKey) -> Result<Instance>;
}

impl dyn ServiceResolver + '_ {
    /// Resolve `T` and recover the typed handle
    pub fn resolve<T: ?Sized + Send + Sync + 'static>(&mut self) -> Result<Arc<T>> {
        let key = TypeKey::of::<T>();
        let resolved = self.resolve_key(key)?;
        instance::downcast::<T>(&resolved).ok_or_else(|| {
            Error::from(ResolutionError::InstanceTypeMismatch {
                expected: key.full_name().to_string(),
                actual: "an instance registered for another type".to_string(),
            })
        })
    }
}

/// Custom strategy for constructor parameter values
///
/// Returning `Ok(None)` means the resolver does not take responsibility for
/// the parameter, and the next resolver (or the default resolution) is tried.
pub trait CustomParameterResolver: Send + Sync {
    /// Unique identifier
    fn id(&self) -> ResolverId;

    /// Priority; higher priorities are consulted first
    fn priority(&self) -> ResolverPriority {
        ResolverPriority::Medium
    }

    /// Try to produce the value of `parameter` for an instance of `constructed_type`
    ///
    /// `constructed_type` is the implementation the value is injected into,
    /// not the parameter type (see [`ParameterInfo::parameter_type`]).
    fn resolve_parameter(
        &self,
        scope: &mut dyn ServiceResolver,
        constructed_type: TypeKey,
        parameter: &ParameterInfo,
    ) -> Result<Option<Instance>>;
}
