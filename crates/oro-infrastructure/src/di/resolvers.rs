//! Ready-made custom parameter resolvers

use oro_domain::error::Result;
use oro_domain::ports::{CustomParameterResolver, ServiceResolver};
use oro_domain::value_objects::instance::{self, Instance};
use oro_domain::value_objects::{ParameterInfo, ResolverId, ResolverPriority, TypeKey};
use std::fmt;
use std::sync::Arc;

type ResolveFn = dyn Fn(&mut dyn ServiceResolver, TypeKey, &ParameterInfo) -> Result<Option<Instance>>
    + Send
    + Sync;

/// Resolver backed by a closure
///
/// ```
/// use oro_domain::value_objects::ResolverPriority;
/// use oro_infrastructure::di::FnParameterResolver;
///
/// let resolver = FnParameterResolver::new(ResolverPriority::High, |_, _, _| Ok(None));
/// assert_eq!(
///     oro_domain::ports::CustomParameterResolver::priority(&resolver),
///     ResolverPriority::High
/// );
/// ```
pub struct FnParameterResolver {
    id: ResolverId,
    priority: ResolverPriority,
    resolve: Box<ResolveFn>,
}

impl FnParameterResolver {
    /// Resolver with a random identifier
    pub fn new<F>(priority: ResolverPriority, resolve: F) -> Self
    where
        F: Fn(&mut dyn ServiceResolver, TypeKey, &ParameterInfo) -> Result<Option<Instance>>
            + Send
            + Sync
            + 'static,
    {
        Self::with_id(ResolverId::new(), priority, resolve)
    }

    /// Resolver with a known identifier
    pub fn with_id<F>(id: ResolverId, priority: ResolverPriority, resolve: F) -> Self
    where
        F: Fn(&mut dyn ServiceResolver, TypeKey, &ParameterInfo) -> Result<Option<Instance>>
            + Send
            + Sync
            + 'static,
    {
        Self {
            id,
            priority,
            resolve: Box::new(resolve),
        }
    }
}

impl CustomParameterResolver for FnParameterResolver {
    fn id(&self) -> ResolverId {
        self.id
    }

    fn priority(&self) -> ResolverPriority {
        self.priority
    }

    fn resolve_parameter(
        &self,
        scope: &mut dyn ServiceResolver,
        constructed_type: TypeKey,
        parameter: &ParameterInfo,
    ) -> Result<Option<Instance>> {
        (self.resolve)(scope, constructed_type, parameter)
    }
}

impl fmt::Debug for FnParameterResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnParameterResolver")
            .field("id", &self.id)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

/// Supplies a fixed value for every parameter of type `T`, optionally only
/// for parameters with a given name
pub struct ValueParameterResolver {
    id: ResolverId,
    priority: ResolverPriority,
    parameter_type: TypeKey,
    parameter_name: Option<String>,
    value: Instance,
}

impl ValueParameterResolver {
    /// Resolver for every parameter of type `T`
    pub fn for_type<T: ?Sized + Send + Sync + 'static>(
        priority: ResolverPriority,
        value: Arc<T>,
    ) -> Self {
        Self {
            id: ResolverId::new(),
            priority,
            parameter_type: TypeKey::of::<T>(),
            parameter_name: None,
            value: instance::wrap(value),
        }
    }

    /// Restrict the resolver to parameters called `name`
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.parameter_name = Some(name.into());
        self
    }
}

impl CustomParameterResolver for ValueParameterResolver {
    fn id(&self) -> ResolverId {
        self.id
    }

    fn priority(&self) -> ResolverPriority {
        self.priority
    }

    fn resolve_parameter(
        &self,
        _scope: &mut dyn ServiceResolver,
        _constructed_type: TypeKey,
        parameter: &ParameterInfo,
    ) -> Result<Option<Instance>> {
        let name_matches = self
            .parameter_name
            .as_deref()
            .is_none_or(|name| name == parameter.name);
        if parameter.parameter_type == self.parameter_type && name_matches {
            Ok(Some(Arc::clone(&self.value)))
        } else {
            Ok(None)
        }
    }
}

impl fmt::Debug for ValueParameterResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueParameterResolver")
            .field("id", &self.id)
            .field("priority", &self.priority)
            .field("parameter_type", &self.parameter_type)
            .field("parameter_name", &self.parameter_name)
            .finish_non_exhaustive()
    }
}
