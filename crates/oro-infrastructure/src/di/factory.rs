//! Default-implementation object factory
//!
//! Resolves a requested service type to an implementation type, picks the
//! constructor with the most parameters, resolves the constructor parameters
//! and builds the instance.
//!
//! ## Resolution
//!
//! | Step | Source |
//! |------|--------|
//! | Mapping | cached or explicit mapping, then `I<Name>` → `<Name>` in the same module, then the type itself |
//! | Parameter | cached instance, then custom resolvers by priority, then recursive resolution |
//! | Result | cached under the requested type when the caching predicate allows, then announced to listeners |
//!
//! No lock is held while constructors, resolvers or listeners run, so they
//! may call back into the factory.

use oro_domain::constants::INTERFACE_NAME_PREFIX;
use oro_domain::error::{Error, ResolutionError, Result};
use oro_domain::ports::{CustomParameterResolver, ServiceResolver};
use oro_domain::value_objects::instance::{self, Instance};
use oro_domain::value_objects::{ParameterInfo, ResolverId, TypeKey};
use std::collections::HashMap;
use std::fmt;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::catalog::{TypeCatalog, TypeKind, TypeRegistration};
use super::events::{InstanceCreated, InstanceCreatedListener, ListenerId};
use crate::config::FactoryConfig;
use crate::logging::log_instance_created;

/// Decides whether instances resolved for a type are cached
type CachingPredicate = Arc<dyn Fn(&TypeKey) -> bool + Send + Sync>;

/// Implementation chosen for a service type
#[derive(Debug, Clone)]
struct Mapping {
    implementation: Arc<TypeRegistration>,
    constructor: usize,
}

/// Cached instance plus what is needed to dispose it
struct CachedInstance {
    instance: Instance,
    disposal: Option<Disposal>,
}

struct Disposal {
    registration: Arc<TypeRegistration>,
    target: Instance,
}

impl Disposal {
    fn run(&self) {
        if !self.registration.dispose(&self.target) {
            warn!(
                type_name = %self.registration.key(),
                "Cached instance could not be disposed"
            );
        }
    }
}

/// How a freshly constructed instance enters the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CacheMode {
    /// Keep an instance another request stored first
    KeepExisting,
    /// Replace the stored instance and dispose it
    Replace,
}

#[derive(Default)]
struct FactoryState {
    mappings: HashMap<TypeKey, Mapping>,
    cache: HashMap<TypeKey, CachedInstance>,
    resolvers: Vec<Arc<dyn CustomParameterResolver>>,
    listeners: Vec<(ListenerId, Arc<dyn InstanceCreatedListener>)>,
    disposed: bool,
}

/// Object factory building types described in a [`TypeCatalog`]
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use oro_domain::TypeKey;
/// use oro_infrastructure::di::{DefaultImplementationFactory, TypeCatalog, TypeRegistration};
///
/// #[derive(Default)]
/// struct Clock;
///
/// let catalog = Arc::new(TypeCatalog::new());
/// catalog.register(TypeRegistration::concrete::<Clock>().default_constructor());
///
/// let factory = DefaultImplementationFactory::new(catalog, |_: &TypeKey| true);
/// let first = factory.get_or_create::<Clock>().unwrap();
/// let second = factory.get_or_create::<Clock>().unwrap();
/// assert!(Arc::ptr_eq(&first, &second));
/// ```
pub struct DefaultImplementationFactory {
    catalog: Arc<TypeCatalog>,
    can_cache: CachingPredicate,
    log_diagnostics: bool,
    state: Mutex<FactoryState>,
}

impl DefaultImplementationFactory {
    /// Factory over `catalog` caching the types accepted by `can_cache`
    pub fn new<F>(catalog: Arc<TypeCatalog>, can_cache: F) -> Self
    where
        F: Fn(&TypeKey) -> bool + Send + Sync + 'static,
    {
        Self {
            catalog,
            can_cache: Arc::new(can_cache),
            log_diagnostics: false,
            state: Mutex::new(FactoryState::default()),
        }
    }

    /// Factory configured from the `factory` configuration section
    pub fn from_config(catalog: Arc<TypeCatalog>, config: &FactoryConfig) -> Self {
        let cache_by_default = config.cache_by_default;
        Self::new(catalog, move |_: &TypeKey| cache_by_default)
            .with_log_diagnostics(config.log_diagnostics)
    }

    /// Log every created instance and resolver-supplied value
    pub fn with_log_diagnostics(mut self, enabled: bool) -> Self {
        self.log_diagnostics = enabled;
        self
    }

    /// Catalog the factory builds from
    pub fn catalog(&self) -> &Arc<TypeCatalog> {
        &self.catalog
    }

    // ------------------------------------------------------------------
    // Instance creation
    // ------------------------------------------------------------------

    /// Construct a new instance of `service`
    ///
    /// Dependencies may still come from the cache. When `service` is
    /// cacheable the new instance replaces the cached one, which is disposed.
    pub fn create_instance(&self, service: TypeKey) -> Result<Instance> {
        self.ensure_not_disposed()?;
        let mut scope = ResolutionScope::new(self);
        self.create_in(&mut scope, service, CacheMode::Replace)
    }

    /// Cached instance of `service`, or a new one
    pub fn get_or_create_instance(&self, service: TypeKey) -> Result<Instance> {
        self.ensure_not_disposed()?;
        if let Some(cached) = self.cached_instance(service) {
            return Ok(cached);
        }
        let mut scope = ResolutionScope::new(self);
        self.create_in(&mut scope, service, CacheMode::KeepExisting)
    }

    /// Typed [`Self::create_instance`]
    pub fn create<T: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<T>> {
        downcast_resolved(&self.create_instance(TypeKey::of::<T>())?)
    }

    /// Typed [`Self::get_or_create_instance`]
    pub fn get_or_create<T: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<T>> {
        downcast_resolved(&self.get_or_create_instance(TypeKey::of::<T>())?)
    }

    /// Instance cached for exactly `service`
    pub fn cached_instance(&self, service: TypeKey) -> Option<Instance> {
        self.state
            .lock()
            .cache
            .get(&service)
            .map(|cached| Arc::clone(&cached.instance))
    }

    // ------------------------------------------------------------------
    // Mappings
    // ------------------------------------------------------------------

    /// Map `service` to `implementation`, replacing any existing mapping
    pub fn add_mapping(&self, service: TypeKey, implementation: TypeKey) -> Result<()> {
        let registration = self.catalog.get(implementation).ok_or_else(|| {
            Error::from(ResolutionError::NoImplementation {
                service: service.full_name().to_string(),
                implementation: implementation.full_name().to_string(),
                details: "the implementation type is not registered in the type catalog"
                    .to_string(),
            })
        })?;
        let mapping = validate_mapping(service, registration)?;
        self.state.lock().mappings.insert(service, mapping);
        Ok(())
    }

    /// Typed [`Self::add_mapping`]
    pub fn map<S: ?Sized + 'static, I: ?Sized + 'static>(&self) -> Result<()> {
        self.add_mapping(TypeKey::of::<S>(), TypeKey::of::<I>())
    }

    /// Forget the mapping of `service`
    pub fn remove_mapping(&self, service: TypeKey) -> bool {
        self.state.lock().mappings.remove(&service).is_some()
    }

    /// Implementation currently mapped to `service`
    pub fn implementation_for(&self, service: TypeKey) -> Option<TypeKey> {
        self.state
            .lock()
            .mappings
            .get(&service)
            .map(|mapping| mapping.implementation.key())
    }

    // ------------------------------------------------------------------
    // Custom parameter resolvers
    // ------------------------------------------------------------------

    /// Resolvers in the order they are consulted
    pub fn custom_resolvers(&self) -> Vec<Arc<dyn CustomParameterResolver>> {
        self.state.lock().resolvers.clone()
    }

    /// Add a resolver ahead of every resolver with the same or a lower priority
    pub fn register_custom_resolver(&self, resolver: Arc<dyn CustomParameterResolver>) -> Result<()> {
        let mut state = self.state.lock();
        let id = resolver.id();
        if state.resolvers.iter().any(|existing| existing.id() == id) {
            return Err(Error::invalid_argument(format!(
                "A custom parameter resolver with identifier {id} is already registered"
            )));
        }
        let priority = resolver.priority();
        let position = state
            .resolvers
            .iter()
            .position(|existing| priority >= existing.priority())
            .unwrap_or(state.resolvers.len());
        state.resolvers.insert(position, resolver);
        Ok(())
    }

    /// Remove the resolver with identifier `id`
    pub fn unregister_custom_resolver(&self, id: ResolverId) -> bool {
        let mut state = self.state.lock();
        let before = state.resolvers.len();
        state.resolvers.retain(|resolver| resolver.id() != id);
        state.resolvers.len() != before
    }

    /// Remove every resolver
    pub fn remove_all_custom_resolvers(&self) {
        self.state.lock().resolvers.clear();
    }

    // ------------------------------------------------------------------
    // Listeners
    // ------------------------------------------------------------------

    /// Subscribe to [`InstanceCreated`]
    pub fn subscribe(&self, listener: Arc<dyn InstanceCreatedListener>) -> ListenerId {
        let id = ListenerId::new();
        self.state.lock().listeners.push((id, listener));
        id
    }

    /// Cancel a subscription
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut state = self.state.lock();
        let before = state.listeners.len();
        state.listeners.retain(|(listener_id, _)| *listener_id != id);
        state.listeners.len() != before
    }

    // ------------------------------------------------------------------
    // Disposal
    // ------------------------------------------------------------------

    /// Dispose every cached instance that registered a disposal hook
    ///
    /// Later calls do nothing; the factory rejects further resolutions.
    pub fn dispose(&self) {
        let cached: Vec<CachedInstance> = {
            let mut state = self.state.lock();
            if state.disposed {
                return;
            }
            state.disposed = true;
            state.listeners.clear();
            state.cache.drain().map(|(_, cached)| cached).collect()
        };

        for disposal in cached.iter().filter_map(|cached| cached.disposal.as_ref()) {
            disposal.run();
        }
    }

    /// Whether [`Self::dispose`] was called
    pub fn is_disposed(&self) -> bool {
        self.state.lock().disposed
    }

    fn ensure_not_disposed(&self) -> Result<()> {
        if self.is_disposed() {
            return Err(Error::invalid_argument(
                "The object factory has been disposed",
            ));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Resolution internals
    // ------------------------------------------------------------------

    fn create_in(
        &self,
        scope: &mut ResolutionScope<'_>,
        service: TypeKey,
        mode: CacheMode,
    ) -> Result<Instance> {
        if scope.chain.contains(&service) {
            let chain = scope
                .chain
                .iter()
                .chain(std::iter::once(&service))
                .map(TypeKey::full_name)
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(ResolutionError::CircularDependency {
                service: service.full_name().to_string(),
                chain,
            }
            .into());
        }

        let mapping = self.mapping_for(service)?;

        scope.chain.push(service);
        let constructed = self.construct(scope, service, &mapping);
        scope.chain.pop();
        let (created, target) = constructed?;

        let implementation = mapping.implementation.key();
        log_instance_created(
            self.log_diagnostics,
            service.full_name(),
            implementation.full_name(),
        );

        let instance = if (self.can_cache)(&service) {
            let disposal = mapping
                .implementation
                .has_disposal_hook()
                .then(|| Disposal {
                    registration: Arc::clone(&mapping.implementation),
                    target,
                });
            self.store(service, created, disposal, mode)
        } else {
            created
        };

        self.notify(&InstanceCreated {
            resolved_type: service,
            implementation_type: implementation,
            instance: Arc::clone(&instance),
        });

        Ok(instance)
    }

    fn mapping_for(&self, service: TypeKey) -> Result<Mapping> {
        if let Some(mapping) = self.state.lock().mappings.get(&service) {
            return Ok(mapping.clone());
        }

        let candidate = self
            .sibling_registration(service)
            .or_else(|| self.catalog.get(service))
            .ok_or_else(|| {
                Error::from(ResolutionError::NoImplementation {
                    service: service.full_name().to_string(),
                    implementation: service.full_name().to_string(),
                    details: format!(
                        "Make sure to register '{}' or an implementation mapped to it in the type catalog",
                        service.full_name()
                    ),
                })
            })?;

        let mapping = validate_mapping(service, candidate)?;
        let mut state = self.state.lock();
        Ok(state.mappings.entry(service).or_insert(mapping).clone())
    }

    /// `IWidget` → `Widget` in the same module; absence is not an error
    fn sibling_registration(&self, service: TypeKey) -> Option<Arc<TypeRegistration>> {
        let is_interface = self
            .catalog
            .get(service)
            .map_or(service.is_trait_object(), |registration| {
                registration.is_interface()
            });
        if !is_interface {
            return None;
        }

        let name = service.simple_name();
        let sibling = name.strip_prefix(INTERFACE_NAME_PREFIX)?;
        if sibling.is_empty() {
            return None;
        }
        self.catalog.find_in_module(service.module_path(), sibling)
    }

    fn construct(
        &self,
        scope: &mut ResolutionScope<'_>,
        service: TypeKey,
        mapping: &Mapping,
    ) -> Result<(Instance, Instance)> {
        let implementation = &mapping.implementation;
        let implementation_key = implementation.key();
        let constructor = implementation
            .constructors()
            .get(mapping.constructor)
            .ok_or_else(|| ResolutionError::NoPublicConstructor {
                service: service.full_name().to_string(),
                implementation: implementation_key.full_name().to_string(),
            })?;

        let mut values = Vec::with_capacity(constructor.parameters().len());
        for parameter in constructor.parameters() {
            let value = self
                .resolve_parameter(scope, implementation_key, parameter)
                .map_err(|source| {
                    error!(
                        parameter = %parameter.name,
                        parameter_type = %parameter.parameter_type,
                        implementation = %implementation_key,
                        error = %source,
                        "Failed to resolve constructor parameter"
                    );
                    ResolutionError::ParameterResolution {
                        parameter: parameter.name.clone(),
                        parameter_type: parameter.parameter_type.full_name().to_string(),
                        implementation: implementation_key.full_name().to_string(),
                        source: Box::new(source),
                    }
                })?;
            values.push(value);
        }

        let target = constructor
            .invoke(implementation_key, &values)
            .map_err(|source| {
                error!(
                    implementation = %implementation_key,
                    parameter_types = %constructor.parameter_types(),
                    error = %source,
                    "Constructor invocation failed"
                );
                ResolutionError::ConstructionFailed {
                    implementation: implementation_key.full_name().to_string(),
                    parameter_types: constructor.parameter_types(),
                    source: Box::new(source),
                }
            })?;

        let created = implementation.view_as(&target, service).ok_or_else(|| {
            ResolutionError::InstanceTypeMismatch {
                expected: service.full_name().to_string(),
                actual: implementation_key.full_name().to_string(),
            }
        })?;

        Ok((created, target))
    }

    fn resolve_parameter(
        &self,
        scope: &mut ResolutionScope<'_>,
        constructed_type: TypeKey,
        parameter: &ParameterInfo,
    ) -> Result<Instance> {
        let parameter_type = parameter.parameter_type;
        if let Some(cached) = self.cached_instance(parameter_type) {
            return Ok(cached);
        }

        for resolver in self.custom_resolvers() {
            let Some(value) = resolver.resolve_parameter(scope, constructed_type, parameter)?
            else {
                continue;
            };

            if !instance::is_viewed_as(&value, parameter_type) {
                return Err(ResolutionError::InstanceTypeMismatch {
                    expected: parameter_type.full_name().to_string(),
                    actual: format!("value supplied by custom resolver {}", resolver.id()),
                }
                .into());
            }

            if self.log_diagnostics {
                info!(
                    parameter_type = %parameter_type,
                    constructed_type = %constructed_type,
                    resolver = %resolver.id(),
                    "Created an instance using a custom constructor parameter resolver"
                );
            }

            if (self.can_cache)(&parameter_type) {
                let disposal = self
                    .catalog
                    .get(parameter_type)
                    .filter(|registration| registration.has_disposal_hook())
                    .map(|registration| Disposal {
                        registration,
                        target: Arc::clone(&value),
                    });
                return Ok(self.store(
                    parameter_type,
                    value,
                    disposal,
                    CacheMode::KeepExisting,
                ));
            }
            return Ok(value);
        }

        scope.resolve_key(parameter_type)
    }

    /// Cache `instance` and return the instance callers should receive
    ///
    /// With [`CacheMode::KeepExisting`] an instance stored first by another
    /// request wins and `instance` is disposed. Instances finished after
    /// [`Self::dispose`] are disposed right away and never cached.
    fn store(
        &self,
        key: TypeKey,
        instance: Instance,
        disposal: Option<Disposal>,
        mode: CacheMode,
    ) -> Instance {
        let mut state = self.state.lock();
        if state.disposed {
            drop(state);
            warn!(type_name = %key, "Instance created while the factory was disposed");
            if let Some(disposal) = disposal {
                disposal.run();
            }
            return instance;
        }

        if mode == CacheMode::KeepExisting {
            if let Some(existing) = state.cache.get(&key) {
                let winner = Arc::clone(&existing.instance);
                drop(state);
                if let Some(disposal) = disposal {
                    disposal.run();
                }
                return winner;
            }
        }

        let replaced = state.cache.insert(
            key,
            CachedInstance {
                instance: Arc::clone(&instance),
                disposal,
            },
        );
        drop(state);
        if let Some(disposal) = replaced.and_then(|cached| cached.disposal) {
            disposal.run();
        }
        instance
    }

    fn notify(&self, event: &InstanceCreated) {
        let listeners: Vec<_> = self
            .state
            .lock()
            .listeners
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener.on_instance_created(event);
        }
    }
}

impl Drop for DefaultImplementationFactory {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for DefaultImplementationFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("DefaultImplementationFactory")
            .field("mappings", &state.mappings.len())
            .field("cached", &state.cache.len())
            .field("resolvers", &state.resolvers.len())
            .field("log_diagnostics", &self.log_diagnostics)
            .finish()
    }
}

/// Per-request resolution state handed to custom resolvers
struct ResolutionScope<'f> {
    factory: &'f DefaultImplementationFactory,
    chain: Vec<TypeKey>,
}

impl<'f> ResolutionScope<'f> {
    fn new(factory: &'f DefaultImplementationFactory) -> Self {
        Self {
            factory,
            chain: Vec::new(),
        }
    }
}

impl ServiceResolver for ResolutionScope<'_> {
    fn resolve_key(&mut self, service: TypeKey) -> Result<Instance> {
        if let Some(cached) = self.factory.cached_instance(service) {
            return Ok(cached);
        }
        let factory = self.factory;
        factory.create_in(self, service, CacheMode::KeepExisting)
    }
}

fn validate_mapping(service: TypeKey, implementation: Arc<TypeRegistration>) -> Result<Mapping> {
    let implementation_key = implementation.key();
    let rejected = |details: &str| {
        Error::from(ResolutionError::NoImplementation {
            service: service.full_name().to_string(),
            implementation: implementation_key.full_name().to_string(),
            details: format!(
                "Service type '{}' cannot be mapped to implementation type '{}' since {}",
                service.full_name(),
                implementation_key.full_name(),
                details
            ),
        })
    };

    if !implementation.is_assignable_to(service) {
        return Err(rejected(
            "the implementation type does not implement the service type",
        ));
    }
    if implementation.kind() != TypeKind::Concrete {
        return Err(rejected(
            "the implementation type is an interface or an abstract type",
        ));
    }
    let constructor = implementation.selected_constructor().ok_or_else(|| {
        Error::from(ResolutionError::NoPublicConstructor {
            service: service.full_name().to_string(),
            implementation: implementation_key.full_name().to_string(),
        })
    })?;

    Ok(Mapping {
        implementation,
        constructor,
    })
}

fn downcast_resolved<T: ?Sized + Send + Sync + 'static>(resolved: &Instance) -> Result<Arc<T>> {
    instance::downcast::<T>(resolved).ok_or_else(|| {
        Error::from(ResolutionError::InstanceTypeMismatch {
            expected: std::any::type_name::<T>().to_string(),
            actual: "an instance resolved for another type".to_string(),
        })
    })
}
