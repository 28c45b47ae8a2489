//! Type catalog
//!
//! Rust has no runtime reflection of constructors, so every type the object
//! factory may build is described up front: its kind, the service types it
//! can be viewed as, its public constructors and an optional disposal hook.
//!
//! ## Registration
//!
//! Types are added programmatically with [`TypeCatalog::register`] or
//! contributed at link time:
//!
//! ```text
//! #[linkme::distributed_slice(TYPE_REGISTRATIONS)]
//! static WIDGET: TypeRegistrationEntry = TypeRegistrationEntry {
//!     name: "Widget",
//!     register: widget_registration,
//! };
//! ```
//!
//! [`TypeCatalog::from_linked`] collects every entry of the slice.

use oro_domain::error::{Error, ResolutionError, Result};
use oro_domain::ports::Disposable;
use oro_domain::value_objects::instance::{self, Instance};
use oro_domain::value_objects::{ParameterInfo, TypeKey};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, warn};

/// Registry entry contributed through [`TYPE_REGISTRATIONS`]
pub struct TypeRegistrationEntry {
    /// Name used in diagnostics
    pub name: &'static str,
    /// Builds the registration
    pub register: fn() -> TypeRegistration,
}

/// Link-time collected type registrations
#[linkme::distributed_slice]
pub static TYPE_REGISTRATIONS: [TypeRegistrationEntry] = [..];

/// Kind of a registered type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// Trait object type; never constructed directly
    Interface,
    /// Type that exists only to be specialized; never constructed directly
    Abstract,
    /// Constructible type
    Concrete,
}

type ConstructFn = Arc<dyn Fn(&Arguments<'_>) -> Result<Instance> + Send + Sync>;
type ViewFn = Arc<dyn Fn(&Instance) -> Option<Instance> + Send + Sync>;
type DisposeFn = Arc<dyn Fn(&Instance) -> bool + Send + Sync>;

fn construct_fn<F>(construct: F) -> ConstructFn
where
    F: Fn(&Arguments<'_>) -> Result<Instance> + Send + Sync + 'static,
{
    Arc::new(construct)
}

/// Resolved constructor arguments
pub struct Arguments<'a> {
    implementation: TypeKey,
    parameters: &'a [ParameterInfo],
    values: &'a [Instance],
}

impl Arguments<'_> {
    /// Argument at `position`, viewed as `T`
    pub fn get<T: ?Sized + Send + Sync + 'static>(&self, position: usize) -> Result<Arc<T>> {
        let value = self.values.get(position).ok_or_else(|| {
            Error::invalid_argument(format!(
                "Constructor of '{}' has no parameter at position {}",
                self.implementation, position
            ))
        })?;
        instance::downcast::<T>(value).ok_or_else(|| {
            let actual = self
                .parameters
                .get(position)
                .map_or("unknown", |parameter| parameter.parameter_type.full_name());
            Error::from(ResolutionError::InstanceTypeMismatch {
                expected: std::any::type_name::<T>().to_string(),
                actual: actual.to_string(),
            })
        })
    }

    /// Number of arguments
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the constructor takes no arguments
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A public constructor of a registered type
#[derive(Clone)]
pub struct ConstructorInfo {
    parameters: Vec<ParameterInfo>,
    construct: ConstructFn,
}

impl ConstructorInfo {
    /// Parameters in declaration order
    pub fn parameters(&self) -> &[ParameterInfo] {
        &self.parameters
    }

    /// Comma separated parameter type names
    pub fn parameter_types(&self) -> String {
        self.parameters
            .iter()
            .map(|parameter| parameter.parameter_type.full_name())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Build an instance of `implementation` from resolved values
    pub fn invoke(&self, implementation: TypeKey, values: &[Instance]) -> Result<Instance> {
        if values.len() != self.parameters.len() {
            return Err(Error::invalid_argument(format!(
                "Constructor of '{}' expects {} arguments, got {}",
                implementation,
                self.parameters.len(),
                values.len()
            )));
        }
        (self.construct)(&Arguments {
            implementation,
            parameters: &self.parameters,
            values,
        })
    }
}

impl fmt::Debug for ConstructorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorInfo")
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

/// Description of one type known to the object factory
pub struct TypeRegistration {
    key: TypeKey,
    kind: TypeKind,
    views: HashMap<TypeKey, ViewFn>,
    constructors: Vec<ConstructorInfo>,
    dispose: Option<DisposeFn>,
}

impl TypeRegistration {
    /// Registration of a trait object type
    pub fn interface<T: ?Sized + 'static>() -> Self {
        Self {
            key: TypeKey::of::<T>(),
            kind: TypeKind::Interface,
            views: HashMap::new(),
            constructors: Vec::new(),
            dispose: None,
        }
    }

    /// Builder for a constructible type
    pub fn concrete<T: Send + Sync + 'static>() -> TypeRegistrationBuilder<T> {
        TypeRegistrationBuilder::new(TypeKind::Concrete)
    }

    /// Builder for a type that must not be constructed directly
    pub fn abstract_type<T: Send + Sync + 'static>() -> TypeRegistrationBuilder<T> {
        TypeRegistrationBuilder::new(TypeKind::Abstract)
    }

    /// Registered type
    pub fn key(&self) -> TypeKey {
        self.key
    }

    /// Kind of the registered type
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Whether the type is an interface, declared or inferred from `dyn`
    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface || self.key.is_trait_object()
    }

    /// Public constructors in declaration order
    pub fn constructors(&self) -> &[ConstructorInfo] {
        &self.constructors
    }

    /// Index of the constructor with the most parameters; the first declared
    /// wins ties
    pub fn selected_constructor(&self) -> Option<usize> {
        let mut selected: Option<(usize, usize)> = None;
        for (index, constructor) in self.constructors.iter().enumerate() {
            let count = constructor.parameters.len();
            if selected.is_none_or(|(_, best)| count > best) {
                selected = Some((index, count));
            }
        }
        selected.map(|(index, _)| index)
    }

    /// Whether instances can be used where `service` is expected
    pub fn is_assignable_to(&self, service: TypeKey) -> bool {
        service == self.key || self.views.contains_key(&service)
    }

    /// View an instance of this type as `service`
    pub fn view_as(&self, instance: &Instance, service: TypeKey) -> Option<Instance> {
        if service == self.key && instance::is_viewed_as(instance, service) {
            return Some(Arc::clone(instance));
        }
        self.views.get(&service).and_then(|view| view(instance))
    }

    /// Whether the type registered a disposal hook
    pub fn has_disposal_hook(&self) -> bool {
        self.dispose.is_some()
    }

    /// Run the disposal hook on `instance`; `false` when there is no hook or
    /// the instance is not of this type
    pub fn dispose(&self, instance: &Instance) -> bool {
        self.dispose.as_ref().is_some_and(|dispose| dispose(instance))
    }
}

impl fmt::Debug for TypeRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistration")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("views", &self.views.keys().collect::<Vec<_>>())
            .field("constructors", &self.constructors)
            .field("disposable", &self.dispose.is_some())
            .finish()
    }
}

/// Builder of a [`TypeRegistration`] for a sized type `T`
pub struct TypeRegistrationBuilder<T> {
    registration: TypeRegistration,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Send + Sync + 'static> TypeRegistrationBuilder<T> {
    fn new(kind: TypeKind) -> Self {
        let key = TypeKey::of::<T>();
        let identity: ViewFn = Arc::new(|instance: &Instance| {
            instance::downcast::<T>(instance).map(|_| Arc::clone(instance))
        });
        Self {
            registration: TypeRegistration {
                key,
                kind,
                views: HashMap::from([(key, identity)]),
                constructors: Vec::new(),
                dispose: None,
            },
            _marker: PhantomData,
        }
    }

    /// Declare that `T` can be used as `S`
    ///
    /// `cast` is usually `|value| value`, relying on unsized coercion.
    pub fn implements<S: ?Sized + Send + Sync + 'static>(mut self, cast: fn(Arc<T>) -> Arc<S>) -> Self {
        let view: ViewFn = Arc::new(move |instance: &Instance| {
            instance::downcast::<T>(instance).map(|value| instance::wrap(cast(value)))
        });
        self.registration.views.insert(TypeKey::of::<S>(), view);
        self
    }

    /// Add a public constructor
    ///
    /// `parameters` lists `(name, type)` pairs in declaration order.
    pub fn constructor<F>(mut self, parameters: &[(&str, TypeKey)], construct: F) -> Self
    where
        F: Fn(&Arguments<'_>) -> Result<T> + Send + Sync + 'static,
    {
        let parameters = parameters
            .iter()
            .enumerate()
            .map(|(position, (name, parameter_type))| {
                ParameterInfo::new(position, *name, *parameter_type)
            })
            .collect();
        self.registration.constructors.push(ConstructorInfo {
            parameters,
            construct: construct_fn(move |arguments| {
                construct(arguments).map(|value| instance::wrap(Arc::new(value)))
            }),
        });
        self
    }

    /// Add a parameterless constructor using [`Default`]
    pub fn default_constructor(self) -> Self
    where
        T: Default,
    {
        self.constructor(&[], |_| Ok(T::default()))
    }

    /// Dispose cached instances through [`Disposable`]
    pub fn disposable(mut self) -> Self
    where
        T: Disposable,
    {
        self.registration.dispose = Some(Arc::new(|instance: &Instance| {
            instance::downcast::<T>(instance)
                .map(|value| value.dispose())
                .is_some()
        }));
        self
    }

    /// Finish the registration
    pub fn build(self) -> TypeRegistration {
        self.registration
    }
}

impl<T: Send + Sync + 'static> From<TypeRegistrationBuilder<T>> for TypeRegistration {
    fn from(builder: TypeRegistrationBuilder<T>) -> Self {
        builder.build()
    }
}

/// Registry of type descriptions
#[derive(Default)]
pub struct TypeCatalog {
    registrations: RwLock<HashMap<TypeKey, Arc<TypeRegistration>>>,
}

impl TypeCatalog {
    /// Empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding every registration contributed through [`TYPE_REGISTRATIONS`]
    pub fn from_linked() -> Self {
        let catalog = Self::new();
        for entry in TYPE_REGISTRATIONS {
            debug!(entry = entry.name, "Registering linked type");
            catalog.register((entry.register)());
        }
        catalog
    }

    /// Add a registration
    ///
    /// Returns `false`, keeping the existing registration, when the type is
    /// already registered.
    pub fn register(&self, registration: impl Into<TypeRegistration>) -> bool {
        let registration = registration.into();
        let key = registration.key();
        let mut registrations = self.registrations.write();
        if registrations.contains_key(&key) {
            warn!(type_name = %key, "Type is already registered in the type catalog");
            return false;
        }
        registrations.insert(key, Arc::new(registration));
        true
    }

    /// Registration of `key`
    pub fn get(&self, key: TypeKey) -> Option<Arc<TypeRegistration>> {
        self.registrations.read().get(&key).cloned()
    }

    /// Whether `key` is registered
    pub fn contains(&self, key: TypeKey) -> bool {
        self.registrations.read().contains_key(&key)
    }

    /// Registered type with the given full name (a leading `dyn ` is ignored)
    pub fn find_by_name(&self, name: &str) -> Option<TypeKey> {
        let name = name.strip_prefix("dyn ").unwrap_or(name).trim();
        self.registrations
            .read()
            .keys()
            .find(|key| key.full_name() == name)
            .copied()
    }

    /// Registered type named `simple_name` in `module_path`
    pub fn find_in_module(
        &self,
        module_path: &str,
        simple_name: &str,
    ) -> Option<Arc<TypeRegistration>> {
        self.registrations
            .read()
            .values()
            .find(|registration| {
                let key = registration.key();
                key.module_path() == module_path && key.simple_name() == simple_name
            })
            .cloned()
    }

    /// Registered types
    pub fn keys(&self) -> Vec<TypeKey> {
        self.registrations.read().keys().copied().collect()
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.registrations.read().len()
    }

    /// Whether no type is registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for TypeCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeCatalog")
            .field("types", &self.len())
            .finish()
    }
}
