//! Default-implementation object factory
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`catalog`] | Type descriptions standing in for constructor reflection |
//! | [`factory`] | Mapping, constructor selection, parameter resolution, caching |
//! | [`resolvers`] | Closure and fixed-value custom parameter resolvers |
//! | [`events`] | Instance creation notifications |

pub mod catalog;
pub mod events;
pub mod factory;
pub mod resolvers;

pub use catalog::{
    Arguments, ConstructorInfo, TYPE_REGISTRATIONS, TypeCatalog, TypeKind, TypeRegistration,
    TypeRegistrationBuilder, TypeRegistrationEntry,
};
pub use events::{InstanceCreated, InstanceCreatedListener, ListenerId};
pub use factory::DefaultImplementationFactory;
pub use resolvers::{FnParameterResolver, ValueParameterResolver};
