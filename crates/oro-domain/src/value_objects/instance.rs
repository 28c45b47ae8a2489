//! Type-erased shared instances
//!
//! The object factory hands instances around without knowing their static
//! type. An [`Instance`] always wraps an `Arc<T>` where `T` is the type the
//! instance is *viewed as* (for example `dyn IWidget`), which lets unsized
//! trait objects travel through `dyn Any`.

use std::any::Any;
use std::sync::Arc;

use super::TypeKey;

/// Type-erased `Arc<T>`
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Wrap a shared value so it can be stored as an [`Instance`] viewed as `T`
pub fn wrap<T: ?Sized + Send + Sync + 'static>(value: Arc<T>) -> Instance {
    Arc::new(value)
}

/// Recover the `Arc<T>` stored by [`wrap`]
///
/// Returns `None` when the instance is viewed as a different type.
pub fn downcast<T: ?Sized + Send + Sync + 'static>(instance: &Instance) -> Option<Arc<T>> {
    instance.downcast_ref::<Arc<T>>().cloned()
}

/// Whether the instance was wrapped as `Arc<T>` for the `T` described by `key`
pub fn is_viewed_as(instance: &Instance, key: TypeKey) -> bool {
    (**instance).type_id() == key.shared_id()
}

/// Whether two instances share the same allocation
pub fn same_instance<T: ?Sized + Send + Sync + 'static>(left: &Instance, right: &Instance) -> bool {
    match (downcast::<T>(left), downcast::<T>(right)) {
        (Some(left), Some(right)) => Arc::ptr_eq(&left, &right),
        _ => false,
    }
}
