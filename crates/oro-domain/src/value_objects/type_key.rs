//! Runtime type identity
//!
//! A [`TypeKey`] pairs a [`TypeId`] with the type's fully-qualified name, so
//! types can be compared cheaply and still be named in logs and errors.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of a (possibly unsized) Rust type
///
/// Equality and hashing only consider the [`TypeId`]; the name is carried for
/// diagnostics and for naming-convention lookups.
///
/// # Example
///
/// ```
/// use oro_domain::value_objects::TypeKey;
///
/// trait IWidget {}
///
/// let key = TypeKey::of::<dyn IWidget>();
/// assert_eq!(key.simple_name(), "IWidget");
/// assert!(key.is_trait_object());
/// assert_eq!(TypeKey::of::<i32>().full_name(), "i32");
/// ```
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    shared_id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Key of type `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            shared_id: TypeId::of::<std::sync::Arc<T>>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The underlying [`TypeId`]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// [`TypeId`] of `Arc<T>`, the representation stored inside an instance
    pub fn shared_id(&self) -> TypeId {
        self.shared_id
    }

    /// Whether this key describes a `dyn Trait` type
    pub fn is_trait_object(&self) -> bool {
        self.name.starts_with("dyn ")
    }

    /// Fully-qualified name without the `dyn ` prefix and auto-trait bounds
    pub fn full_name(&self) -> &'static str {
        let name = self.name.strip_prefix("dyn ").unwrap_or(self.name);
        match name.find(" + ") {
            Some(end) => &name[..end],
            None => name,
        }
    }

    /// Last path segment of the name, generic arguments excluded
    pub fn simple_name(&self) -> &'static str {
        let base = self.base_path();
        match base.rfind("::") {
            Some(separator) => &base[separator + 2..],
            None => base,
        }
    }

    /// Module path of the type (empty for primitives)
    pub fn module_path(&self) -> &'static str {
        let base = self.base_path();
        match base.rfind("::") {
            Some(separator) => &base[..separator],
            None => "",
        }
    }

    fn base_path(&self) -> &'static str {
        let name = self.full_name();
        match name.find('<') {
            Some(generics) => &name[..generics],
            None => name,
        }
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.full_name())
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.full_name())
    }
}
