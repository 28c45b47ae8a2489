//! GUID, type and library serializers

use oro_domain::TypeKey;
use oro_domain::ports::ValueSerializer;
use oro_domain::value_objects::LibraryReference;
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

use crate::di::TypeCatalog;

/// GUIDs: parsed case-insensitively, written hyphenated upper-case
#[derive(Debug, Clone, Copy, Default)]
pub struct GuidSerializer;

impl ValueSerializer for GuidSerializer {
    type Value = Uuid;

    fn serialize(&self, value: &Uuid) -> Option<String> {
        Some(value.hyphenated().to_string().to_uppercase())
    }

    fn deserialize(&self, text: &str) -> Option<Uuid> {
        Uuid::parse_str(text.trim()).ok()
    }

    fn to_source_code(&self, value: &Uuid) -> String {
        format!("uuid::Uuid::from_u128({:#034x})", value.as_u128())
    }
}

/// Types, written by full name and resolved through a [`TypeCatalog`]
#[derive(Debug, Clone)]
pub struct TypeKeySerializer {
    catalog: Arc<TypeCatalog>,
}

impl TypeKeySerializer {
    /// Serializer resolving names against `catalog`
    pub fn new(catalog: Arc<TypeCatalog>) -> Self {
        Self { catalog }
    }
}

impl ValueSerializer for TypeKeySerializer {
    type Value = TypeKey;

    fn serialize(&self, value: &TypeKey) -> Option<String> {
        Some(value.full_name().to_string())
    }

    fn deserialize(&self, text: &str) -> Option<TypeKey> {
        let name = text.trim();
        let found = self.catalog.find_by_name(name);
        if found.is_none() {
            error!(type_name = name, "Type is not registered in the type catalog");
        }
        found
    }

    fn to_source_code(&self, value: &TypeKey) -> String {
        if value.is_trait_object() {
            format!("oro_domain::TypeKey::of::<dyn {}>()", value.full_name())
        } else {
            format!("oro_domain::TypeKey::of::<{}>()", value.full_name())
        }
    }
}

/// Libraries, written as their path; the name is the file stem
#[derive(Debug, Clone, Copy, Default)]
pub struct LibraryReferenceSerializer;

impl ValueSerializer for LibraryReferenceSerializer {
    type Value = LibraryReference;

    fn serialize(&self, value: &LibraryReference) -> Option<String> {
        Some(value.path.to_string_lossy().into_owned())
    }

    fn deserialize(&self, text: &str) -> Option<LibraryReference> {
        let path = text.trim();
        if path.is_empty() {
            return None;
        }
        Some(LibraryReference::from_path(path))
    }

    fn to_source_code(&self, value: &LibraryReference) -> String {
        format!(
            "oro_domain::value_objects::LibraryReference::new({:?}, {:?})",
            value.name,
            value.path.to_string_lossy()
        )
    }
}
