//! Referenced libraries of generated code

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A library referenced by generated code
///
/// Libraries are identified by name; the name defaults to the file stem of
/// the path and is compared case-insensitively.
///
/// # Example
///
/// ```
/// use oro_domain::value_objects::LibraryReference;
///
/// let library = LibraryReference::from_path("/opt/libs/libwidgets.rlib");
/// assert_eq!(library.name, "libwidgets");
/// assert!(library.has_name("LIBWIDGETS"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LibraryReference {
    /// Library name
    pub name: String,
    /// Location of the library artifact
    pub path: PathBuf,
}

impl LibraryReference {
    /// Create a reference with an explicit name
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Create a reference named after the file stem of `path`
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::new(name, path)
    }

    /// Case-insensitive name comparison
    pub fn has_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Case-insensitive path comparison
    pub fn has_same_path(&self, other: &LibraryReference) -> bool {
        self.path
            .to_string_lossy()
            .eq_ignore_ascii_case(&other.path.to_string_lossy())
    }
}
