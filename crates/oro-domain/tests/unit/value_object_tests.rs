//! Value Object Tests

use oro_domain::value_objects::{
    CompilationOutcome, Diagnostic, LibraryReference, ResolverId, ResolverPriority,
};

#[test]
fn test_resolver_priority_ordering() {
    assert!(ResolverPriority::High > ResolverPriority::Medium);
    assert!(ResolverPriority::Medium > ResolverPriority::Low);
    assert_eq!(ResolverPriority::default(), ResolverPriority::Medium);
}

#[test]
fn test_resolver_ids_are_unique() {
    assert_ne!(ResolverId::new(), ResolverId::new());
}

#[test]
fn test_library_reference_from_path() {
    let library = LibraryReference::from_path("/usr/lib/Widgets.rlib");

    assert_eq!(library.name, "Widgets");
    assert!(library.has_name("widgets"));
    assert!(library.has_same_path(&LibraryReference::new("other", "/USR/LIB/widgets.RLIB")));
}

#[test]
fn test_library_reference_serde() {
    let library = LibraryReference::new("core", "/tmp/core.rlib");
    let json = serde_json::to_string(&library).unwrap();
    let parsed: LibraryReference = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, library);
}

#[test]
fn test_diagnostic_display_and_outcome_errors() {
    let diagnostic = Diagnostic::error(2, "expected `}`").at(10, 4);
    assert_eq!(diagnostic.to_string(), "error: source #2:10:4: expected `}`");

    let outcome = CompilationOutcome::failed(vec![diagnostic]);
    assert!(!outcome.success);
    assert_eq!(outcome.errors().count(), 1);
    assert!(CompilationOutcome::succeeded().success);
}
