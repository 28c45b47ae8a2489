//! Tests for the `oro` command implementations

use std::fs;

use oro::cli::{
    Command, canonical_text, check_files, execute, find_serializer, list_serializers, source_code,
};
use oro::infrastructure::config::AppConfig;
use oro::infrastructure::serialization::SerializerRegistry;
use oro::{Globals, TypeKey};

fn globals() -> Globals {
    Globals::new(AppConfig::default()).expect("default configuration is valid")
}

#[test]
fn test_find_serializer_by_simple_and_full_name() {
    let serializers = SerializerRegistry::with_defaults();

    let by_simple = find_serializer(&serializers, "naivedatetime").unwrap();
    assert_eq!(
        by_simple.serialized_type(),
        TypeKey::of::<chrono::NaiveDateTime>()
    );
    let by_full = find_serializer(&serializers, "uuid::Uuid").unwrap();
    assert_eq!(by_full.serialized_type(), TypeKey::of::<uuid::Uuid>());
    assert!(find_serializer(&serializers, "Widget").is_none());
}

#[test]
fn test_canonical_text_normalizes_values() {
    let serializers = SerializerRegistry::with_defaults();

    assert_eq!(canonical_text(&serializers, "i32", " 42 ").unwrap(), "42");
    assert_eq!(canonical_text(&serializers, "bool", "TRUE").unwrap(), "true");
    assert_eq!(
        canonical_text(&serializers, "NaiveDateTime", "2024-02-29T13:45:30.120").unwrap(),
        "2024-02-29 13:45:30.12"
    );
    assert_eq!(
        canonical_text(&serializers, "String", "  padded ").unwrap(),
        "  padded "
    );
}

#[test]
fn test_canonical_text_reports_bad_input() {
    let serializers = SerializerRegistry::with_defaults();

    let err = canonical_text(&serializers, "i32", "forty-two").unwrap_err();
    assert!(err.to_string().contains("forty-two"));
    let err = canonical_text(&serializers, "Widget", "1").unwrap_err();
    assert!(err.to_string().contains("No serializer is registered"));
}

#[test]
fn test_source_code_renders_expression() {
    let serializers = SerializerRegistry::with_defaults();

    assert_eq!(source_code(&serializers, "i32", "42").unwrap(), "42_i32");
    assert_eq!(
        source_code(&serializers, "String", "hello").unwrap(),
        "String::from(\"hello\")"
    );
}

#[test]
fn test_listing_includes_defaults_and_type_keys() {
    let globals = globals();
    let listings = list_serializers(&globals.serializers());

    assert!(listings.iter().any(|listing| listing.name == "i32"));
    assert!(listings.iter().any(|listing| listing.name == "TypeKey"));
    let mut sorted: Vec<_> = listings.iter().map(|listing| listing.full_name).collect();
    sorted.sort_unstable();
    let names: Vec<_> = listings.iter().map(|listing| listing.full_name).collect();
    assert_eq!(names, sorted);
}

#[test]
fn test_types_command_as_json() {
    let output = execute(&globals(), &Command::Types { json: true }).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert!(parsed.as_array().is_some_and(|entries| !entries.is_empty()));
}

#[test]
fn test_check_files_reports_locations() {
    let dir = tempfile::tempdir().unwrap();
    let valid = dir.path().join("valid.rs");
    let broken = dir.path().join("broken.rs");
    fs::write(&valid, "pub struct Widget;\n").unwrap();
    fs::write(&broken, "pub struct Broken {\n    field u32,\n}\n").unwrap();

    let output = check_files(std::slice::from_ref(&valid)).unwrap();
    assert!(output.contains("1 file(s) checked"));

    let err = check_files(&[valid, broken.clone()]).unwrap_err().to_string();
    assert!(err.contains(&format!("{}:2:", broken.display())));
    assert!(err.contains("1 syntax error(s) found"));
}

#[test]
fn test_check_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.rs");

    let err = check_files(&[missing]).unwrap_err();
    assert!(err.to_string().starts_with("Failed to read"));
}
