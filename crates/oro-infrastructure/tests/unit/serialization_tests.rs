//! Serializer Registry Tests

use std::any::Any;
use std::collections::HashSet;
use std::fmt::Debug;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use oro_domain::ports::{SerializedValue, TypeBasedSerializer, TypedSerializer, ValueSerializer};
use oro_domain::value_objects::LibraryReference;
use oro_domain::TypeKey;
use oro_infrastructure::di::{TypeCatalog, TypeRegistration};
use oro_infrastructure::serialization::{
    I16Serializer, I32Serializer, SerializerRegistry, TypeKeySerializer,
};
use uuid::Uuid;

#[test]
fn test_int_round_trip() {
    let registry = SerializerRegistry::with_defaults();

    let (ok, value) = registry.try_deserialize_as::<i32>("2147483647", 0);
    assert!(ok);
    assert_eq!(value, 2_147_483_647);
    assert_eq!(registry.serialize(&value).as_deref(), Some("2147483647"));
}

#[test]
fn test_guid_is_written_upper_case() {
    let registry = SerializerRegistry::with_defaults();

    let guid: Uuid = registry
        .deserialize("30a43779-f16d-4f93-b57b-c4df845c1b47")
        .unwrap();
    assert_eq!(
        guid,
        Uuid::parse_str("30A43779-F16D-4F93-B57B-C4DF845C1B47").unwrap()
    );
    assert_eq!(
        registry.serialize(&guid).as_deref(),
        Some("30A43779-F16D-4F93-B57B-C4DF845C1B47")
    );
}

/// Serializer for `i32` that tags its output so it can be told apart
struct TaggedI32;

impl ValueSerializer for TaggedI32 {
    type Value = i32;

    fn serialize(&self, value: &i32) -> Option<String> {
        Some(format!("tagged:{value}"))
    }

    fn deserialize(&self, text: &str) -> Option<i32> {
        text.strip_prefix("tagged:")?.parse().ok()
    }

    fn to_source_code(&self, value: &i32) -> String {
        value.to_string()
    }
}

#[test]
fn test_second_registration_is_rejected() {
    let registry = SerializerRegistry::new();
    let first: Arc<dyn TypeBasedSerializer> = Arc::new(TypedSerializer(I32Serializer));

    assert!(registry.register(Arc::clone(&first)));
    assert!(!registry.register_value(TaggedI32));

    let active = registry
        .serializer_for_type(TypeKey::of::<i32>())
        .unwrap();
    assert!(Arc::ptr_eq(&active, &first));
    assert_eq!(registry.serialize(&5_i32).as_deref(), Some("5"));
}

#[test]
fn test_unregister_then_register_replaces() {
    let registry = SerializerRegistry::with_defaults();

    assert!(registry.unregister(TypeKey::of::<i32>()));
    assert!(!registry.unregister(TypeKey::of::<i32>()));
    assert!(registry.register_value(TaggedI32));
    assert_eq!(registry.serialize(&5_i32).as_deref(), Some("tagged:5"));
}

#[test]
fn test_unregistered_type_leaves_default() {
    let registry = SerializerRegistry::new();

    let (ok, value) = registry.try_deserialize_as::<i32>("12", 7);
    assert!(!ok);
    assert_eq!(value, 7);
    assert!(registry.deserialize::<i32>("12").is_err());
    assert!(registry.try_serialize(&12_i32).is_none());
}

#[test]
fn test_invalid_text_is_rejected() {
    let registry = SerializerRegistry::with_defaults();

    assert!(registry.try_deserialize(TypeKey::of::<i32>(), "12.5").is_none());
    assert!(registry.try_deserialize(TypeKey::of::<u8>(), "256").is_none());
    assert!(registry.try_deserialize(TypeKey::of::<bool>(), "yes").is_none());
}

#[test]
fn test_date_time_round_trip() {
    let registry = SerializerRegistry::with_defaults();
    let value = NaiveDate::from_ymd_opt(2024, 2, 29)
        .unwrap()
        .and_hms_milli_opt(13, 5, 9, 120)
        .unwrap();

    let text = registry.serialize(&value).unwrap();
    assert_eq!(text, "2024-02-29 13:05:09.12");
    assert_eq!(registry.deserialize::<chrono::NaiveDateTime>(&text).unwrap(), value);
}

#[test]
fn test_strings_keep_surrounding_whitespace() {
    let registry = SerializerRegistry::with_defaults();

    let value: String = registry.deserialize("  padded \u{202c}").unwrap();
    assert_eq!(value, "  padded ");
}

#[test]
fn test_library_reference_uses_path() {
    let registry = SerializerRegistry::with_defaults();

    let library: LibraryReference = registry.deserialize("/opt/libs/widgets.rlib").unwrap();
    assert_eq!(library.name, "widgets");
    assert_eq!(
        registry.serialize(&library).as_deref(),
        Some("/opt/libs/widgets.rlib")
    );
}

mod shapes {
    #[derive(Default)]
    pub struct Circle;
}

#[test]
fn test_type_key_through_catalog() {
    let catalog = Arc::new(TypeCatalog::new());
    catalog.register(TypeRegistration::concrete::<shapes::Circle>().default_constructor());
    let registry = SerializerRegistry::with_defaults();
    assert!(registry.register_value(TypeKeySerializer::new(catalog)));

    let name = TypeKey::of::<shapes::Circle>().full_name();
    let key: TypeKey = registry.deserialize(name).unwrap();
    assert_eq!(key, TypeKey::of::<shapes::Circle>());
    assert_eq!(registry.serialize(&key).as_deref(), Some(name));
    assert!(registry.deserialize::<TypeKey>("no::such::Type").is_err());
}

#[test]
fn test_to_source_code() {
    let registry = SerializerRegistry::with_defaults();

    assert_eq!(registry.to_source_code(&42_i32).as_deref(), Some("42_i32"));
    assert_eq!(
        registry.to_source_code(&"a\"b".to_string()).as_deref(),
        Some("String::from(\"a\\\"b\")")
    );
    assert!(registry.to_source_code(&1_u64).is_none());
}

#[test]
fn test_registered_serializers_are_listed() {
    let registry = SerializerRegistry::with_defaults();

    let types: Vec<TypeKey> = registry
        .registered_serializers()
        .iter()
        .map(|serializer| serializer.serialized_type())
        .collect();
    assert!(types.contains(&TypeKey::of::<f64>()));
    assert!(types.contains(&TypeKey::of::<String>()));
    assert!(registry.has_serializer_for_type(TypeKey::of::<Uuid>()));
}

/// Parse `text` and format the result again, both through the registry
fn assert_round_trip<T>(
    registry: &SerializerRegistry,
    covered: &mut HashSet<TypeKey>,
    text: &str,
    value: T,
) where
    T: Any + Send + Sync + PartialEq + Debug,
{
    let parsed: T = registry
        .deserialize(text)
        .unwrap_or_else(|error| panic!("{text:?}: {error}"));
    assert_eq!(parsed, value, "parsing {text:?}");
    assert_eq!(
        registry.serialize(&value).as_deref(),
        Some(text),
        "formatting {value:?}"
    );
    covered.insert(TypeKey::of::<T>());
}

fn date_time(text: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f").unwrap()
}

#[test]
fn test_every_registered_serializer_round_trips() {
    let catalog = Arc::new(TypeCatalog::new());
    catalog.register(TypeRegistration::concrete::<shapes::Circle>().default_constructor());
    let registry = SerializerRegistry::with_defaults();
    assert!(registry.register_value(TypeKeySerializer::new(catalog)));
    let mut covered = HashSet::new();

    for (text, value) in [("", ""), ("hello world", "hello world"), (" x ", " x ")] {
        assert_round_trip(&registry, &mut covered, text, value.to_string());
    }
    for (text, value) in [("true", true), ("false", false)] {
        assert_round_trip(&registry, &mut covered, text, value);
    }
    for (text, value) in [
        ("-9223372036854775808", i64::MIN),
        ("9223372036854775807", i64::MAX),
        ("0", 0),
    ] {
        assert_round_trip(&registry, &mut covered, text, value);
    }
    for (text, value) in [("-2147483648", i32::MIN), ("2147483647", i32::MAX)] {
        assert_round_trip(&registry, &mut covered, text, value);
    }
    for (text, value) in [("-32768", i16::MIN), ("32767", i16::MAX)] {
        assert_round_trip(&registry, &mut covered, text, value);
    }
    for (text, value) in [("0", u8::MIN), ("255", u8::MAX)] {
        assert_round_trip(&registry, &mut covered, text, value);
    }
    for (text, value) in [
        ("0.1", 0.1),
        ("-2.5", -2.5),
        ("Infinity", f64::INFINITY),
        ("-Infinity", f64::NEG_INFINITY),
    ] {
        assert_round_trip(&registry, &mut covered, text, value);
    }
    for text in ["2024-02-29 13:05:09.12", "0001-01-01 00:00:00", "9999-12-31 23:59:59.999"] {
        assert_round_trip(&registry, &mut covered, text, date_time(text));
    }
    for text in [
        "00000000-0000-0000-0000-000000000000",
        "30A43779-F16D-4F93-B57B-C4DF845C1B47",
    ] {
        assert_round_trip(&registry, &mut covered, text, Uuid::parse_str(text).unwrap());
    }
    assert_round_trip(
        &registry,
        &mut covered,
        "/opt/libs/widgets.rlib",
        LibraryReference::from_path("/opt/libs/widgets.rlib"),
    );
    let circle = TypeKey::of::<shapes::Circle>();
    assert_round_trip(&registry, &mut covered, circle.full_name(), circle);

    let registered: HashSet<TypeKey> = registry
        .registered_serializers()
        .iter()
        .map(|serializer| serializer.serialized_type())
        .collect();
    assert_eq!(covered, registered);
}

#[test]
fn test_nan_survives_a_round_trip() {
    let registry = SerializerRegistry::with_defaults();

    assert_eq!(registry.serialize(&f64::NAN).as_deref(), Some("NaN"));
    assert!(registry.deserialize::<f64>("NaN").unwrap().is_nan());
}

#[test]
fn test_values_past_the_type_bounds_are_rejected() {
    let registry = SerializerRegistry::with_defaults();

    assert!(registry.deserialize::<i64>("9223372036854775808").is_err());
    assert!(registry.deserialize::<i32>("-2147483649").is_err());
    assert!(registry.deserialize::<i16>("-32769").is_err());
    assert!(registry.deserialize::<u8>("-1").is_err());
    assert!(registry.deserialize::<bool>("").is_err());
}

/// Registered for `i64` but parses with the 16-bit serializer
struct ShortI64;

impl TypeBasedSerializer for ShortI64 {
    fn serialized_type(&self) -> TypeKey {
        TypeKey::of::<i64>()
    }

    fn name(&self) -> &str {
        "ShortI64"
    }

    fn try_deserialize(&self, text: &str) -> Option<SerializedValue> {
        TypedSerializer(I16Serializer).try_deserialize(text)
    }

    fn try_serialize(&self, value: &dyn Any) -> Option<String> {
        value.downcast_ref::<i64>().map(i64::to_string)
    }

    fn to_source_code(&self, value: &dyn Any) -> Option<String> {
        self.try_serialize(value)
    }
}

#[test]
fn test_narrow_value_is_widened_to_requested_type() {
    let registry = SerializerRegistry::new();
    assert!(registry.register(Arc::new(ShortI64)));

    let value = registry
        .try_deserialize(TypeKey::of::<i64>(), "-32768")
        .unwrap();
    assert_eq!(value.downcast_ref::<i64>(), Some(&-32768));
    assert_eq!(registry.deserialize::<i64>("32767").unwrap(), 32767);
    assert!(registry.try_deserialize(TypeKey::of::<i64>(), "40000").is_none());
}
