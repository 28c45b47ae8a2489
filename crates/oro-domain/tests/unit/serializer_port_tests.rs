//! Typed serializer adapter tests

use oro_domain::ports::{TypeBasedSerializer, TypedSerializer, ValueSerializer};
use oro_domain::value_objects::TypeKey;

struct Celsius(f64);

struct CelsiusSerializer;

impl ValueSerializer for CelsiusSerializer {
    type Value = Celsius;

    fn serialize(&self, value: &Celsius) -> Option<String> {
        Some(format!("{}C", value.0))
    }

    fn deserialize(&self, text: &str) -> Option<Celsius> {
        text.strip_suffix('C')?.parse().ok().map(Celsius)
    }

    fn to_source_code(&self, value: &Celsius) -> String {
        format!("Celsius({:?})", value.0)
    }
}

#[test]
fn test_adapter_reports_serialized_type() {
    let serializer = TypedSerializer(CelsiusSerializer);

    assert_eq!(serializer.serialized_type(), TypeKey::of::<Celsius>());
    assert!(serializer.name().ends_with("CelsiusSerializer"));
}

#[test]
fn test_adapter_trims_pop_directional_formatting() {
    let serializer = TypedSerializer(CelsiusSerializer);

    let value = serializer
        .try_deserialize("21.5C\u{202c}")
        .expect("trailing U+202C is ignored");
    let value = value.downcast::<Celsius>().expect("value is Celsius");
    assert!((value.0 - 21.5).abs() < f64::EPSILON);
}

#[test]
fn test_adapter_rejects_foreign_values() {
    let serializer = TypedSerializer(CelsiusSerializer);

    assert_eq!(serializer.try_serialize(&Celsius(3.0)).as_deref(), Some("3C"));
    assert!(serializer.try_serialize(&3.0_f64).is_none());
    assert!(serializer.to_source_code(&"text").is_none());
    assert_eq!(
        serializer.to_source_code(&Celsius(1.5)).as_deref(),
        Some("Celsius(1.5)")
    );
}
