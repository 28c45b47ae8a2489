//! Ambient Context and Globals Tests

use std::sync::Arc;
use std::thread;

use oro_domain::error::Error;
use oro_domain::ports::{IdGenerator, TypeBasedSerializer};
use oro_domain::value_objects::BuildStatus;
use oro_domain::TypeKey;
use oro_infrastructure::ambient::{AmbientContext, Globals, ThreadLocalAmbientContext};
use oro_infrastructure::config::AppConfig;
use oro_infrastructure::di::{TypeCatalog, TypeRegistration};
use oro_infrastructure::serialization::SerializerRegistry;
use tempfile::TempDir;

trait Greeter: Send + Sync {
    fn greet(&self) -> &'static str;
}

struct English;

impl Greeter for English {
    fn greet(&self) -> &'static str {
        "hello"
    }
}

struct French;

impl Greeter for French {
    fn greet(&self) -> &'static str {
        "bonjour"
    }
}

#[test]
fn test_shared_slot_set_and_reset() {
    let slot: AmbientContext<dyn Greeter> = AmbientContext::new(Arc::new(English));

    slot.set(Some(Arc::new(French)));
    assert_eq!(slot.current().greet(), "bonjour");
    assert!(!slot.is_default());

    slot.set(None);
    assert_eq!(slot.current().greet(), "hello");
    assert!(slot.is_default());

    slot.set(Some(Arc::new(French)));
    slot.reset();
    assert_eq!(slot.current().greet(), "hello");
}

#[test]
fn test_shared_slot_is_visible_from_other_threads() {
    let slot: Arc<AmbientContext<dyn Greeter>> = Arc::new(AmbientContext::new(Arc::new(English)));
    slot.set(Some(Arc::new(French)));

    let seen = {
        let slot = Arc::clone(&slot);
        thread::spawn(move || slot.current().greet()).join().unwrap()
    };
    assert_eq!(seen, "bonjour");
}

#[test]
fn test_thread_local_slot_falls_back_to_default() {
    let slot: Arc<ThreadLocalAmbientContext<dyn Greeter>> =
        Arc::new(ThreadLocalAmbientContext::new(Arc::new(English)));
    slot.set(Some(Arc::new(French)));

    let seen = {
        let slot = Arc::clone(&slot);
        thread::spawn(move || slot.current().greet()).join().unwrap()
    };
    assert_eq!(seen, "hello");
    assert_eq!(slot.current().greet(), "bonjour");
}

#[test]
fn test_failing_default_is_a_configuration_error() {
    let result = AmbientContext::<dyn Greeter>::try_new(|| Err::<Arc<dyn Greeter>, _>("no locale"));

    match result {
        Err(Error::Configuration { message, .. }) => assert!(message.contains("no locale")),
        other => panic!("Expected Configuration error, got {:?}", other.map(|_| ())),
    }
}

struct FixedIds;

impl IdGenerator for FixedIds {
    fn generate_unique_id(&self) -> i64 {
        7
    }
}

#[test]
fn test_globals_id_generator_can_be_swapped() {
    let globals = Globals::new(AppConfig::default()).unwrap();

    let first = globals.generate_unique_id();
    assert!(globals.generate_unique_id() > first);

    globals.id_generator().set(Some(Arc::new(FixedIds)));
    assert_eq!(globals.generate_unique_id(), 7);
    globals.id_generator().reset();
    assert!(globals.generate_unique_id() > first);
}

mod catalogued {
    #[derive(Default)]
    pub struct Sprocket;
}

#[test]
fn test_globals_serializers_resolve_catalog_types() {
    let catalog = Arc::new(TypeCatalog::new());
    catalog.register(TypeRegistration::concrete::<catalogued::Sprocket>().default_constructor());
    let globals = Globals::with_catalog(AppConfig::default(), catalog).unwrap();

    let serializers = globals.serializers();
    let name = TypeKey::of::<catalogued::Sprocket>().full_name();
    let key: TypeKey = serializers.deserialize(name).unwrap();
    assert_eq!(key, TypeKey::of::<catalogued::Sprocket>());

    let replacement = Arc::new(SerializerRegistry::new());
    globals.serializer_registry().set(Some(replacement));
    assert!(globals.serializers().deserialize::<TypeKey>(name).is_err());
}

#[test]
fn test_globals_object_factory_uses_config() {
    let mut config = AppConfig::default();
    config.factory.cache_by_default = true;
    let catalog = Arc::new(TypeCatalog::new());
    catalog.register(TypeRegistration::concrete::<catalogued::Sprocket>().default_constructor());
    let globals = Globals::with_catalog(config, catalog).unwrap();

    let factory = globals.object_factory();
    let first = factory.get_or_create::<catalogued::Sprocket>().unwrap();
    let second = factory.get_or_create::<catalogued::Sprocket>().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_globals_module_builder() {
    let dir = TempDir::new().unwrap();
    let mut config = AppConfig::default();
    config.codegen.output_dir = dir.path().to_path_buf();
    config.codegen.default_namespace_prefix = "Generated".to_string();
    let globals = Globals::new(config).unwrap();

    let mut builder = globals.start_module_builder("widgets");
    assert!(builder.default_namespace().starts_with("Generated_"));
    builder.start_class("Widget", &[], None).unwrap();

    let outcome = builder.build().unwrap();
    assert!(outcome.success);
    assert_eq!(builder.status(), BuildStatus::Succeeded);
    assert!(dir.path().join("widgets.rs").exists());
}

#[test]
fn test_globals_reject_invalid_config() {
    let mut config = AppConfig::default();
    config.logging.level = "loud".to_string();
    assert!(Globals::new(config).is_err());
}

#[test]
fn test_type_serializer_is_registered_by_globals() {
    let globals = Globals::new(AppConfig::default()).unwrap();
    let serializer = globals
        .serializers()
        .serializer_for_type(TypeKey::of::<TypeKey>())
        .unwrap();
    assert_eq!(serializer.serialized_type(), TypeKey::of::<TypeKey>());
}
