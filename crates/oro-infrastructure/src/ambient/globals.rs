//! Application root object
//!
//! [`Globals`] owns the ambient slots the utilities rely on. Create one at
//! start-up (tests create their own) and pass it where it is needed.

use std::path::PathBuf;
use std::sync::Arc;

use oro_domain::constants::DEFAULT_DYNAMIC_NAMESPACE_PREFIX;
use oro_domain::error::Result;
use oro_domain::ports::{IdGenerator, SourceCompiler};
use tracing::debug;

use super::context::AmbientContext;
use super::id::TickIdGenerator;
use crate::codegen::{DynamicModuleBuilder, SyntaxCheckingCompiler};
use crate::config::AppConfig;
use crate::config::loader::validate_app_config;
use crate::constants::GENERATED_ARTIFACT_EXTENSION;
use crate::di::{DefaultImplementationFactory, TypeCatalog};
use crate::serialization::{SerializerRegistry, TypeKeySerializer};

/// Ambient slots and shared services of one application
///
/// # Example
///
/// ```
/// use oro_infrastructure::ambient::Globals;
/// use oro_infrastructure::config::AppConfig;
///
/// let globals = Globals::new(AppConfig::default()).unwrap();
/// let first = globals.generate_unique_id();
/// assert!(globals.generate_unique_id() > first);
/// assert!(globals.serializers().has_serializer_for_type(oro_domain::TypeKey::of::<i32>()));
/// ```
pub struct Globals {
    config: AppConfig,
    catalog: Arc<TypeCatalog>,
    id_generator: AmbientContext<dyn IdGenerator>,
    serializers: AmbientContext<SerializerRegistry>,
    compiler: AmbientContext<dyn SourceCompiler>,
}

impl Globals {
    /// Globals over the link-time type catalog
    pub fn new(config: AppConfig) -> Result<Self> {
        Self::with_catalog(config, Arc::new(TypeCatalog::from_linked()))
    }

    /// Globals over an explicit type catalog
    pub fn with_catalog(config: AppConfig, catalog: Arc<TypeCatalog>) -> Result<Self> {
        validate_app_config(&config)?;

        let id_generator: Arc<dyn IdGenerator> = Arc::new(TickIdGenerator::new());
        let serializers = SerializerRegistry::with_defaults();
        serializers.register_value(TypeKeySerializer::new(Arc::clone(&catalog)));
        let compiler: Arc<dyn SourceCompiler> = Arc::new(
            SyntaxCheckingCompiler::new().with_write_artifact(config.codegen.write_artifact),
        );

        debug!(types = catalog.len(), "Globals initialized");
        Ok(Self {
            config,
            catalog,
            id_generator: AmbientContext::new(id_generator),
            serializers: AmbientContext::new(Arc::new(serializers)),
            compiler: AmbientContext::new(compiler),
        })
    }

    /// Configuration the globals were created with
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Shared type catalog
    pub fn catalog(&self) -> &Arc<TypeCatalog> {
        &self.catalog
    }

    /// Unique-id generator slot
    pub fn id_generator(&self) -> &AmbientContext<dyn IdGenerator> {
        &self.id_generator
    }

    /// Serializer registry slot
    pub fn serializer_registry(&self) -> &AmbientContext<SerializerRegistry> {
        &self.serializers
    }

    /// Compiler slot used by new module builders
    pub fn compiler(&self) -> &AmbientContext<dyn SourceCompiler> {
        &self.compiler
    }

    /// Next process-unique id from the current generator
    pub fn generate_unique_id(&self) -> i64 {
        self.id_generator.current().generate_unique_id()
    }

    /// Current serializer registry
    pub fn serializers(&self) -> Arc<SerializerRegistry> {
        self.serializers.current()
    }

    /// Object factory over the shared catalog, configured from the `factory` section
    pub fn object_factory(&self) -> DefaultImplementationFactory {
        DefaultImplementationFactory::from_config(Arc::clone(&self.catalog), &self.config.factory)
    }

    /// Where a module builder named `artifact_name` writes its artifact
    pub fn artifact_path(&self, artifact_name: &str) -> PathBuf {
        self.config
            .codegen
            .output_dir
            .join(format!("{artifact_name}.{GENERATED_ARTIFACT_EXTENSION}"))
    }

    /// Start a module builder writing `<output_dir>/<artifact_name>.rs`
    pub fn start_module_builder(&self, artifact_name: &str) -> DynamicModuleBuilder {
        let builder = DynamicModuleBuilder::new(
            self.artifact_path(artifact_name),
            self.compiler.current(),
            self.id_generator.current(),
        );
        let prefix = &self.config.codegen.default_namespace_prefix;
        if prefix == DEFAULT_DYNAMIC_NAMESPACE_PREFIX {
            builder
        } else {
            builder.with_namespace_prefix(prefix)
        }
    }
}

impl std::fmt::Debug for Globals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Globals")
            .field("config", &self.config)
            .field("catalog", &self.catalog)
            .field("id_generator", &self.id_generator)
            .field("serializers", &self.serializers)
            .field("compiler", &self.compiler.current().name())
            .finish()
    }
}
