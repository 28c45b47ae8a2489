//! Dynamic module builder
//!
//! Collects generated classes and raw source files, then hands them to a
//! [`SourceCompiler`] exactly once: on [`DynamicModuleBuilder::build`] or,
//! failing that, when the builder is dropped while still started.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use oro_domain::constants::DEFAULT_DYNAMIC_NAMESPACE_PREFIX;
use oro_domain::error::{Error, Result};
use oro_domain::ports::{IdGenerator, SourceCompiler};
use oro_domain::value_objects::{
    BuildStatus, CompilationOutcome, CompilationRequest, Diagnostic, LibraryReference,
};
use tracing::{debug, error, warn};

use super::class::{GeneratedClass, indent, is_identifier, is_module_path};
use crate::logging::log_build_outcome;

/// Callback invoked once the compile step ran: `(artifact path, success, outcome)`
pub type BuildCallback = Box<dyn FnOnce(&Path, bool, &CompilationOutcome) + Send>;

/// Accumulates generated source and compiles it into one artifact
///
/// # Example
///
/// ```
/// use oro_infrastructure::ambient::TickIdGenerator;
/// use oro_infrastructure::codegen::{DynamicModuleBuilder, SyntaxCheckingCompiler};
/// use oro_domain::value_objects::BuildStatus;
/// use std::sync::Arc;
///
/// let dir = tempfile::tempdir().unwrap();
/// let mut builder = DynamicModuleBuilder::new(
///     dir.path().join("generated.rs"),
///     Arc::new(SyntaxCheckingCompiler::new()),
///     Arc::new(TickIdGenerator::new()),
/// );
/// builder.start_class("Widget", &[], None).unwrap().finalize().unwrap();
///
/// let outcome = builder.build().unwrap();
/// assert!(outcome.success);
/// assert_eq!(builder.status(), BuildStatus::Succeeded);
/// ```
pub struct DynamicModuleBuilder {
    artifact_path: PathBuf,
    default_namespace: String,
    compiler: Arc<dyn SourceCompiler>,
    id_generator: Arc<dyn IdGenerator>,
    classes: Vec<GeneratedClass>,
    source_files: Vec<String>,
    references: Vec<LibraryReference>,
    status: BuildStatus,
    on_complete: Option<BuildCallback>,
    outcome: Option<CompilationOutcome>,
}

impl DynamicModuleBuilder {
    /// Builder compiling into `artifact_path`
    ///
    /// The default namespace is `DynamicImplementations_<unique id>`.
    pub fn new(
        artifact_path: impl Into<PathBuf>,
        compiler: Arc<dyn SourceCompiler>,
        id_generator: Arc<dyn IdGenerator>,
    ) -> Self {
        let default_namespace = format!(
            "{}_{}",
            DEFAULT_DYNAMIC_NAMESPACE_PREFIX,
            id_generator.generate_unique_id()
        );
        Self {
            artifact_path: artifact_path.into(),
            default_namespace,
            compiler,
            id_generator,
            classes: Vec::new(),
            source_files: Vec::new(),
            references: Vec::new(),
            status: BuildStatus::Started,
            on_complete: None,
            outcome: None,
        }
    }

    /// Replace the default namespace prefix, keeping a fresh unique id
    pub fn with_namespace_prefix(mut self, prefix: &str) -> Self {
        self.default_namespace = format!("{}_{}", prefix, self.id_generator.generate_unique_id());
        self
    }

    /// Callback invoked after the compile step
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(&Path, bool, &CompilationOutcome) + Send + 'static,
    {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Where the artifact is written
    pub fn artifact_path(&self) -> &Path {
        &self.artifact_path
    }

    /// Namespace of classes started without one
    pub fn default_namespace(&self) -> &str {
        &self.default_namespace
    }

    /// Current build status
    pub fn status(&self) -> BuildStatus {
        self.status
    }

    /// Outcome of the compile step, once it ran
    pub fn outcome(&self) -> Option<&CompilationOutcome> {
        self.outcome.as_ref()
    }

    /// Start a class, or return the class already started under the same full name
    pub fn start_class(
        &mut self,
        name: &str,
        bases: &[&str],
        namespace: Option<&str>,
    ) -> Result<&mut GeneratedClass> {
        self.ensure_started("start a class")?;
        let namespace = namespace.unwrap_or(&self.default_namespace).to_string();
        if !is_identifier(name) {
            return Err(Error::invalid_argument(format!(
                "'{name}' is not a valid type name"
            )));
        }
        if !is_module_path(&namespace) {
            return Err(Error::invalid_argument(format!(
                "'{namespace}' is not a valid module path"
            )));
        }

        if let Some(index) = self.class_index(name, &namespace) {
            warn!(
                class = %self.classes[index].full_name(),
                "Class was already started; returning the existing class"
            );
            return Ok(&mut self.classes[index]);
        }

        debug!(class = name, namespace = %namespace, "Starting class");
        self.classes.push(GeneratedClass::new(
            name,
            namespace,
            bases,
            self.id_generator.clone(),
        ));
        let index = self.classes.len() - 1;
        Ok(&mut self.classes[index])
    }

    /// Class started under `name` in `namespace` (default namespace when `None`)
    pub fn class(&self, name: &str, namespace: Option<&str>) -> Option<&GeneratedClass> {
        let namespace = namespace.unwrap_or(&self.default_namespace);
        self.class_index(name, namespace)
            .map(|index| &self.classes[index])
    }

    /// Mutable access to a started class
    pub fn class_mut(&mut self, name: &str, namespace: Option<&str>) -> Option<&mut GeneratedClass> {
        let namespace = namespace.unwrap_or(&self.default_namespace).to_string();
        self.class_index(name, &namespace)
            .map(|index| &mut self.classes[index])
    }

    /// Started classes in start order
    pub fn classes(&self) -> &[GeneratedClass] {
        &self.classes
    }

    /// Add a complete source file
    pub fn add_source_file(&mut self, source: impl Into<String>) -> Result<()> {
        self.ensure_started("add a source file")?;
        self.source_files.push(source.into());
        Ok(())
    }

    /// Reference a library; returns `false` when a library of the same name exists
    ///
    /// Names compare case-insensitively. A clash with a different path logs a
    /// warning and keeps the first path.
    pub fn add_referenced_library(&mut self, library: LibraryReference) -> bool {
        match self
            .references
            .iter()
            .find(|existing| existing.has_name(&library.name))
        {
            Some(existing) => {
                if !existing.has_same_path(&library) {
                    warn!(
                        library = %library.name,
                        kept = %existing.path.display(),
                        ignored = %library.path.display(),
                        "Library already referenced with a different path"
                    );
                }
                false
            }
            None => {
                self.references.push(library);
                true
            }
        }
    }

    /// Reference the library at `path`, named after its file stem
    pub fn add_referenced_library_path(&mut self, path: impl AsRef<Path>) -> bool {
        self.add_referenced_library(LibraryReference::from_path(path))
    }

    /// Referenced libraries in insertion order
    pub fn referenced_libraries(&self) -> &[LibraryReference] {
        &self.references
    }

    /// Source files handed to the compiler
    ///
    /// Raw source files come first, followed by one module per namespace
    /// holding its finalized classes.
    pub fn sources(&self) -> Vec<String> {
        let mut namespaces: BTreeMap<&str, (Vec<&str>, Vec<&str>)> = BTreeMap::new();
        for class in self.classes.iter().filter(|class| class.is_finalized()) {
            let (uses, bodies) = namespaces.entry(class.namespace()).or_default();
            for statement in class.use_statements() {
                if !uses.contains(&statement.as_str()) {
                    uses.push(statement);
                }
            }
            bodies.extend(class.source());
        }

        let modules = namespaces.into_iter().map(|(namespace, (uses, bodies))| {
            let mut content = String::new();
            if !uses.is_empty() {
                content.push_str(&uses.join("\n"));
                content.push_str("\n\n");
            }
            content.push_str(&bodies.join("\n"));
            wrap_in_modules(namespace, content)
        });

        self.source_files.iter().cloned().chain(modules).collect()
    }

    /// Abandon the build; nothing will be compiled
    pub fn set_aborted(&mut self) {
        if self.status == BuildStatus::Started {
            debug!(namespace = %self.default_namespace, "Dynamic module build aborted");
            self.status = BuildStatus::Aborted;
        }
    }

    /// Compile the collected sources
    ///
    /// Unfinalized classes are finalized first. Fails when the builder is not
    /// in the started state; compiler diagnostics are reported through the
    /// returned outcome.
    pub fn build(&mut self) -> Result<CompilationOutcome> {
        self.ensure_started("build")?;
        self.compile()
    }

    fn compile(&mut self) -> Result<CompilationOutcome> {
        for class in self.classes.iter_mut().filter(|class| !class.is_finalized()) {
            debug!(class = %class.full_name(), "Finalizing class before compilation");
            class.finalize()?;
        }

        let request = CompilationRequest {
            artifact_path: self.artifact_path.clone(),
            sources: self.sources(),
            references: self.references.clone(),
        };

        let result = self.compiler.compile(&request);
        let outcome = match &result {
            Ok(outcome) => outcome.clone(),
            Err(e) => {
                error!(compiler = self.compiler.name(), error = %e, "Compile step failed");
                CompilationOutcome::failed(vec![Diagnostic::error(0, e.to_string())])
            }
        };

        self.status = if outcome.success {
            BuildStatus::Succeeded
        } else {
            BuildStatus::Failed
        };
        for diagnostic in outcome.errors() {
            error!(namespace = %self.default_namespace, "{diagnostic}");
        }
        log_build_outcome(
            &self.default_namespace,
            &self.artifact_path,
            outcome.success,
            outcome.diagnostics.len(),
        );

        if let Some(callback) = self.on_complete.take() {
            callback(&self.artifact_path, outcome.success, &outcome);
        }
        self.outcome = Some(outcome);
        result
    }

    fn ensure_started(&self, operation: &str) -> Result<()> {
        if self.status != BuildStatus::Started {
            return Err(Error::code_generation(format!(
                "Cannot {operation}: the dynamic module build is {:?}",
                self.status
            )));
        }
        Ok(())
    }

    fn class_index(&self, name: &str, namespace: &str) -> Option<usize> {
        self.classes
            .iter()
            .position(|class| class.name() == name && class.namespace() == namespace)
    }
}

impl Drop for DynamicModuleBuilder {
    fn drop(&mut self) {
        if self.status == BuildStatus::Started {
            if let Err(e) = self.compile() {
                error!(error = %e, "Dynamic module build failed on drop");
            }
        }
    }
}

impl std::fmt::Debug for DynamicModuleBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicModuleBuilder")
            .field("artifact_path", &self.artifact_path)
            .field("default_namespace", &self.default_namespace)
            .field("compiler", &self.compiler.name())
            .field("classes", &self.classes)
            .field("source_files", &self.source_files.len())
            .field("references", &self.references)
            .field("status", &self.status)
            .finish()
    }
}

/// Nest `content` in one `pub mod` per segment of `namespace`
fn wrap_in_modules(namespace: &str, content: String) -> String {
    namespace
        .rsplit("::")
        .fold(content, |inner, segment| {
            format!("pub mod {segment} {{\n{}\n}}\n", indent(&inner))
        })
}
