//! Dynamic Module Builder Tests

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use oro_domain::error::{Error, Result};
use oro_domain::ports::SourceCompiler;
use oro_domain::value_objects::{
    BuildStatus, CompilationOutcome, CompilationRequest, LibraryReference,
};
use oro_infrastructure::ambient::TickIdGenerator;
use oro_infrastructure::codegen::{
    DynamicModuleBuilder, GeneratedParameter, MethodSignature, ParameterKind, Receiver,
    SyntaxCheckingCompiler,
};
use tempfile::TempDir;

/// Compiler that records every request and accepts it
#[derive(Default)]
struct RecordingCompiler {
    calls: AtomicUsize,
    sources: Mutex<Vec<String>>,
}

impl SourceCompiler for RecordingCompiler {
    fn name(&self) -> &str {
        "recording"
    }

    fn compile(&self, request: &CompilationRequest) -> Result<CompilationOutcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.sources.lock().unwrap() = request.sources.clone();
        Ok(CompilationOutcome::succeeded())
    }
}

fn builder_with(compiler: Arc<dyn SourceCompiler>, dir: &TempDir) -> DynamicModuleBuilder {
    DynamicModuleBuilder::new(
        dir.path().join("out").join("generated.rs"),
        compiler,
        Arc::new(TickIdGenerator::new()),
    )
}

#[test]
fn test_generated_module_compiles_and_is_written() {
    let dir = TempDir::new().unwrap();
    let completed: Arc<Mutex<Option<(PathBuf, bool)>>> = Arc::new(Mutex::new(None));
    let recorded = Arc::clone(&completed);

    let mut builder = builder_with(Arc::new(SyntaxCheckingCompiler::new()), &dir).on_complete(
        move |path, success, _outcome| {
            *recorded.lock().unwrap() = Some((path.to_path_buf(), success));
        },
    );

    let counter = builder.start_class("Counter", &["Clone"], Some("counters")).unwrap();
    counter.add_use("std::fmt").unwrap();
    counter.add_field("count", "u32").unwrap();
    counter
        .start_constructor(&[GeneratedParameter::new("count", "u32")])
        .unwrap()
        .add_code_line("{")
        .add_code_line("    Self { count }")
        .add_code_line("}");
    counter
        .start_method(
            MethodSignature::new("copy_into")
                .receiver(Receiver::Ref)
                .parameter(GeneratedParameter::new("target", "u32").with_kind(ParameterKind::Output)),
        )
        .unwrap()
        .add_code_line("{")
        .add_code_line("    *target = self.count;")
        .add_code_line("}");
    counter
        .add_trait_code("Clone", "fn clone(&self) -> Self {\n    Self { count: self.count }\n}\n")
        .unwrap();
    counter.finalize().unwrap();

    let outcome = builder.build().unwrap();
    assert!(outcome.success, "{:?}", outcome.diagnostics);
    assert_eq!(builder.status(), BuildStatus::Succeeded);

    let artifact = fs::read_to_string(builder.artifact_path()).unwrap();
    assert!(artifact.contains("pub mod counters {"));
    assert!(artifact.contains("use std::fmt;"));
    assert!(artifact.contains("pub fn copy_into(&self, target: &mut u32)"));
    assert!(artifact.contains("impl Clone for Counter {"));

    let completed = completed.lock().unwrap().clone().unwrap();
    assert_eq!(completed.0, builder.artifact_path());
    assert!(completed.1);
}

#[test]
fn test_syntax_errors_fail_the_build() {
    let dir = TempDir::new().unwrap();
    let mut builder = builder_with(Arc::new(SyntaxCheckingCompiler::new()), &dir);

    builder.add_source_file("pub fn ok() {}").unwrap();
    builder
        .add_source_file("pub struct Broken {\n    field u32,\n}")
        .unwrap();

    let outcome = builder.build().unwrap();
    assert!(!outcome.success);
    assert_eq!(builder.status(), BuildStatus::Failed);
    let error = outcome.errors().next().unwrap();
    assert_eq!(error.source_index, 1);
    assert_eq!(error.line, Some(2));
    assert!(!builder.artifact_path().exists());
}

#[test]
fn test_starting_a_class_twice_returns_it() {
    let dir = TempDir::new().unwrap();
    let mut builder = builder_with(Arc::new(RecordingCompiler::default()), &dir);

    builder
        .start_class("Widget", &[], None)
        .unwrap()
        .add_field("size", "u32")
        .unwrap();
    let again = builder.start_class("Widget", &[], None).unwrap();
    again.add_field("weight", "u32").unwrap();
    again.finalize().unwrap();

    assert_eq!(builder.classes().len(), 1);
    let source = builder.class("Widget", None).unwrap().source().unwrap();
    assert!(source.contains("size: u32") && source.contains("weight: u32"));
    builder.set_aborted();
}

#[test]
fn test_default_namespace_is_unique() {
    let dir = TempDir::new().unwrap();
    let ids = Arc::new(TickIdGenerator::new());
    let compiler = Arc::new(RecordingCompiler::default());
    let mut first = DynamicModuleBuilder::new(dir.path().join("a.rs"), compiler.clone(), ids.clone());
    let mut second = DynamicModuleBuilder::new(dir.path().join("b.rs"), compiler, ids);

    assert!(first.default_namespace().starts_with("DynamicImplementations_"));
    assert_ne!(first.default_namespace(), second.default_namespace());

    let namespace = first.default_namespace().to_string();
    let class = first.start_class("Widget", &[], None).unwrap();
    assert_eq!(class.namespace(), namespace);
    first.set_aborted();
    second.set_aborted();
}

#[test]
fn test_invalid_names_are_rejected() {
    let dir = TempDir::new().unwrap();
    let mut builder = builder_with(Arc::new(RecordingCompiler::default()), &dir);

    assert!(matches!(
        builder.start_class("not a name", &[], None),
        Err(Error::InvalidArgument { .. })
    ));
    assert!(matches!(
        builder.start_class("Widget", &[], Some("bad::")),
        Err(Error::InvalidArgument { .. })
    ));
    builder.set_aborted();
}

#[test]
fn test_finalized_class_rejects_mutation() {
    let dir = TempDir::new().unwrap();
    let mut builder = builder_with(Arc::new(RecordingCompiler::default()), &dir);

    let class = builder.start_class("Widget", &[], None).unwrap();
    class.add_code_line("const SIZE: u32 = 1;").unwrap();
    let rendered = class.finalize().unwrap().to_string();

    assert!(matches!(
        class.add_code_line("const LATE: u32 = 2;"),
        Err(Error::CodeGeneration { .. })
    ));
    assert!(class.start_constructor(&[]).is_err());
    assert!(class.add_use("std::fmt").is_err());
    assert_eq!(class.source(), Some(rendered.as_str()));
    builder.set_aborted();
}

#[test]
fn test_libraries_are_deduplicated_by_name() {
    let dir = TempDir::new().unwrap();
    let mut builder = builder_with(Arc::new(RecordingCompiler::default()), &dir);

    assert!(builder.add_referenced_library_path("/opt/a/Widgets.rlib"));
    assert!(!builder.add_referenced_library(LibraryReference::new("widgets", "/opt/b/widgets.rlib")));
    assert!(!builder.add_referenced_library_path("/opt/a/widgets.rlib"));
    assert!(builder.add_referenced_library_path("/opt/a/gadgets.rlib"));

    let libraries = builder.referenced_libraries();
    assert_eq!(libraries.len(), 2);
    assert_eq!(libraries[0].path, PathBuf::from("/opt/a/Widgets.rlib"));
    builder.set_aborted();
}

#[test]
fn test_drop_compiles_exactly_once() {
    let dir = TempDir::new().unwrap();
    let compiler = Arc::new(RecordingCompiler::default());

    {
        let mut builder = builder_with(compiler.clone(), &dir);
        builder.start_class("Widget", &[], Some("widgets")).unwrap();
    }
    assert_eq!(compiler.calls.load(Ordering::SeqCst), 1);
    // unfinalized classes are finalized before compiling
    assert!(compiler.sources.lock().unwrap()[0].contains("pub struct Widget"));

    {
        let mut builder = builder_with(compiler.clone(), &dir);
        builder.build().unwrap();
        assert!(builder.build().is_err());
    }
    assert_eq!(compiler.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_aborted_builder_never_compiles() {
    let dir = TempDir::new().unwrap();
    let compiler = Arc::new(RecordingCompiler::default());
    let callbacks = Arc::new(AtomicUsize::new(0));

    {
        let counted = Arc::clone(&callbacks);
        let mut builder = builder_with(compiler.clone(), &dir).on_complete(move |_, _, _| {
            counted.fetch_add(1, Ordering::SeqCst);
        });
        builder.start_class("Widget", &[], None).unwrap();
        builder.set_aborted();

        assert_eq!(builder.status(), BuildStatus::Aborted);
        assert!(builder.build().is_err());
        assert!(builder.start_class("Other", &[], None).is_err());
    }

    assert_eq!(compiler.calls.load(Ordering::SeqCst), 0);
    assert_eq!(callbacks.load(Ordering::SeqCst), 0);
}

#[test]
fn test_classes_share_namespace_module() {
    let dir = TempDir::new().unwrap();
    let compiler = Arc::new(RecordingCompiler::default());
    let mut builder = builder_with(compiler.clone(), &dir);

    for name in ["First", "Second"] {
        let class = builder.start_class(name, &[], Some("shared")).unwrap();
        class.add_use("std::sync::Arc").unwrap();
        class.finalize().unwrap();
    }
    builder.build().unwrap();

    let sources = compiler.sources.lock().unwrap().clone();
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0].matches("pub mod shared").count(), 1);
    assert_eq!(sources[0].matches("use std::sync::Arc;").count(), 1);
    assert!(syn::parse_file(&sources[0]).is_ok());
}
