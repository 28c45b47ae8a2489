//! Generated classes
//!
//! A [`GeneratedClass`] collects the pieces of a struct and its impl blocks.
//! Once finalized, the class renders to immutable source text and refuses any
//! further mutation.

use std::sync::Arc;

use oro_domain::error::Result;
use oro_domain::ports::IdGenerator;
use tracing::{error, warn};

use super::function::{GeneratedFunction, GeneratedParameter, MethodSignature, Receiver, Visibility};
use crate::constants::GENERATED_INDENT;
use crate::error_ext::infra::finalized_error;

/// Whether `name` is a plain Rust identifier (keywords excluded)
pub(crate) fn is_identifier(name: &str) -> bool {
    syn::parse_str::<syn::Ident>(name).is_ok()
}

/// Whether `path` is a `::`-separated list of identifiers
pub(crate) fn is_module_path(path: &str) -> bool {
    !path.is_empty() && path.split("::").all(is_identifier)
}

/// Indent every non-empty line of `text` by one level
pub(crate) fn indent(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{GENERATED_INDENT}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Struct under construction, with its inherent and trait impl blocks
///
/// # Example
///
/// ```
/// use oro_infrastructure::codegen::{GeneratedClass, GeneratedParameter, MethodSignature, Receiver};
/// use oro_infrastructure::ambient::TickIdGenerator;
/// use std::sync::Arc;
///
/// let mut class = GeneratedClass::new("Counter", "generated", &[], Arc::new(TickIdGenerator::new()));
/// class.add_field("count", "u32").unwrap();
/// class
///     .start_constructor(&[GeneratedParameter::new("count", "u32")])
///     .unwrap()
///     .add_code_line("{ Self { count } }");
/// class
///     .start_method(MethodSignature::new("count").receiver(Receiver::Ref).returning("u32"))
///     .unwrap()
///     .add_code_line("{ self.count }");
///
/// let source = class.finalize().unwrap();
/// assert!(source.contains("pub struct Counter"));
/// assert!(source.contains("pub fn new(count: u32) -> Self"));
/// assert!(class.add_code("// late").is_err());
/// ```
pub struct GeneratedClass {
    name: String,
    namespace: String,
    bases: Vec<String>,
    uses: Vec<String>,
    fields: Vec<String>,
    code: String,
    trait_code: Vec<(String, String)>,
    constructors: Vec<GeneratedFunction>,
    methods: Vec<GeneratedFunction>,
    id_generator: Arc<dyn IdGenerator>,
    source: Option<String>,
}

impl GeneratedClass {
    /// Start a class named `name` in module `namespace` implementing `bases`
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        bases: &[&str],
        id_generator: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            bases: bases.iter().map(|base| base.to_string()).collect(),
            uses: Vec::new(),
            fields: Vec::new(),
            code: String::new(),
            trait_code: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            id_generator,
            source: None,
        }
    }

    /// Struct name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Module the class is generated in
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// `namespace::Name`
    pub fn full_name(&self) -> String {
        format!("{}::{}", self.namespace, self.name)
    }

    /// Implemented traits
    pub fn bases(&self) -> &[String] {
        &self.bases
    }

    /// Use statements, in the order they were first added
    pub fn use_statements(&self) -> &[String] {
        &self.uses
    }

    /// Whether [`finalize`](Self::finalize) has run
    pub fn is_finalized(&self) -> bool {
        self.source.is_some()
    }

    /// Rendered source, once finalized
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Append code to the inherent impl block
    pub fn add_code(&mut self, code: &str) -> Result<&mut Self> {
        self.ensure_open("add code")?;
        self.code.push_str(code);
        Ok(self)
    }

    /// Append a line to the inherent impl block
    pub fn add_code_line(&mut self, code: &str) -> Result<&mut Self> {
        self.ensure_open("add code")?;
        self.code.push_str(code);
        self.code.push('\n');
        Ok(self)
    }

    /// Append code to the impl block of trait `base`
    ///
    /// The trait is added to the bases when missing.
    pub fn add_trait_code(&mut self, base: &str, code: &str) -> Result<&mut Self> {
        self.ensure_open("add trait code")?;
        if !self.bases.iter().any(|existing| existing == base) {
            self.bases.push(base.to_string());
        }
        match self.trait_code.iter_mut().find(|(name, _)| name == base) {
            Some((_, existing)) => existing.push_str(code),
            None => self.trait_code.push((base.to_string(), code.to_string())),
        }
        Ok(self)
    }

    /// Add a use statement (`std::fmt` or `use std::fmt;`); duplicates are ignored
    pub fn add_use(&mut self, path: &str) -> Result<&mut Self> {
        self.ensure_open("add a use statement")?;
        let path = path.trim();
        let path = path.strip_prefix("use ").unwrap_or(path);
        let statement = format!("use {};", path.trim_end_matches(';').trim());
        if !self.uses.contains(&statement) {
            self.uses.push(statement);
        }
        Ok(self)
    }

    /// Add a public field
    pub fn add_field(&mut self, name: &str, type_name: &str) -> Result<&mut Self> {
        self.add_field_with_visibility(name, type_name, Visibility::Public)
    }

    /// Add a field with explicit visibility
    pub fn add_field_with_visibility(
        &mut self,
        name: &str,
        type_name: &str,
        visibility: Visibility,
    ) -> Result<&mut Self> {
        self.ensure_open("add a field")?;
        self.fields
            .push(format!("{}{}: {},", visibility.keyword(), name, type_name));
        Ok(self)
    }

    /// Start a public constructor returning `Self`
    ///
    /// The first constructor is named `new`; later ones `new_2`, `new_3`, ...
    pub fn start_constructor(
        &mut self,
        parameters: &[GeneratedParameter],
    ) -> Result<&mut GeneratedFunction> {
        self.ensure_open("start a constructor")?;
        let name = match self.constructors.len() {
            0 => "new".to_string(),
            count => format!("new_{}", count + 1),
        };
        let constructor = GeneratedFunction::start(
            &name,
            Visibility::Public,
            Receiver::None,
            parameters,
            Some("Self"),
        );
        self.constructors.push(constructor);
        let index = self.constructors.len() - 1;
        Ok(&mut self.constructors[index])
    }

    /// Start a method; the unique postfix comes from the id generator
    pub fn start_method(&mut self, signature: MethodSignature) -> Result<&mut GeneratedFunction> {
        self.ensure_open("start a method")?;
        let name = if signature.add_unique_id_postfix {
            format!("{}_{}", signature.name, self.id_generator.generate_unique_id())
        } else {
            signature.name
        };
        let method = GeneratedFunction::start(
            &name,
            signature.visibility,
            signature.receiver,
            &signature.parameters,
            signature.return_type.as_deref(),
        );
        self.methods.push(method);
        let index = self.methods.len() - 1;
        Ok(&mut self.methods[index])
    }

    /// Render the class and freeze it
    ///
    /// A second call logs a warning and returns the source rendered the
    /// first time.
    pub fn finalize(&mut self) -> Result<&str> {
        if self.source.is_some() {
            warn!(class = %self.full_name(), "Class is already finalized");
        } else {
            self.source = Some(self.render());
        }
        Ok(self.source.as_deref().unwrap_or_default())
    }

    fn ensure_open(&self, operation: &str) -> Result<()> {
        if self.source.is_some() {
            error!(class = %self.full_name(), operation, "Mutation of a finalized class");
            return Err(finalized_error(&self.full_name(), operation));
        }
        Ok(())
    }

    fn render(&self) -> String {
        let mut source = String::new();

        source.push_str(&format!("pub struct {} {{\n", self.name));
        for field in &self.fields {
            source.push_str(&format!("{GENERATED_INDENT}{field}\n"));
        }
        source.push_str("}\n");

        let members: Vec<String> = std::iter::once(indent(&self.code))
            .chain(self.constructors.iter().map(GeneratedFunction::render_indented))
            .chain(self.methods.iter().map(GeneratedFunction::render_indented))
            .filter(|member| !member.is_empty())
            .collect();
        if !members.is_empty() {
            source.push_str(&format!("\nimpl {} {{\n", self.name));
            source.push_str(&members.join("\n\n"));
            source.push_str("\n}\n");
        }

        for base in &self.bases {
            let body = self
                .trait_code
                .iter()
                .find(|(name, _)| name == base)
                .map(|(_, code)| indent(code))
                .unwrap_or_default();
            if body.is_empty() {
                source.push_str(&format!("\nimpl {} for {} {{}}\n", base, self.name));
            } else {
                source.push_str(&format!(
                    "\nimpl {} for {} {{\n{}\n}}\n",
                    base, self.name, body
                ));
            }
        }

        source
    }
}

impl std::fmt::Debug for GeneratedClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratedClass")
            .field("name", &self.name)
            .field("namespace", &self.namespace)
            .field("bases", &self.bases)
            .field("constructors", &self.constructors.len())
            .field("methods", &self.methods.len())
            .field("finalized", &self.is_finalized())
            .finish()
    }
}
