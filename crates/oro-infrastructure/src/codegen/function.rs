//! Constructors and methods under construction

use super::class::indent;

/// Visibility of generated items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// `pub`
    #[default]
    Public,
    /// `pub(crate)`
    Crate,
    /// No modifier
    Private,
}

impl Visibility {
    /// Keyword followed by a space, or nothing
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Public => "pub ",
            Self::Crate => "pub(crate) ",
            Self::Private => "",
        }
    }
}

/// How a method receives `self`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Receiver {
    /// Associated function
    #[default]
    None,
    /// `&self`
    Ref,
    /// `&mut self`
    RefMut,
}

/// How a parameter is passed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParameterKind {
    /// By value
    #[default]
    Value,
    /// Shared reference
    Reference,
    /// Mutable reference, the counterpart of an output parameter
    Output,
}

/// Parameter of a generated function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedParameter {
    /// Parameter name
    pub name: String,
    /// Rust type of the parameter
    pub type_name: String,
    /// Passing mode
    pub kind: ParameterKind,
}

impl GeneratedParameter {
    /// By-value parameter
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            kind: ParameterKind::Value,
        }
    }

    /// Change the passing mode
    pub fn with_kind(mut self, kind: ParameterKind) -> Self {
        self.kind = kind;
        self
    }

    fn render(&self) -> String {
        let prefix = match self.kind {
            ParameterKind::Value => "",
            ParameterKind::Reference => "&",
            ParameterKind::Output => "&mut ",
        };
        format!("{}: {}{}", self.name, prefix, self.type_name)
    }
}

/// Signature of a method to start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    /// Method name, before the optional unique postfix
    pub name: String,
    /// Returned type; `None` for `()`
    pub return_type: Option<String>,
    /// Parameters after the receiver
    pub parameters: Vec<GeneratedParameter>,
    /// Visibility
    pub visibility: Visibility,
    /// Receiver
    pub receiver: Receiver,
    /// Append `_<unique id>` to the name
    pub add_unique_id_postfix: bool,
}

impl MethodSignature {
    /// Public associated function without parameters returning `()`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: None,
            parameters: Vec::new(),
            visibility: Visibility::Public,
            receiver: Receiver::None,
            add_unique_id_postfix: false,
        }
    }

    /// Set the returned type
    pub fn returning(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }

    /// Append a parameter
    pub fn parameter(mut self, parameter: GeneratedParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Set the receiver
    pub fn receiver(mut self, receiver: Receiver) -> Self {
        self.receiver = receiver;
        self
    }

    /// Set the visibility
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Make the name unique
    pub fn unique(mut self) -> Self {
        self.add_unique_id_postfix = true;
        self
    }
}

/// Constructor or method whose body is being written
#[derive(Debug, Clone)]
pub struct GeneratedFunction {
    name: String,
    code: String,
}

impl GeneratedFunction {
    pub(crate) fn start(
        name: &str,
        visibility: Visibility,
        receiver: Receiver,
        parameters: &[GeneratedParameter],
        return_type: Option<&str>,
    ) -> Self {
        let mut arguments: Vec<String> = match receiver {
            Receiver::None => Vec::new(),
            Receiver::Ref => vec!["&self".to_string()],
            Receiver::RefMut => vec!["&mut self".to_string()],
        };
        arguments.extend(parameters.iter().map(GeneratedParameter::render));

        let mut code = format!(
            "{}fn {}({})",
            visibility.keyword(),
            name,
            arguments.join(", ")
        );
        if let Some(return_type) = return_type {
            code.push_str(" -> ");
            code.push_str(return_type);
        }
        code.push('\n');

        Self {
            name: name.to_string(),
            code,
        }
    }

    /// Final function name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append code
    pub fn add_code(&mut self, code: &str) -> &mut Self {
        self.code.push_str(code);
        self
    }

    /// Append code followed by a line break
    pub fn add_code_line(&mut self, code: &str) -> &mut Self {
        self.code.push_str(code);
        self.code.push('\n');
        self
    }

    /// Code written so far
    pub fn code(&self) -> &str {
        &self.code
    }

    pub(crate) fn render_indented(&self) -> String {
        indent(&self.code)
    }
}
