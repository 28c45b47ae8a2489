//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed source error carried by the contextual variants
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Reasons a type could not be resolved by the object factory
#[derive(Error, Debug)]
pub enum ResolutionError {
    /// No valid implementation mapping exists for the service type
    #[error(
        "Failed to create an instance of type '{implementation}' to which type '{service}' is mapped. \
         No valid implementation type mapping exists for service type '{service}': {details}"
    )]
    NoImplementation {
        /// Requested service type
        service: String,
        /// Candidate implementation type (the service itself when nothing better was found)
        implementation: String,
        /// Why the candidate was rejected
        details: String,
    },

    /// The implementation type exposes no public constructor
    #[error(
        "Service type '{service}' cannot be mapped to implementation type '{implementation}' \
         since no valid constructor was found in type '{implementation}'"
    )]
    NoPublicConstructor {
        /// Requested service type
        service: String,
        /// Implementation type without constructors
        implementation: String,
    },

    /// A constructor parameter could not be resolved
    #[error(
        "Failed to resolve the value of constructor parameter '{parameter}' of type '{parameter_type}' \
         when trying to construct an instance of '{implementation}'"
    )]
    ParameterResolution {
        /// Parameter name
        parameter: String,
        /// Parameter type
        parameter_type: String,
        /// Implementation type being constructed
        implementation: String,
        /// Inner failure
        #[source]
        source: Box<crate::error::Error>,
    },

    /// The selected constructor failed
    #[error(
        "Failed to create an instance of type '{implementation}' using constructor with parameters of types [{parameter_types}]"
    )]
    ConstructionFailed {
        /// Implementation type being constructed
        implementation: String,
        /// Comma separated constructor parameter types
        parameter_types: String,
        /// Inner failure
        #[source]
        source: Box<crate::error::Error>,
    },

    /// A type transitively requires itself
    #[error("Circular dependency detected while resolving '{service}': {chain}")]
    CircularDependency {
        /// Type that closed the cycle
        service: String,
        /// Resolution chain, outermost first, joined with ` -> `
        chain: String,
    },

    /// A resolved instance could not be viewed as the requested type
    #[error("Resolved instance of type '{actual}' cannot be used as '{expected}'")]
    InstanceTypeMismatch {
        /// Requested type
        expected: String,
        /// Type actually produced
        actual: String,
    },
}

/// Main error type for the ORO shared utilities
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (simple form)
    #[error("I/O error: {source}")]
    IoSimple {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// I/O operation error (with context)
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// Object factory resolution error
    #[error("Resolution error: {0}")]
    Resolution(#[from] ResolutionError),

    /// Value could not be serialized or deserialized
    #[error("Serialization error: {message}")]
    Serialization {
        /// Description of the serialization error
        message: String,
    },

    /// Generated source code was rejected by the compiler step
    #[error("Compilation error: {message}")]
    Compilation {
        /// Description of the compilation error
        message: String,
        /// Diagnostics reported by the compiler
        diagnostics: Vec<String>,
    },

    /// Generated code was mutated in an invalid state
    #[error("Code generation error: {message}")]
    CodeGeneration {
        /// Description of the code generation error
        message: String,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Infrastructure operation error
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the infrastructure error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// Generic string-based error
    #[error("{0}")]
    String(String),
}

// Basic error creation methods
impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization<S: Into<String>>(message: S) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create a code generation error
    pub fn code_generation<S: Into<String>>(message: S) -> Self {
        Self::CodeGeneration {
            message: message.into(),
        }
    }

    /// Create a compilation error carrying compiler diagnostics
    pub fn compilation<S: Into<String>>(message: S, diagnostics: Vec<String>) -> Self {
        Self::Compilation {
            message: message.into(),
            diagnostics,
        }
    }

    /// Whether this error came out of the object factory
    pub fn is_resolution(&self) -> bool {
        matches!(self, Self::Resolution(_))
    }
}

// I/O error creation methods
impl Error {
    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Infrastructure error creation methods
impl Error {
    /// Create an infrastructure error
    pub fn infrastructure<S: Into<String>>(message: S) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: None,
        }
    }

    /// Create an infrastructure error with source
    pub fn infrastructure_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}
