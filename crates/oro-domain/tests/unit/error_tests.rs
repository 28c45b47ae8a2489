//! Error Type Tests

use oro_domain::error::{Error, ResolutionError};
use std::error::Error as _;

#[test]
fn test_resolution_error_names_service_and_implementation() {
    let error = Error::from(ResolutionError::NoImplementation {
        service: "app::IWidget".to_string(),
        implementation: "app::Widget".to_string(),
        details: "implementation is abstract".to_string(),
    });

    let message = error.to_string();
    assert!(error.is_resolution());
    assert!(message.contains("app::IWidget"));
    assert!(message.contains("app::Widget"));
    assert!(message.contains("implementation is abstract"));
}

#[test]
fn test_parameter_resolution_wraps_inner_error() {
    let inner = Error::from(ResolutionError::NoPublicConstructor {
        service: "app::IClock".to_string(),
        implementation: "app::Clock".to_string(),
    });
    let error = ResolutionError::ParameterResolution {
        parameter: "clock".to_string(),
        parameter_type: "app::IClock".to_string(),
        implementation: "app::Widget".to_string(),
        source: Box::new(inner),
    };

    assert!(error.to_string().contains("'clock'"));
    let source = error.source().expect("inner error is exposed as source");
    assert!(source.to_string().contains("no valid constructor"));
}

#[test]
fn test_configuration_error_with_source() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let error = Error::configuration_with_source("failed to load", io_error);

    match &error {
        Error::Configuration { message, source } => {
            assert_eq!(message, "failed to load");
            assert!(source.is_some());
        }
        _ => panic!("Expected Configuration error"),
    }
    assert!(!error.is_resolution());
}

#[test]
fn test_string_conversions() {
    let from_str: Error = "plain".into();
    let from_string: Error = String::from("owned").into();

    assert_eq!(from_str.to_string(), "plain");
    assert_eq!(from_string.to_string(), "owned");
}

#[test]
fn test_compilation_error_keeps_diagnostics() {
    let error = Error::compilation("build failed", vec!["expected `;`".to_string()]);

    if let Error::Compilation { diagnostics, .. } = error {
        assert_eq!(diagnostics, vec!["expected `;`".to_string()]);
    } else {
        panic!("Expected Compilation error");
    }
}
