//! Error Extension Tests

use std::io;

use oro_domain::error::{Error, Result};
use oro_infrastructure::error_ext::{ErrorContext, infra};

#[test]
fn test_io_context() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");

    let result: Result<()> = Err(io_error).io_context("failed to read generated source");

    match result {
        Err(Error::Io { source, message }) => {
            assert!(message.contains("failed to read generated source"));
            assert!(message.contains("file not found"));
            assert!(source.is_some());
        }
        other => panic!("Expected Io error, got {other:?}"),
    }
}

#[test]
fn test_config_context() {
    let parse_error = "x".parse::<u32>().unwrap_err();

    let result: Result<u32> = Err(parse_error).config_context("invalid port");
    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn test_context_wraps_as_infrastructure_error() {
    let io_error = io::Error::other("boom");

    let result: Result<()> = Err(io_error).context("step 3");
    match result {
        Err(Error::Infrastructure { message, .. }) => assert_eq!(message, "step 3: boom"),
        other => panic!("Expected Infrastructure error, got {other:?}"),
    }
}

#[test]
fn test_finalized_error() {
    let error = infra::finalized_error("gen::Widget", "add code");

    match error {
        Error::CodeGeneration { message } => {
            assert!(message.contains("gen::Widget"));
            assert!(message.contains("already been finalized"));
        }
        other => panic!("Expected CodeGeneration error, got {other:?}"),
    }
}
