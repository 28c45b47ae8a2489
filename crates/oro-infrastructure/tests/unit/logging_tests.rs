//! Logging Tests

use std::path::Path;

use oro_infrastructure::constants::DEFAULT_LOG_LEVEL;
use oro_infrastructure::logging::{
    LoggingConfig, init_logging, log_build_outcome, log_instance_created, parse_log_level,
};
use tracing::Level;

#[test]
fn test_parse_log_level() {
    assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
    assert_eq!(parse_log_level("debug").unwrap(), Level::DEBUG);
    assert_eq!(parse_log_level("INFO").unwrap(), Level::INFO);
    assert_eq!(parse_log_level("warn").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("warning").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("error").unwrap(), Level::ERROR);

    assert!(parse_log_level("invalid").is_err());
}

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert_eq!(config.level, DEFAULT_LOG_LEVEL);
    assert!(!config.json_format);
    assert!(config.file_output.is_none());
}

#[test]
fn test_init_rejects_invalid_level() {
    let config = LoggingConfig {
        level: "chatty".to_string(),
        ..LoggingConfig::default()
    };
    assert!(init_logging(config).is_err());
}

#[test]
fn test_helpers_without_subscriber() {
    log_build_outcome("Generated_1", Path::new("/tmp/generated.rs"), true, 0);
    log_build_outcome("Generated_1", Path::new("/tmp/generated.rs"), false, 2);
    log_instance_created(true, "dyn IWidget", "Widget");
    log_instance_created(false, "dyn IWidget", "Widget");
}
