use crate::error::{ErrorContext, LoadTestError};
use crate::loadtest_error;

#[test]
fn test_error_context_on_result() {
    let result: Result<i32, std::io::Error> = Err(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "file not found",
    ));

    match result.context("Failed to read config file") {
        Err(LoadTestError::Unknown(msg)) => {
            assert!(msg.contains("Failed to read config file"));
            assert!(msg.contains("file not found"));
        }
        _ => panic!("Expected LoadTestError::Unknown"),
    }
}

#[test]
fn test_error_context_with_closure() {
    let result: Result<i32, std::io::Error> = Err(std::io::Error::new(
        std::io::ErrorKind::PermissionDenied,
        "access denied",
    ));

    match result.with_context(|| format!("Failed to write config at {}", "/tmp/test.json")) {
        Err(LoadTestError::Unknown(msg)) => {
            assert!(msg.contains("/tmp/test.json"));
            assert!(msg.contains("access denied"));
        }
        _ => panic!("Expected LoadTestError::Unknown"),
    }
}

#[test]
fn test_loadtest_error_macro() {
    match loadtest_error!(ConfigError, "rate must be positive") {
        LoadTestError::ConfigError(msg) => assert_eq!(msg, "rate must be positive"),
        _ => panic!("Expected LoadTestError::ConfigError"),
    }

    match loadtest_error!(InvalidThreshold, "'{}' on {}", "p99<1", "http_req_duration") {
        LoadTestError::InvalidThreshold(msg) => assert_eq!(msg, "'p99<1' on http_req_duration"),
        _ => panic!("Expected LoadTestError::InvalidThreshold"),
    }
}

#[test]
fn test_fatal_classification() {
    assert!(LoadTestError::MissingToken.is_fatal());
    assert!(LoadTestError::ConfigError("x".into()).is_fatal());
    assert!(!LoadTestError::ApiError("x".into()).is_fatal());
}
