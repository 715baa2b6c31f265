use super::*;
use std::error::Error as StdError;

#[test]
fn test_not_found_error() {
    let error = Error::NotFound;

    // Test error message
    assert_eq!(error.to_string(), "Resource not found");

    // Test error source
    assert!(error.source().is_none());
}

#[test]
fn test_auth_error() {
    let error = Error::AuthError("Invalid credentials".to_string());

    // Test error message
    assert_eq!(
        error.to_string(),
        "Failed to authenticate or initialize GitHub client: Invalid credentials"
    );

    // Test error source
    assert!(error.source().is_none());
}

#[test]
fn test_permission_denied_error() {
    let error = Error::PermissionDenied("Must have admin rights to Repository".to_string());

    assert_eq!(
        error.to_string(),
        "Permission denied: Must have admin rights to Repository"
    );
}

#[test]
fn test_transient_error() {
    let error = Error::Transient("connection reset by peer".to_string());

    assert_eq!(
        error.to_string(),
        "API request failed: connection reset by peer"
    );
}

#[test]
fn test_deserialization_error_has_source() {
    let serde_error = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
    let error = Error::from(serde_error);

    assert!(error.to_string().starts_with("Failed to deserialize"));
    assert!(error.source().is_some());
}

#[test]
fn test_error_is_send_sync() {
    // This test verifies that Error implements Send and Sync traits
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Error>();
}
