//! Unit tests for error module.

use super::*;

#[test]
fn test_api_error_display() {
    let error = Error::Api {
        status: 500,
        message: "Internal server error".to_string(),
    };

    let display = format!("{}", error);
    assert!(display.contains("500"));
    assert!(display.contains("Internal server error"));
}

#[test]
fn test_not_found_error_display() {
    let error = Error::NotFound("Quote not found for symbol: ZZZZ".to_string());

    assert_eq!(
        format!("{}", error),
        "Not found: Quote not found for symbol: ZZZZ"
    );
}

#[test]
fn test_provider_error_display() {
    let error = Error::Provider {
        code: "Bad Request".to_string(),
        description: "Invalid Crumb".to_string(),
    };

    assert_eq!(format!("{}", error), "Invalid Crumb (Bad Request)");
}

#[test]
fn test_auth_error_display() {
    let error = Error::Auth("empty crumb".to_string());

    let display = format!("{}", error);
    assert!(display.contains("Authentication failed"));
    assert!(display.contains("empty crumb"));
}

#[test]
fn test_invalid_request_error_display() {
    let error = Error::InvalidRequest("bad expiration 2024-13-01".to_string());

    let display = format!("{}", error);
    assert!(display.contains("Invalid request"));
    assert!(display.contains("2024-13-01"));
}

#[test]
fn test_invalid_url_from_parse_error() {
    let parse_error = url::Url::parse("not a url").unwrap_err();
    let error: Error = parse_error.into();

    assert!(matches!(error, Error::InvalidUrl(_)));
    assert!(format!("{}", error).starts_with("Invalid URL"));
}

#[test]
fn test_json_error_from_serde() {
    let serde_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: Error = serde_error.into();

    assert!(matches!(error, Error::Json(_)));
}

#[test]
fn test_error_debug() {
    let error = Error::Api {
        status: 429,
        message: "Too Many Requests".to_string(),
    };

    let debug = format!("{:?}", error);
    assert!(debug.contains("Api"));
    assert!(debug.contains("429"));
}
