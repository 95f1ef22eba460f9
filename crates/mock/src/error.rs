//! Error types for the mock registry and route fixtures

use thiserror::Error;

/// Result type alias using [`MockError`]
pub type MockResult<T> = std::result::Result<T, MockError>;

/// Mock registry error types
///
/// Note that a request matching no registered route is NOT an error:
/// lookups return `Option` and the caller decides how to treat a miss.
#[derive(Error, Debug)]
pub enum MockError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid path pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid route spec: {0}")]
    RouteSpec(String),

    #[error("Unknown HTTP method: {0}")]
    UnknownMethod(String),
}
