//! Error types for the market data client.

use thiserror::Error;

#[cfg(test)]
mod tests;

/// Client error types.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Provider returned a non-success HTTP status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the provider.
        message: String,
    },

    /// Symbol or resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Provider answered with an error object instead of a result.
    #[error("{description} ({code})")]
    Provider {
        /// Provider error code (e.g. "Not Found").
        code: String,
        /// Human readable description.
        description: String,
    },

    /// Session cookie or crumb could not be obtained.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Invalid request parameters.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}
