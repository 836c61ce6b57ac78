//! Error types for the dashboard and its REST API.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;


/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
    /// Error code.
    pub code: String,
}

/// API error types.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Symbol unknown to the provider; carries the provider's description.
    #[error("{0}")]
    SymbolNotFound(String),

    /// Requested expiration is not listed for the symbol.
    #[error("Expiration `{expiration}` cannot be found. Available expirations are: [{}]", .available.join(", "))]
    ExpirationNotFound {
        /// The requested expiration.
        expiration: String,
        /// Expirations the provider lists for the symbol.
        available: Vec<String>,
    },

    /// The provider lists no option expirations for the symbol.
    #[error("No options data available for {0}")]
    NoOptionsData(String),

    /// Invalid request.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Market data provider failure.
    #[error("Market data error: {0}")]
    MarketData(String),
}

impl ApiError {
    /// Returns the HTTP status and machine-readable code for this error.
    #[must_use]
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::SymbolNotFound(_) => (StatusCode::NOT_FOUND, "SYMBOL_NOT_FOUND"),
            ApiError::ExpirationNotFound { .. } => (StatusCode::NOT_FOUND, "EXPIRATION_NOT_FOUND"),
            ApiError::NoOptionsData(_) => (StatusCode::NOT_FOUND, "NO_OPTIONS_DATA"),
            ApiError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
            ApiError::MarketData(_) => (StatusCode::BAD_GATEWAY, "MARKET_DATA_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        });

        (status, body).into_response()
    }
}

impl From<market_data_client::Error> for ApiError {
    fn from(err: market_data_client::Error) -> Self {
        match err {
            market_data_client::Error::NotFound(message) => ApiError::SymbolNotFound(message),
            market_data_client::Error::InvalidRequest(message) => ApiError::InvalidRequest(message),
            other => ApiError::MarketData(other.to_string()),
        }
    }
}
