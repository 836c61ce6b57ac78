//! Route configuration.

use crate::api::handlers;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use std::sync::Arc;

/// Creates the application router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Dashboard page
        .route("/", get(handlers::dashboard_page))
        // Health check
        .route("/health", get(handlers::health_check))
        // Market data
        .route("/api/v1/quote/{symbol}", get(handlers::get_quote))
        .route(
            "/api/v1/expirations/{symbol}",
            get(handlers::list_expirations),
        )
        .route("/api/v1/chain/{symbol}", get(handlers::get_option_chain))
        .with_state(state)
}
