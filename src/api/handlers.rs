//! API request handlers.

use crate::dashboard;
use crate::error::ApiError;
use crate::models::{
    ChainQuery, DashboardQuery, ExpirationsResponse, HealthResponse, OptionChainResponse, Quote,
};
use crate::render;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::Html;
use std::sync::Arc;

/// Normalizes a path symbol, rejecting blank input.
fn require_symbol(symbol: &str) -> Result<String, ApiError> {
    dashboard::normalize_symbol(symbol)
        .ok_or_else(|| ApiError::InvalidRequest("Symbol cannot be empty".to_string()))
}

// ============================================================================
// Dashboard Page
// ============================================================================

/// Render the options dashboard.
///
/// Without a `symbol` parameter the configured default symbol is shown; an
/// empty `symbol` renders only the input form.
#[utoipa::path(
    get,
    path = "/",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Dashboard page", content_type = "text/html", body = String)
    ),
    tag = "Dashboard"
)]
pub async fn dashboard_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Html<String> {
    let input = query
        .symbol
        .unwrap_or_else(|| state.dashboard.default_symbol.clone());

    let view = dashboard::build(
        state.provider.as_ref(),
        &input,
        query.expiration.as_deref(),
        state.dashboard.history_period,
    )
    .await;

    Html(render::render_page(&view))
}

// ============================================================================
// Health Check
// ============================================================================

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Market Data
// ============================================================================

/// Get the header quote for a symbol.
#[utoipa::path(
    get,
    path = "/api/v1/quote/{symbol}",
    params(
        ("symbol" = String, Path, description = "Ticker symbol")
    ),
    responses(
        (status = 200, description = "Quote", body = Quote),
        (status = 404, description = "Symbol not found"),
        (status = 502, description = "Market data provider failure")
    ),
    tag = "Market Data"
)]
pub async fn get_quote(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> Result<Json<Quote>, ApiError> {
    let symbol = require_symbol(&symbol)?;
    let quote = dashboard::resolve_quote(
        state.provider.as_ref(),
        &symbol,
        state.dashboard.history_period,
    )
    .await?;

    Ok(Json(quote))
}

/// List option expirations for a symbol.
#[utoipa::path(
    get,
    path = "/api/v1/expirations/{symbol}",
    params(
        ("symbol" = String, Path, description = "Ticker symbol")
    ),
    responses(
        (status = 200, description = "Expiration dates", body = ExpirationsResponse),
        (status = 502, description = "Market data provider failure")
    ),
    tag = "Market Data"
)]
pub async fn list_expirations(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> Result<Json<ExpirationsResponse>, ApiError> {
    let symbol = require_symbol(&symbol)?;
    let expirations = dashboard::fetch_expirations(state.provider.as_ref(), &symbol).await?;

    Ok(Json(ExpirationsResponse {
        symbol,
        expirations,
    }))
}

/// Get the calls and puts tables for one expiration.
#[utoipa::path(
    get,
    path = "/api/v1/chain/{symbol}",
    params(
        ("symbol" = String, Path, description = "Ticker symbol"),
        ChainQuery
    ),
    responses(
        (status = 200, description = "Option chain", body = OptionChainResponse),
        (status = 404, description = "No options data or unknown expiration"),
        (status = 502, description = "Market data provider failure")
    ),
    tag = "Market Data"
)]
pub async fn get_option_chain(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(query): Query<ChainQuery>,
) -> Result<Json<OptionChainResponse>, ApiError> {
    let symbol = require_symbol(&symbol)?;
    let provider = state.provider.as_ref();

    let expirations = dashboard::fetch_expirations(provider, &symbol).await?;
    let selection =
        dashboard::fetch_chain(provider, &symbol, &expirations, query.expiration.as_deref())
            .await?
            .ok_or_else(|| ApiError::NoOptionsData(symbol.clone()))?;

    Ok(Json(OptionChainResponse {
        symbol,
        expiration: selection.expiration,
        calls: selection.calls,
        puts: selection.puts,
    }))
}
