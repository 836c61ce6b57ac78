//! Application state management.

use crate::config::DashboardConfig;
use market_data_client::MarketDataProvider;
use std::sync::Arc;

/// Application state shared across all handlers.
///
/// Holds no market data; every request fetches from the provider.
#[derive(Clone)]
pub struct AppState {
    /// Market data provider.
    pub provider: Arc<dyn MarketDataProvider>,
    /// Dashboard behaviour.
    pub dashboard: DashboardConfig,
}

impl AppState {
    /// Creates application state around a provider.
    #[must_use]
    pub fn new(provider: Arc<dyn MarketDataProvider>, dashboard: DashboardConfig) -> Self {
        Self {
            provider,
            dashboard,
        }
    }

    /// Creates application state with default dashboard settings.
    #[must_use]
    pub fn with_provider(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self::new(provider, DashboardConfig::default())
    }
}
