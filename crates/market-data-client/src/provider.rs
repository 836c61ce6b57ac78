//! Provider abstraction consumed by the dashboard.
//!
//! The dashboard needs exactly four capabilities from a market data source.
//! The trait is object safe so the server can hold an
//! `Arc<dyn MarketDataProvider>` and tests can swap in scripted providers.

use crate::error::Error;
use crate::types::{HistoryPeriod, InstrumentInfo, OptionChain, PriceHistory};
use futures::future::BoxFuture;

/// Boxed future returned by every provider capability.
pub type ProviderFuture<'a, T> = BoxFuture<'a, Result<T, Error>>;

/// Read-only market data capabilities.
pub trait MarketDataProvider: Send + Sync {
    /// Looks up descriptive metadata (name, current price) for a symbol.
    fn get_instrument_info<'a>(&'a self, symbol: &'a str) -> ProviderFuture<'a, InstrumentInfo>;

    /// Fetches price bars for `symbol` over `period`, oldest first.
    fn get_price_history<'a>(
        &'a self,
        symbol: &'a str,
        period: HistoryPeriod,
    ) -> ProviderFuture<'a, PriceHistory>;

    /// Lists option expiration dates (`YYYY-MM-DD`) in provider order.
    fn list_option_expirations<'a>(&'a self, symbol: &'a str) -> ProviderFuture<'a, Vec<String>>;

    /// Fetches calls and puts for one expiration date (`YYYY-MM-DD`).
    fn get_option_chain<'a>(
        &'a self,
        symbol: &'a str,
        expiration: &'a str,
    ) -> ProviderFuture<'a, OptionChain>;
}
