//! Dashboard controller.
//!
//! One interaction runs a strictly sequential pipeline against the market
//! data provider:
//!
//! ```text
//! symbol ─► instrument info ─► (history fallback) ─► expirations ─► chain ─► reshape
//! ```
//!
//! Every step is awaited before the next starts. Any failure aborts the whole
//! pipeline and surfaces as a single [`DashboardView::Failed`]; nothing that
//! was fetched before the failure is shown.

use crate::error::ApiError;
use crate::models::{CHAIN_COLUMNS, COMPANY_NAME_FALLBACK, OptionsChainRow, OptionsTable, Quote};
use market_data_client::{HistoryPeriod, MarketDataProvider, OptionContract};
use tracing::{debug, info, warn};


/// Everything the page renderer needs for one interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    /// No symbol entered; nothing was fetched.
    Idle,
    /// A provider call failed.
    Failed {
        /// Normalized symbol.
        symbol: String,
        /// Failure description shown in the banner.
        message: String,
    },
    /// The symbol resolved but lists no option expirations.
    NoOptions {
        /// Header information.
        quote: Quote,
    },
    /// Full chain for the selected expiration.
    Chain {
        /// Header information.
        quote: Quote,
        /// Expiration dates in provider order.
        expirations: Vec<String>,
        /// Calls, puts and the expiration they belong to.
        selection: ChainSelection,
    },
}

impl DashboardView {
    /// Symbol to show in the text input.
    #[must_use]
    pub fn symbol(&self) -> &str {
        match self {
            Self::Idle => "",
            Self::Failed { symbol, .. } => symbol,
            Self::NoOptions { quote } | Self::Chain { quote, .. } => &quote.symbol,
        }
    }
}

/// Option tables for the active expiration.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainSelection {
    /// Active expiration date.
    pub expiration: String,
    /// Call options table.
    pub calls: OptionsTable,
    /// Put options table.
    pub puts: OptionsTable,
}

/// Uppercases and trims the symbol input. Returns `None` for empty input.
#[must_use]
pub fn normalize_symbol(input: &str) -> Option<String> {
    let symbol = input.trim().to_uppercase();
    (!symbol.is_empty()).then_some(symbol)
}

/// Fetches instrument info and derives the displayed price.
///
/// A missing or zero current price falls back to the last close of `period`
/// history; an empty history leaves the price unavailable.
///
/// # Errors
/// Returns error if a provider call fails.
pub async fn resolve_quote(
    provider: &dyn MarketDataProvider,
    symbol: &str,
    period: HistoryPeriod,
) -> Result<Quote, ApiError> {
    let info = provider.get_instrument_info(symbol).await?;

    let company_name = info
        .long_name
        .unwrap_or_else(|| COMPANY_NAME_FALLBACK.to_string());

    let current_price = match info.current_price.filter(|price| *price != 0.0) {
        Some(price) => Some(price),
        None => {
            debug!("No current price for {}, using {} history", symbol, period);
            let history = provider.get_price_history(symbol, period).await?;
            history.last_close()
        }
    };

    Ok(Quote {
        symbol: symbol.to_string(),
        company_name,
        current_price,
    })
}

/// Lists option expirations for a symbol.
///
/// # Errors
/// Returns error if the provider call fails.
pub async fn fetch_expirations(
    provider: &dyn MarketDataProvider,
    symbol: &str,
) -> Result<Vec<String>, ApiError> {
    Ok(provider.list_option_expirations(symbol).await?)
}

/// Picks the active expiration: the requested one, else the first listed.
///
/// Returns `Ok(None)` when no expirations are listed.
///
/// # Errors
/// Returns `ExpirationNotFound` if the requested date is not listed.
pub fn select_expiration(
    expirations: &[String],
    requested: Option<&str>,
) -> Result<Option<String>, ApiError> {
    let Some(first) = expirations.first() else {
        return Ok(None);
    };

    match requested.map(str::trim).filter(|r| !r.is_empty()) {
        None => Ok(Some(first.clone())),
        Some(requested) if expirations.iter().any(|e| e == requested) => {
            Ok(Some(requested.to_string()))
        }
        Some(requested) => Err(ApiError::ExpirationNotFound {
            expiration: requested.to_string(),
            available: expirations.to_vec(),
        }),
    }
}

/// Projects provider contracts onto the seven displayed columns.
#[must_use]
pub fn reshape(contracts: &[OptionContract]) -> OptionsTable {
    OptionsTable {
        columns: CHAIN_COLUMNS.iter().map(|c| (*c).to_string()).collect(),
        rows: contracts
            .iter()
            .map(|c| OptionsChainRow {
                strike: c.strike,
                last_price: c.last_price,
                bid: c.bid,
                ask: c.ask,
                volume: c.volume,
                open_interest: c.open_interest,
                implied_volatility: c.implied_volatility,
            })
            .collect(),
    }
}

/// Selects an expiration from `expirations` and fetches its chain.
///
/// Returns `Ok(None)` without calling the provider when `expirations` is empty.
///
/// # Errors
/// Returns error if the requested expiration is not listed or the fetch fails.
pub async fn fetch_chain(
    provider: &dyn MarketDataProvider,
    symbol: &str,
    expirations: &[String],
    requested: Option<&str>,
) -> Result<Option<ChainSelection>, ApiError> {
    let Some(expiration) = select_expiration(expirations, requested)? else {
        return Ok(None);
    };

    let chain = provider.get_option_chain(symbol, &expiration).await?;
    debug!(
        "Chain {} {}: {} calls, {} puts",
        symbol,
        expiration,
        chain.calls.len(),
        chain.puts.len()
    );

    Ok(Some(ChainSelection {
        calls: reshape(&chain.calls),
        puts: reshape(&chain.puts),
        expiration,
    }))
}

async fn load(
    provider: &dyn MarketDataProvider,
    symbol: &str,
    requested: Option<&str>,
    period: HistoryPeriod,
) -> Result<DashboardView, ApiError> {
    let quote = resolve_quote(provider, symbol, period).await?;
    let expirations = fetch_expirations(provider, symbol).await?;

    match fetch_chain(provider, symbol, &expirations, requested).await? {
        None => Ok(DashboardView::NoOptions { quote }),
        Some(selection) => Ok(DashboardView::Chain {
            quote,
            expirations,
            selection,
        }),
    }
}

/// Runs the full pipeline for one interaction.
///
/// Every call re-fetches info, price, expirations and chain; nothing is
/// carried over from earlier interactions.
pub async fn build(
    provider: &dyn MarketDataProvider,
    input: &str,
    requested_expiration: Option<&str>,
    period: HistoryPeriod,
) -> DashboardView {
    let Some(symbol) = normalize_symbol(input) else {
        return DashboardView::Idle;
    };

    info!("Loading dashboard for {}", symbol);
    match load(provider, &symbol, requested_expiration, period).await {
        Ok(view) => view,
        Err(err) => {
            warn!("Dashboard for {} failed: {}", symbol, err);
            DashboardView::Failed {
                symbol,
                message: err.to_string(),
            }
        }
    }
}
