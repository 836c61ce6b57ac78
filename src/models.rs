//! Dashboard data model and REST request/response types.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Display name used when the provider has no long name for a symbol.
pub const COMPANY_NAME_FALLBACK: &str = "Company Name Not Found";

/// Text shown in place of a price that could not be determined.
pub const PRICE_UNAVAILABLE: &str = "Price not available";

/// Column labels of the calls and puts tables; the first one is the row key.
pub const CHAIN_COLUMNS: [&str; 7] = [
    "Strike",
    "Last Price",
    "Bid",
    "Ask",
    "Volume",
    "Open Interest",
    "IV",
];

/// Placeholder for values the provider left out.
const MISSING: &str = "None";

// ============================================================================
// Quote
// ============================================================================

/// Header information for the symbol being viewed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Quote {
    /// Uppercased ticker symbol.
    pub symbol: String,
    /// Long name, or the fallback literal.
    pub company_name: String,
    /// Current price, last close, or nothing.
    pub current_price: Option<f64>,
}

impl Quote {
    /// Returns `"{company_name} ({symbol})"`.
    #[must_use]
    pub fn title(&self) -> String {
        format!("{} ({})", self.company_name, self.symbol)
    }

    /// Returns `"Current Price: $x.xx"` or the unavailable literal.
    #[must_use]
    pub fn price_label(&self) -> String {
        match self.current_price {
            Some(price) => format!("Current Price: ${:.2}", price),
            None => PRICE_UNAVAILABLE.to_string(),
        }
    }
}

// ============================================================================
// Options Tables
// ============================================================================

/// One row of the calls or puts table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OptionsChainRow {
    /// Strike price; the row key.
    pub strike: f64,
    /// Last traded price.
    pub last_price: Option<f64>,
    /// Best bid.
    pub bid: Option<f64>,
    /// Best ask.
    pub ask: Option<f64>,
    /// Contracts traded today.
    pub volume: Option<u64>,
    /// Outstanding contracts.
    pub open_interest: Option<u64>,
    /// Implied volatility as reported by the provider.
    pub implied_volatility: Option<f64>,
}

fn fixed(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| format!("{:.*}", decimals, v))
}

fn count(value: Option<u64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| v.to_string())
}

impl OptionsChainRow {
    /// Formatted row key.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{:.2}", self.strike)
    }

    /// Formatted values for every column after the key, in column order.
    #[must_use]
    pub fn cells(&self) -> [String; 6] {
        [
            fixed(self.last_price, 2),
            fixed(self.bid, 2),
            fixed(self.ask, 2),
            count(self.volume),
            count(self.open_interest),
            fixed(self.implied_volatility, 4),
        ]
    }
}

/// A labelled table of option rows keyed by strike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OptionsTable {
    /// Column labels, key column first.
    pub columns: Vec<String>,
    /// Rows in provider order.
    pub rows: Vec<OptionsChainRow>,
}

impl OptionsTable {
    /// Label of the key column.
    #[must_use]
    pub fn index_label(&self) -> &str {
        self.columns.first().map_or("", String::as_str)
    }

    /// Row keys (strikes) in row order.
    #[must_use]
    pub fn keys(&self) -> Vec<f64> {
        self.rows.iter().map(|row| row.strike).collect()
    }
}

// ============================================================================
// REST Responses
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Option expirations for a symbol.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExpirationsResponse {
    /// Uppercased ticker symbol.
    pub symbol: String,
    /// Expiration dates (`YYYY-MM-DD`) in provider order.
    pub expirations: Vec<String>,
}

/// Calls and puts for one expiration.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OptionChainResponse {
    /// Uppercased ticker symbol.
    pub symbol: String,
    /// Expiration the chain belongs to.
    pub expiration: String,
    /// Call options.
    pub calls: OptionsTable,
    /// Put options.
    pub puts: OptionsTable,
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Widget state carried in the dashboard URL.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    /// Ticker symbol text input.
    pub symbol: Option<String>,
    /// Selected expiration date.
    pub expiration: Option<String>,
}

/// Query parameters for the chain endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ChainQuery {
    /// Expiration date (`YYYY-MM-DD`); defaults to the first listed.
    pub expiration: Option<String>,
}
