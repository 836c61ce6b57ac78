//! Market data types returned by providers.

use serde::{Deserialize, Serialize};
use std::str::FromStr;


// ============================================================================
// Instrument Info
// ============================================================================

/// Descriptive metadata for a ticker symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstrumentInfo {
    /// Long company or fund name, when the provider knows it.
    pub long_name: Option<String>,
    /// Current trading price, when the provider reports one.
    pub current_price: Option<f64>,
}

// ============================================================================
// Price History
// ============================================================================

/// Look-back window for a price history request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HistoryPeriod {
    /// One trading day (default).
    #[default]
    #[serde(rename = "1d")]
    OneDay,
    /// Five trading days.
    #[serde(rename = "5d")]
    FiveDays,
    /// One month.
    #[serde(rename = "1mo")]
    OneMonth,
    /// Three months.
    #[serde(rename = "3mo")]
    ThreeMonths,
    /// Six months.
    #[serde(rename = "6mo")]
    SixMonths,
    /// One year.
    #[serde(rename = "1y")]
    OneYear,
    /// Two years.
    #[serde(rename = "2y")]
    TwoYears,
    /// Five years.
    #[serde(rename = "5y")]
    FiveYears,
    /// Ten years.
    #[serde(rename = "10y")]
    TenYears,
    /// Year to date.
    #[serde(rename = "ytd")]
    YearToDate,
    /// Full available history.
    #[serde(rename = "max")]
    Max,
}

impl HistoryPeriod {
    /// Returns the provider's range literal for this period.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneDay => "1d",
            Self::FiveDays => "5d",
            Self::OneMonth => "1mo",
            Self::ThreeMonths => "3mo",
            Self::SixMonths => "6mo",
            Self::OneYear => "1y",
            Self::TwoYears => "2y",
            Self::FiveYears => "5y",
            Self::TenYears => "10y",
            Self::YearToDate => "ytd",
            Self::Max => "max",
        }
    }
}

impl std::fmt::Display for HistoryPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryPeriod {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1d" => Ok(Self::OneDay),
            "5d" => Ok(Self::FiveDays),
            "1mo" => Ok(Self::OneMonth),
            "3mo" => Ok(Self::ThreeMonths),
            "6mo" => Ok(Self::SixMonths),
            "1y" => Ok(Self::OneYear),
            "2y" => Ok(Self::TwoYears),
            "5y" => Ok(Self::FiveYears),
            "10y" => Ok(Self::TenYears),
            "ytd" => Ok(Self::YearToDate),
            "max" => Ok(Self::Max),
            other => Err(crate::Error::InvalidRequest(format!(
                "Invalid history period: {}",
                other
            ))),
        }
    }
}

/// One OHLCV bar. The provider leaves gaps as nulls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Bar open time (Unix seconds).
    pub timestamp: i64,
    /// Open price.
    pub open: Option<f64>,
    /// High price.
    pub high: Option<f64>,
    /// Low price.
    pub low: Option<f64>,
    /// Close price.
    pub close: Option<f64>,
    /// Traded volume.
    pub volume: Option<u64>,
}

/// Ordered price bars, oldest first. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    /// Bars in chronological order.
    pub bars: Vec<PriceBar>,
}

impl PriceHistory {
    /// Returns true when the history holds no bars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Returns the most recent close, skipping bars without one.
    #[must_use]
    pub fn last_close(&self) -> Option<f64> {
        self.bars.iter().rev().find_map(|bar| bar.close)
    }
}

// ============================================================================
// Option Chain
// ============================================================================

/// A single call or put contract as reported by the provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionContract {
    /// OCC contract symbol (e.g. "AAPL250117C00150000").
    #[serde(default)]
    pub contract_symbol: String,
    /// Strike price.
    pub strike: f64,
    /// Quote currency.
    #[serde(default)]
    pub currency: Option<String>,
    /// Last traded price.
    #[serde(default)]
    pub last_price: Option<f64>,
    /// Change since previous close.
    #[serde(default)]
    pub change: Option<f64>,
    /// Percent change since previous close.
    #[serde(default)]
    pub percent_change: Option<f64>,
    /// Contracts traded today.
    #[serde(default)]
    pub volume: Option<u64>,
    /// Outstanding contracts.
    #[serde(default)]
    pub open_interest: Option<u64>,
    /// Best bid.
    #[serde(default)]
    pub bid: Option<f64>,
    /// Best ask.
    #[serde(default)]
    pub ask: Option<f64>,
    /// Contract size (e.g. "REGULAR").
    #[serde(default)]
    pub contract_size: Option<String>,
    /// Expiration (Unix seconds).
    #[serde(default)]
    pub expiration: Option<i64>,
    /// Last trade time (Unix seconds).
    #[serde(default)]
    pub last_trade_date: Option<i64>,
    /// Implied volatility as a fraction.
    #[serde(default)]
    pub implied_volatility: Option<f64>,
    /// Whether the contract is in the money.
    #[serde(default)]
    pub in_the_money: bool,
}

/// Calls and puts for one expiration date, in provider order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionChain {
    /// Call contracts.
    pub calls: Vec<OptionContract>,
    /// Put contracts.
    pub puts: Vec<OptionContract>,
}
