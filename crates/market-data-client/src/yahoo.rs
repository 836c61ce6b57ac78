//! Yahoo Finance wire format.
//!
//! Response envelopes for the quoteSummary, chart and options endpoints and
//! their conversion into the crate's provider types. Every envelope carries
//! either a `result` or an `error: { code, description }` object.

use crate::error::Error;
use crate::types::{InstrumentInfo, OptionChain, OptionContract, PriceBar, PriceHistory};
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

#[cfg(test)]
mod tests;

/// Error object embedded in Yahoo envelopes.
#[derive(Debug, Deserialize)]
struct ProviderError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
}

impl ProviderError {
    fn into_error(self) -> Error {
        Error::Provider {
            code: self.code,
            description: self.description,
        }
    }
}

/// Yahoo formatted number: `{ "raw": 227.52, "fmt": "227.52" }`, or `{}`.
#[derive(Debug, Default, Deserialize)]
struct FormattedValue {
    #[serde(default)]
    raw: Option<f64>,
}

// ============================================================================
// quoteSummary
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteSummaryEnvelope {
    quote_summary: QuoteSummary,
}

#[derive(Debug, Deserialize)]
struct QuoteSummary {
    #[serde(default)]
    result: Option<Vec<QuoteSummaryResult>>,
    #[serde(default)]
    error: Option<ProviderError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteSummaryResult {
    #[serde(default)]
    price: Option<NameModule>,
    #[serde(default)]
    financial_data: Option<FinancialDataModule>,
    #[serde(default)]
    quote_type: Option<NameModule>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NameModule {
    #[serde(default)]
    long_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FinancialDataModule {
    #[serde(default)]
    current_price: Option<FormattedValue>,
}

/// Parses a quoteSummary body into [`InstrumentInfo`].
pub(crate) fn parse_instrument_info(symbol: &str, body: &str) -> Result<InstrumentInfo, Error> {
    let envelope: QuoteSummaryEnvelope = serde_json::from_str(body)?;
    let summary = envelope.quote_summary;
    if let Some(err) = summary.error {
        return Err(err.into_error());
    }

    let result = summary
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| Error::NotFound(format!("Quote not found for symbol: {}", symbol)))?;

    let price_name = result.price.and_then(|m| m.long_name);
    let type_name = result.quote_type.and_then(|m| m.long_name);

    Ok(InstrumentInfo {
        long_name: price_name.or(type_name),
        current_price: result
            .financial_data
            .and_then(|m| m.current_price)
            .and_then(|v| v.raw),
    })
}

// ============================================================================
// chart
// ============================================================================

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ProviderError>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    #[serde(default)]
    indicators: Option<Indicators>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteIndicator>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteIndicator {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

/// Parses a chart body into [`PriceHistory`]. A result without timestamps is
/// an empty history, not an error.
pub(crate) fn parse_price_history(body: &str) -> Result<PriceHistory, Error> {
    let envelope: ChartEnvelope = serde_json::from_str(body)?;
    let chart = envelope.chart;
    if let Some(err) = chart.error {
        return Err(err.into_error());
    }

    let Some(result) = chart.result.and_then(|results| results.into_iter().next()) else {
        return Ok(PriceHistory::default());
    };

    let quote = result
        .indicators
        .and_then(|i| i.quote.into_iter().next())
        .unwrap_or_default();
    let at = |series: &[Option<f64>], i: usize| series.get(i).copied().flatten();

    let bars = result
        .timestamp
        .iter()
        .enumerate()
        .map(|(i, &timestamp)| PriceBar {
            timestamp,
            open: at(&quote.open, i),
            high: at(&quote.high, i),
            low: at(&quote.low, i),
            close: at(&quote.close, i),
            volume: at(&quote.volume, i).map(|v| v as u64),
        })
        // Yahoo pads partial sessions with all-null rows
        .filter(|bar| {
            bar.open.is_some() || bar.high.is_some() || bar.low.is_some() || bar.close.is_some()
        })
        .collect();

    Ok(PriceHistory { bars })
}

// ============================================================================
// options
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OptionsEnvelope {
    option_chain: OptionsResult,
}

#[derive(Debug, Deserialize)]
struct OptionsResult {
    #[serde(default)]
    result: Option<Vec<OptionsPayload>>,
    #[serde(default)]
    error: Option<ProviderError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OptionsPayload {
    #[serde(default)]
    expiration_dates: Vec<i64>,
    #[serde(default)]
    options: Vec<OptionsSlice>,
}

#[derive(Debug, Deserialize)]
struct OptionsSlice {
    #[serde(default)]
    calls: Vec<OptionContract>,
    #[serde(default)]
    puts: Vec<OptionContract>,
}

fn parse_options_payload(body: &str) -> Result<Option<OptionsPayload>, Error> {
    let envelope: OptionsEnvelope = serde_json::from_str(body)?;
    let chain = envelope.option_chain;
    if let Some(err) = chain.error {
        return Err(err.into_error());
    }
    Ok(chain.result.and_then(|results| results.into_iter().next()))
}

/// Parses an options body into its expiration dates (`YYYY-MM-DD`).
pub(crate) fn parse_expirations(body: &str) -> Result<Vec<String>, Error> {
    let Some(payload) = parse_options_payload(body)? else {
        return Ok(Vec::new());
    };

    payload
        .expiration_dates
        .into_iter()
        .map(|ts| {
            expiration_label(ts)
                .ok_or_else(|| Error::InvalidRequest(format!("Invalid expiration timestamp: {}", ts)))
        })
        .collect()
}

/// Parses an options body into the calls and puts of its first slice.
pub(crate) fn parse_option_chain(body: &str) -> Result<OptionChain, Error> {
    let slice = parse_options_payload(body)?.and_then(|p| p.options.into_iter().next());

    Ok(match slice {
        Some(slice) => OptionChain {
            calls: slice.calls,
            puts: slice.puts,
        },
        None => OptionChain::default(),
    })
}

// ============================================================================
// Helpers
// ============================================================================

/// Formats a Unix timestamp as a UTC `YYYY-MM-DD` expiration label.
#[must_use]
pub fn expiration_label(timestamp: i64) -> Option<String> {
    DateTime::from_timestamp(timestamp, 0).map(|dt| dt.date_naive().format("%Y-%m-%d").to_string())
}

/// Converts a `YYYY-MM-DD` expiration label to its UTC-midnight Unix timestamp.
///
/// # Errors
/// Returns `InvalidRequest` if the label is not a valid date.
pub fn expiration_timestamp(label: &str) -> Result<i64, Error> {
    let date = NaiveDate::parse_from_str(label, "%Y-%m-%d").map_err(|_| {
        Error::InvalidRequest(format!(
            "Invalid expiration format: {}. Use YYYY-MM-DD (e.g., '2025-01-17')",
            label
        ))
    })?;

    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .ok_or_else(|| Error::InvalidRequest(format!("Invalid expiration: {}", label)))
}

/// Extracts `description` from the first `error` object in a Yahoo body.
pub(crate) fn error_description(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.as_object()?.values().find_map(|section| {
        section
            .get("error")?
            .get("description")?
            .as_str()
            .map(str::to_string)
    })
}
