//! End-to-end tests for the Options Chain Viewer.
//!
//! Each test binds the real router to an ephemeral local port, backed by a
//! [`ScriptedProvider`] instead of Yahoo Finance, and talks to it over HTTP.

use futures::future;
use market_data_client::{
    Error, HistoryPeriod, InstrumentInfo, MarketDataProvider, OptionChain, OptionContract,
    PriceBar, PriceHistory, ProviderFuture,
};
use options_chain_viewer::api::create_router;
use options_chain_viewer::state::AppState;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Provider returning canned responses and recording every call.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    /// Instrument info; `None` makes the lookup fail with `NotFound`.
    pub info: Option<InstrumentInfo>,
    /// Price history returned for any period.
    pub history: PriceHistory,
    /// Expiration dates.
    pub expirations: Vec<String>,
    /// Chain returned for any listed expiration.
    pub chain: OptionChain,
    /// When set, history fetches fail with a provider API error.
    pub history_failure: Option<String>,
    /// When set, expiration listings fail with a provider API error.
    pub expirations_failure: Option<String>,
    /// When set, chain fetches fail with a provider API error.
    pub chain_failure: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    /// Apple with a current price, two expirations and a small chain.
    #[must_use]
    pub fn apple() -> Self {
        Self {
            info: Some(InstrumentInfo {
                long_name: Some("Apple Inc.".to_string()),
                current_price: Some(227.52),
            }),
            expirations: vec!["2025-01-17".to_string(), "2025-01-24".to_string()],
            chain: OptionChain {
                calls: vec![contract(220.0, 9.15), contract(225.0, 5.6)],
                puts: vec![contract(220.0, 1.02), contract(225.0, 2.48)],
            },
            ..Default::default()
        }
    }

    /// A fund without a current price whose last close comes from history.
    #[must_use]
    pub fn etf_without_price() -> Self {
        Self {
            info: Some(InstrumentInfo {
                long_name: Some("SPDR S&P 500 ETF Trust".to_string()),
                current_price: None,
            }),
            history: PriceHistory {
                bars: vec![PriceBar {
                    timestamp: 1_737_034_200,
                    close: Some(595.31),
                    ..Default::default()
                }],
            },
            ..Default::default()
        }
    }

    /// A resolvable symbol that lists no option expirations.
    #[must_use]
    pub fn without_options() -> Self {
        Self {
            info: Some(InstrumentInfo {
                long_name: Some("XYZ Holdings".to_string()),
                current_price: Some(12.0),
            }),
            ..Default::default()
        }
    }

    /// Every lookup fails as for an unknown symbol.
    #[must_use]
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Replaces the instrument info.
    #[must_use]
    pub fn with_info(mut self, info: InstrumentInfo) -> Self {
        self.info = Some(info);
        self
    }

    /// Makes every history fetch fail with `message`.
    #[must_use]
    pub fn with_history_failure(mut self, message: &str) -> Self {
        self.history_failure = Some(message.to_string());
        self
    }

    /// Makes every expiration listing fail with `message`.
    #[must_use]
    pub fn with_expirations_failure(mut self, message: &str) -> Self {
        self.expirations_failure = Some(message.to_string());
        self
    }

    /// Makes every chain fetch fail with `message`.
    #[must_use]
    pub fn with_chain_failure(mut self, message: &str) -> Self {
        self.chain_failure = Some(message.to_string());
        self
    }

    /// Calls received so far, as `capability:args` strings.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

/// Builds a contract with a narrow market around `last`.
#[must_use]
pub fn contract(strike: f64, last: f64) -> OptionContract {
    OptionContract {
        strike,
        last_price: Some(last),
        bid: Some(last - 0.05),
        ask: Some(last + 0.05),
        volume: Some(100),
        open_interest: Some(1_000),
        implied_volatility: Some(0.25),
        ..Default::default()
    }
}

/// Returns the scripted failure as a provider API error, else `value()`.
fn scripted<T>(failure: Option<&str>, value: impl FnOnce() -> T) -> Result<T, Error> {
    match failure {
        Some(message) => Err(Error::Api {
            status: 500,
            message: message.to_string(),
        }),
        None => Ok(value()),
    }
}

impl MarketDataProvider for ScriptedProvider {
    fn get_instrument_info<'a>(&'a self, symbol: &'a str) -> ProviderFuture<'a, InstrumentInfo> {
        self.record(format!("info:{}", symbol));
        let result = self
            .info
            .clone()
            .ok_or_else(|| Error::NotFound(format!("Quote not found for symbol: {}", symbol)));
        Box::pin(future::ready(result))
    }

    fn get_price_history<'a>(
        &'a self,
        symbol: &'a str,
        period: HistoryPeriod,
    ) -> ProviderFuture<'a, PriceHistory> {
        self.record(format!("history:{}:{}", symbol, period));
        let result = scripted(self.history_failure.as_deref(), || self.history.clone());
        Box::pin(future::ready(result))
    }

    fn list_option_expirations<'a>(&'a self, symbol: &'a str) -> ProviderFuture<'a, Vec<String>> {
        self.record(format!("expirations:{}", symbol));
        let result = scripted(self.expirations_failure.as_deref(), || self.expirations.clone());
        Box::pin(future::ready(result))
    }

    fn get_option_chain<'a>(
        &'a self,
        symbol: &'a str,
        expiration: &'a str,
    ) -> ProviderFuture<'a, OptionChain> {
        self.record(format!("chain:{}:{}", symbol, expiration));
        let result = scripted(self.chain_failure.as_deref(), || self.chain.clone());
        Box::pin(future::ready(result))
    }
}

/// A router served on an ephemeral local port.
pub struct TestServer {
    /// Base URL, e.g. `http://127.0.0.1:54321`.
    pub base_url: String,
    /// The provider behind the server.
    pub provider: Arc<ScriptedProvider>,
    client: reqwest::Client,
    handle: JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl TestServer {
    /// Sends a GET and returns status and body text.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn get_text(&self, path: &str) -> Result<(u16, String), reqwest::Error> {
        let resp = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        let status = resp.status().as_u16();
        Ok((status, resp.text().await?))
    }

    /// Sends a GET and returns status and JSON body.
    ///
    /// # Errors
    /// Returns error if the request fails or the body is not JSON.
    pub async fn get_json(&self, path: &str) -> Result<(u16, serde_json::Value), reqwest::Error> {
        let resp = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        let status = resp.status().as_u16();
        Ok((status, resp.json().await?))
    }
}

/// Serves the application router over `provider`.
///
/// # Errors
/// Returns error if no local port can be bound.
pub async fn spawn_server(provider: ScriptedProvider) -> std::io::Result<TestServer> {
    let provider = Arc::new(provider);
    let state = Arc::new(AppState::with_provider(provider.clone()));
    let app = create_router(state);

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(TestServer {
        base_url: format!("http://{}", addr),
        provider,
        client: reqwest::Client::new(),
        handle,
    })
}
