//! HTTP client for the Yahoo Finance API.

use crate::error::Error;
use crate::provider::{MarketDataProvider, ProviderFuture};
use crate::types::{HistoryPeriod, InstrumentInfo, OptionChain, PriceHistory};
use crate::yahoo;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use url::Url;

#[cfg(test)]
mod tests;

/// Browser-like user agent; Yahoo rejects the default reqwest one.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API (e.g., "https://query2.finance.yahoo.com").
    pub base_url: String,
    /// Page visited to obtain the session cookie.
    pub cookie_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query2.finance.yahoo.com".to_string(),
            cookie_url: "https://fc.yahoo.com".to_string(),
            timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// HTTP client for Yahoo Finance.
///
/// Quote summary and options endpoints require a session cookie plus a
/// matching crumb. The crumb is fetched on first use and kept until the
/// provider answers 401/403.
#[derive(Debug, Clone)]
pub struct YahooClient {
    client: Client,
    base_url: String,
    cookie_url: String,
    crumb: Arc<Mutex<Option<String>>>,
}

impl YahooClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    /// Returns error if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            base_url,
            cookie_url: config.cookie_url,
            crumb: Arc::new(Mutex::new(None)),
        })
    }

    /// Creates a new client pointing at `base_url` with otherwise default configuration.
    ///
    /// # Errors
    /// Returns error if the base URL is invalid or the HTTP client cannot be built.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Self::new(ClientConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        })
    }

    /// Returns the base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    /// Builds `{base_url}/{segments...}`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| Error::InvalidRequest(format!("Base URL cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Returns the cached crumb, fetching cookie and crumb when absent.
    async fn crumb(&self) -> Result<String, Error> {
        let mut slot = self.crumb.lock().await;
        if let Some(crumb) = slot.as_ref() {
            return Ok(crumb.clone());
        }

        // The cookie page answers 404 but still sets the session cookie.
        debug!("Requesting session cookie from {}", self.cookie_url);
        self.client.get(&self.cookie_url).send().await?;

        let url = self.endpoint(&["v1", "test", "getcrumb"])?;
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        let crumb = body.trim();

        if !status.is_success() || crumb.is_empty() || crumb.contains('<') {
            return Err(Error::Auth(format!(
                "crumb request returned {}",
                status.as_u16()
            )));
        }

        info!("Obtained Yahoo crumb");
        *slot = Some(crumb.to_string());
        Ok(crumb.to_string())
    }

    async fn invalidate_crumb(&self) {
        *self.crumb.lock().await = None;
    }

    /// Sends a GET and returns the body of a successful response.
    async fn fetch(&self, mut url: Url, with_crumb: bool) -> Result<String, Error> {
        if with_crumb {
            let crumb = self.crumb().await?;
            url.query_pairs_mut().append_pair("crumb", &crumb);
        }

        debug!("GET {}", url.path());
        let resp = self.client.get(url).send().await?;
        self.handle_response(resp).await
    }

    async fn handle_response(&self, resp: reqwest::Response) -> Result<String, Error> {
        let status = resp.status();

        if status.is_success() {
            return Ok(resp.text().await?);
        }

        let text = resp.text().await.unwrap_or_default();
        let message = yahoo::error_description(&text).unwrap_or(text);

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                warn!("Yahoo rejected credentials ({}); dropping crumb", status);
                self.invalidate_crumb().await;
                Err(Error::Auth(message))
            }
            StatusCode::NOT_FOUND => Err(Error::NotFound(message)),
            _ => Err(Error::Api {
                status: status.as_u16(),
                message,
            }),
        }
    }
}

impl MarketDataProvider for YahooClient {
    fn get_instrument_info<'a>(&'a self, symbol: &'a str) -> ProviderFuture<'a, InstrumentInfo> {
        Box::pin(async move {
            let mut url = self.endpoint(&["v10", "finance", "quoteSummary", symbol])?;
            url.query_pairs_mut()
                .append_pair("modules", "price,financialData,quoteType");
            let body = self.fetch(url, true).await?;
            yahoo::parse_instrument_info(symbol, &body)
        })
    }

    fn get_price_history<'a>(
        &'a self,
        symbol: &'a str,
        period: HistoryPeriod,
    ) -> ProviderFuture<'a, PriceHistory> {
        Box::pin(async move {
            let mut url = self.endpoint(&["v8", "finance", "chart", symbol])?;
            url.query_pairs_mut()
                .append_pair("range", period.as_str())
                .append_pair("interval", "1d");
            let body = self.fetch(url, false).await?;
            yahoo::parse_price_history(&body)
        })
    }

    fn list_option_expirations<'a>(&'a self, symbol: &'a str) -> ProviderFuture<'a, Vec<String>> {
        Box::pin(async move {
            let url = self.endpoint(&["v7", "finance", "options", symbol])?;
            let body = self.fetch(url, true).await?;
            yahoo::parse_expirations(&body)
        })
    }

    fn get_option_chain<'a>(
        &'a self,
        symbol: &'a str,
        expiration: &'a str,
    ) -> ProviderFuture<'a, OptionChain> {
        Box::pin(async move {
            let timestamp = yahoo::expiration_timestamp(expiration)?;
            let mut url = self.endpoint(&["v7", "finance", "options", symbol])?;
            url.query_pairs_mut()
                .append_pair("date", &timestamp.to_string());
            let body = self.fetch(url, true).await?;
            yahoo::parse_option_chain(&body)
        })
    }
}
