//! Unit tests for client module.

use super::*;
use axum::Router;
use axum::extract::{Path, State};
use axum::http::Uri;
use axum::routing::get;
use tokio::net::TcpListener;

// ============================================================================
// ClientConfig Tests
// ============================================================================

#[test]
fn test_client_config_default() {
    let config = ClientConfig::default();

    assert_eq!(config.base_url, "https://query2.finance.yahoo.com");
    assert_eq!(config.cookie_url, "https://fc.yahoo.com");
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.user_agent.starts_with("Mozilla/5.0"));
}

#[test]
fn test_client_config_custom() {
    let config = ClientConfig {
        base_url: "http://127.0.0.1:9000".to_string(),
        timeout: Duration::from_secs(5),
        ..Default::default()
    };

    assert_eq!(config.base_url, "http://127.0.0.1:9000");
    assert_eq!(config.timeout, Duration::from_secs(5));
    assert_eq!(config.cookie_url, "https://fc.yahoo.com");
}

// ============================================================================
// YahooClient Creation Tests
// ============================================================================

#[test]
fn test_yahoo_client_new() {
    let client = YahooClient::new(ClientConfig::default());

    assert!(client.is_ok());
}

#[test]
fn test_yahoo_client_base_url_trimmed() {
    let client = YahooClient::with_base_url("https://query1.finance.yahoo.com/").unwrap();

    assert_eq!(client.base_url(), "https://query1.finance.yahoo.com");
}

#[test]
fn test_yahoo_client_invalid_base_url() {
    let err = YahooClient::with_base_url("not a url").unwrap_err();

    assert!(matches!(err, Error::InvalidUrl(_)));
}

// ============================================================================
// URL Building Tests
// ============================================================================

#[test]
fn test_endpoint_building() {
    let client = YahooClient::with_base_url("https://query2.finance.yahoo.com").unwrap();

    let url = client
        .endpoint(&["v7", "finance", "options", "AAPL"])
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://query2.finance.yahoo.com/v7/finance/options/AAPL"
    );
}

#[test]
fn test_endpoint_encodes_symbol_segment() {
    let client = YahooClient::with_base_url("http://localhost:8080/proxy/").unwrap();

    let url = client
        .endpoint(&["v8", "finance", "chart", "BRK/B"])
        .unwrap();
    assert_eq!(
        url.as_str(),
        "http://localhost:8080/proxy/v8/finance/chart/BRK%2FB"
    );
}

#[tokio::test]
async fn test_crumb_starts_empty_and_invalidates() {
    let client = YahooClient::with_base_url("http://localhost:8080").unwrap();
    assert!(client.crumb.lock().await.is_none());

    *client.crumb.lock().await = Some("abc".to_string());
    assert_eq!(client.crumb().await.unwrap(), "abc");

    client.invalidate_crumb().await;
    assert!(client.crumb.lock().await.is_none());
}

// ============================================================================
// Stub Server Tests
// ============================================================================

const CRUMB: &str = "stub-crumb";

const AAPL_SUMMARY: &str = r#"{"quoteSummary": {"result": [{
    "price": {"longName": "Apple Inc."},
    "financialData": {"currentPrice": {"raw": 227.52, "fmt": "227.52"}},
    "quoteType": {"longName": "Apple Inc."}
}], "error": null}}"#;

const AAPL_OPTIONS: &str = r#"{"optionChain": {"result": [{
    "underlyingSymbol": "AAPL",
    "expirationDates": [1737072000, 1737676800],
    "options": [{
        "expirationDate": 1737072000,
        "calls": [{"contractSymbol": "AAPL250117C00220000", "strike": 220.0, "lastPrice": 9.15}],
        "puts": [{"contractSymbol": "AAPL250117P00220000", "strike": 220.0, "lastPrice": 1.02}]
    }]
}], "error": null}}"#;

const INVALID_CRUMB: &str =
    r#"{"finance": {"result": null, "error": {"code": "Unauthorized", "description": "Invalid Crumb"}}}"#;

/// Records every request URI it serves.
#[derive(Default)]
struct Stub {
    requests: std::sync::Mutex<Vec<String>>,
}

impl Stub {
    fn record(&self, uri: &Uri) {
        self.requests.lock().unwrap().push(uri.to_string());
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn count(&self, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.split('?').next() == Some(path))
            .count()
    }

    fn find(&self, path: &str) -> String {
        self.requests()
            .into_iter()
            .rev()
            .find(|r| r.starts_with(path))
            .unwrap_or_default()
    }
}

async fn cookie(State(stub): State<Arc<Stub>>, uri: Uri) -> StatusCode {
    stub.record(&uri);
    StatusCode::NOT_FOUND
}

async fn getcrumb(State(stub): State<Arc<Stub>>, uri: Uri) -> &'static str {
    stub.record(&uri);
    CRUMB
}

async fn quote_summary(
    State(stub): State<Arc<Stub>>,
    Path(symbol): Path<String>,
    uri: Uri,
) -> (StatusCode, String) {
    stub.record(&uri);
    match symbol.as_str() {
        "AAPL" => (StatusCode::OK, AAPL_SUMMARY.to_string()),
        "LOCKED" => (StatusCode::UNAUTHORIZED, INVALID_CRUMB.to_string()),
        _ => (
            StatusCode::NOT_FOUND,
            format!(
                r#"{{"quoteSummary": {{"result": null, "error": {{"code": "Not Found", "description": "Quote not found for symbol: {}"}}}}}}"#,
                symbol
            ),
        ),
    }
}

async fn chart(State(stub): State<Arc<Stub>>, uri: Uri) -> (StatusCode, &'static str) {
    stub.record(&uri);
    (StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable")
}

async fn options(State(stub): State<Arc<Stub>>, uri: Uri) -> &'static str {
    stub.record(&uri);
    AAPL_OPTIONS
}

/// Serves a Yahoo lookalike on an ephemeral port and points a client at it.
async fn stub_client() -> (YahooClient, Arc<Stub>) {
    let stub = Arc::new(Stub::default());
    let app = Router::new()
        .route("/cookie", get(cookie))
        .route("/v1/test/getcrumb", get(getcrumb))
        .route("/v10/finance/quoteSummary/{symbol}", get(quote_summary))
        .route("/v8/finance/chart/{symbol}", get(chart))
        .route("/v7/finance/options/{symbol}", get(options))
        .with_state(stub.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = YahooClient::new(ClientConfig {
        base_url: base.clone(),
        cookie_url: format!("{}/cookie", base),
        ..Default::default()
    })
    .unwrap();
    (client, stub)
}

#[tokio::test]
async fn test_crumb_fetched_once_and_reused() {
    let (client, stub) = stub_client().await;

    let info = client.get_instrument_info("AAPL").await.unwrap();
    assert_eq!(info.long_name.as_deref(), Some("Apple Inc."));
    assert_eq!(info.current_price, Some(227.52));

    client.get_instrument_info("AAPL").await.unwrap();
    client.list_option_expirations("AAPL").await.unwrap();

    assert_eq!(stub.count("/cookie"), 1);
    assert_eq!(stub.count("/v1/test/getcrumb"), 1);

    let summary = stub.find("/v10/finance/quoteSummary/AAPL");
    assert!(summary.contains("modules=price%2CfinancialData%2CquoteType"));
    assert!(summary.contains("crumb=stub-crumb"));
    assert!(stub.find("/v7/finance/options/AAPL").contains("crumb=stub-crumb"));
}

#[tokio::test]
async fn test_unauthorized_clears_crumb() {
    let (client, stub) = stub_client().await;

    let err = client.get_instrument_info("LOCKED").await.unwrap_err();
    assert!(matches!(err, Error::Auth(ref m) if m == "Invalid Crumb"));
    assert!(client.crumb.lock().await.is_none());

    client.get_instrument_info("AAPL").await.unwrap();
    assert_eq!(stub.count("/v1/test/getcrumb"), 2);
}

#[tokio::test]
async fn test_not_found_carries_provider_description() {
    let (client, _stub) = stub_client().await;

    let err = client.get_instrument_info("ZZZZ").await.unwrap_err();

    assert!(matches!(err, Error::NotFound(ref m) if m == "Quote not found for symbol: ZZZZ"));
}

#[tokio::test]
async fn test_other_status_maps_to_api_error() {
    let (client, stub) = stub_client().await;

    let err = client
        .get_price_history("AAPL", HistoryPeriod::FiveDays)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Api { status: 503, ref message } if message == "Service Unavailable"
    ));
    let chart = stub.find("/v8/finance/chart/AAPL");
    assert!(chart.contains("range=5d"));
    assert!(chart.contains("interval=1d"));
    assert!(!chart.contains("crumb="));
    assert_eq!(stub.count("/v1/test/getcrumb"), 0);
}

#[tokio::test]
async fn test_option_chain_sends_expiration_timestamp() {
    let (client, stub) = stub_client().await;

    let expirations = client.list_option_expirations("AAPL").await.unwrap();
    assert_eq!(expirations, vec!["2025-01-17", "2025-01-24"]);

    let chain = client.get_option_chain("AAPL", "2025-01-17").await.unwrap();
    assert_eq!(chain.calls.len(), 1);
    assert_eq!(chain.puts[0].last_price, Some(1.02));

    let request = stub.find("/v7/finance/options/AAPL");
    assert!(request.contains("date=1737072000"));
    assert!(request.contains("crumb=stub-crumb"));
}
