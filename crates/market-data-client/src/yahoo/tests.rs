//! Unit tests for Yahoo wire parsing.

use super::*;

// ============================================================================
// quoteSummary
// ============================================================================

#[test]
fn test_parse_instrument_info_full() {
    let body = r#"{
        "quoteSummary": {
            "result": [{
                "price": {"longName": "Apple Inc.", "regularMarketPrice": {"raw": 227.1, "fmt": "227.10"}},
                "financialData": {"currentPrice": {"raw": 227.52, "fmt": "227.52"}},
                "quoteType": {"longName": "Apple Inc."}
            }],
            "error": null
        }
    }"#;

    let info = parse_instrument_info("AAPL", body).unwrap();
    assert_eq!(info.long_name.as_deref(), Some("Apple Inc."));
    assert_eq!(info.current_price, Some(227.52));
}

#[test]
fn test_parse_instrument_info_etf_without_financial_data() {
    let body = r#"{
        "quoteSummary": {
            "result": [{
                "price": {},
                "quoteType": {"longName": "SPDR S&P 500 ETF Trust"}
            }],
            "error": null
        }
    }"#;

    let info = parse_instrument_info("SPY", body).unwrap();
    assert_eq!(info.long_name.as_deref(), Some("SPDR S&P 500 ETF Trust"));
    assert_eq!(info.current_price, None);
}

#[test]
fn test_parse_instrument_info_empty_current_price_object() {
    let body = r#"{"quoteSummary": {"result": [{"financialData": {"currentPrice": {}}}]}}"#;

    let info = parse_instrument_info("XYZ", body).unwrap();
    assert_eq!(info.long_name, None);
    assert_eq!(info.current_price, None);
}

#[test]
fn test_parse_instrument_info_provider_error() {
    let body = r#"{
        "quoteSummary": {
            "result": null,
            "error": {"code": "Not Found", "description": "Quote not found for symbol: ZZZZ"}
        }
    }"#;

    let err = parse_instrument_info("ZZZZ", body).unwrap_err();
    match err {
        Error::Provider { code, description } => {
            assert_eq!(code, "Not Found");
            assert_eq!(description, "Quote not found for symbol: ZZZZ");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_parse_instrument_info_empty_result() {
    let body = r#"{"quoteSummary": {"result": [], "error": null}}"#;

    let err = parse_instrument_info("ZZZZ", body).unwrap_err();
    assert!(matches!(err, Error::NotFound(ref msg) if msg.contains("ZZZZ")));
}

#[test]
fn test_parse_instrument_info_malformed() {
    let err = parse_instrument_info("AAPL", "<html>").unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

// ============================================================================
// chart
// ============================================================================

#[test]
fn test_parse_price_history() {
    let body = r#"{
        "chart": {
            "result": [{
                "meta": {"symbol": "SPY"},
                "timestamp": [1736947800, 1737034200],
                "indicators": {"quote": [{
                    "open": [590.1, 592.0],
                    "high": [593.5, 596.2],
                    "low": [589.0, 591.1],
                    "close": [592.78, 595.31],
                    "volume": [41000000, 38000000]
                }]}
            }],
            "error": null
        }
    }"#;

    let history = parse_price_history(body).unwrap();
    assert_eq!(history.bars.len(), 2);
    assert_eq!(history.bars[1].timestamp, 1737034200);
    assert_eq!(history.bars[1].volume, Some(38000000));
    assert_eq!(history.last_close(), Some(595.31));
}

#[test]
fn test_parse_price_history_drops_null_rows() {
    let body = r#"{
        "chart": {
            "result": [{
                "timestamp": [1, 2],
                "indicators": {"quote": [{
                    "open": [10.0, null], "high": [11.0, null], "low": [9.0, null],
                    "close": [10.5, null], "volume": [100, null]
                }]}
            }]
        }
    }"#;

    let history = parse_price_history(body).unwrap();
    assert_eq!(history.bars.len(), 1);
    assert_eq!(history.last_close(), Some(10.5));
}

#[test]
fn test_parse_price_history_without_timestamps_is_empty() {
    let body = r#"{
        "chart": {
            "result": [{"meta": {"symbol": "XYZ"}, "indicators": {"quote": [{}]}}],
            "error": null
        }
    }"#;

    let history = parse_price_history(body).unwrap();
    assert!(history.is_empty());
}

#[test]
fn test_parse_price_history_error() {
    let body = r#"{
        "chart": {
            "result": null,
            "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}
        }
    }"#;

    let err = parse_price_history(body).unwrap_err();
    assert!(format!("{}", err).contains("symbol may be delisted"));
}

// ============================================================================
// options
// ============================================================================

const OPTIONS_BODY: &str = r#"{
    "optionChain": {
        "result": [{
            "underlyingSymbol": "AAPL",
            "expirationDates": [1737072000, 1737676800],
            "strikes": [150.0, 155.0],
            "quote": {"regularMarketPrice": 227.52},
            "options": [{
                "expirationDate": 1737072000,
                "calls": [
                    {"contractSymbol": "AAPL250117C00155000", "strike": 155.0, "lastPrice": 72.5,
                     "bid": 72.1, "ask": 72.9, "volume": 3, "openInterest": 800, "impliedVolatility": 0.61},
                    {"contractSymbol": "AAPL250117C00150000", "strike": 150.0, "lastPrice": 77.4,
                     "bid": 77.0, "ask": 77.8, "openInterest": 1200, "impliedVolatility": 0.65}
                ],
                "puts": [
                    {"contractSymbol": "AAPL250117P00150000", "strike": 150.0, "lastPrice": 0.02,
                     "bid": 0.01, "ask": 0.03, "volume": 40, "openInterest": 5000, "impliedVolatility": 0.9}
                ]
            }]
        }],
        "error": null
    }
}"#;

#[test]
fn test_parse_expirations() {
    let expirations = parse_expirations(OPTIONS_BODY).unwrap();
    assert_eq!(expirations, vec!["2025-01-17", "2025-01-24"]);
}

#[test]
fn test_parse_expirations_empty_result() {
    let body = r#"{"optionChain": {"result": [], "error": null}}"#;
    assert!(parse_expirations(body).unwrap().is_empty());
}

#[test]
fn test_parse_expirations_no_dates() {
    let body = r#"{"optionChain": {"result": [{"underlyingSymbol": "XYZ", "expirationDates": [], "options": []}]}}"#;
    assert!(parse_expirations(body).unwrap().is_empty());
}

#[test]
fn test_parse_option_chain_keeps_provider_order() {
    let chain = parse_option_chain(OPTIONS_BODY).unwrap();

    assert_eq!(chain.calls.len(), 2);
    assert_eq!(chain.calls[0].strike, 155.0);
    assert_eq!(chain.calls[1].strike, 150.0);
    assert_eq!(chain.calls[1].volume, None);
    assert_eq!(chain.puts.len(), 1);
    assert_eq!(chain.puts[0].open_interest, Some(5000));
}

#[test]
fn test_parse_option_chain_error() {
    let body = r#"{"optionChain": {"result": null, "error": {"code": "Unauthorized", "description": "Invalid Crumb"}}}"#;

    let err = parse_option_chain(body).unwrap_err();
    assert!(matches!(err, Error::Provider { ref code, .. } if code == "Unauthorized"));
}

// ============================================================================
// Helpers
// ============================================================================

#[test]
fn test_expiration_label_and_timestamp_agree() {
    assert_eq!(expiration_label(1737072000).as_deref(), Some("2025-01-17"));
    assert_eq!(expiration_timestamp("2025-01-17").unwrap(), 1737072000);
}

#[test]
fn test_expiration_timestamp_invalid() {
    let err = expiration_timestamp("20250117").unwrap_err();
    assert!(matches!(err, Error::InvalidRequest(_)));
}

#[test]
fn test_error_description() {
    let body = r#"{"finance": {"result": null, "error": {"code": "Unauthorized", "description": "User is unable to access this feature"}}}"#;
    assert_eq!(
        error_description(body).as_deref(),
        Some("User is unable to access this feature")
    );
    assert_eq!(error_description("Too Many Requests"), None);
}
