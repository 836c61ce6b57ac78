//! # Options Chain Viewer
//!
//! A single-page web dashboard for paper-trading research: type a ticker
//! symbol, see the security's current price and its option chain (calls and
//! puts) for a chosen expiration date, sourced live from Yahoo Finance.
//! Built with [Axum](https://crates.io/crates/axum); the market data access
//! lives in the sibling `market-data-client` crate.
//!
//! ## Key Features
//!
//! - **Live Data**: Every interaction re-fetches instrument info, price,
//!   expirations and the option chain. Nothing is cached.
//!
//! - **Price Fallback**: When the provider reports no current price the last
//!   close of the configured history window is shown instead.
//!
//! - **Server-Rendered Page**: Plain HTML forms carry the widget state
//!   (`symbol`, `expiration`) in the query string.
//!
//! - **JSON API**: The same pipeline is exposed as REST endpoints with
//!   OpenAPI documentation at `/swagger-ui/`.
//!
//! - **Structured Logging**: Request tracing with `tower-http` and `tracing`.
//!
//! ## Pipeline
//!
//! ```text
//! symbol ─► get_instrument_info ─► get_price_history (only without a price)
//!        ─► list_option_expirations ─► get_option_chain ─► reshape ─► render
//! ```
//!
//! ## Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`api`] | Route handlers and router configuration |
//! | [`config`] | TOML configuration with environment overrides |
//! | [`dashboard`] | The fetch-and-reshape controller |
//! | [`error`] | API error types with `IntoResponse` implementation |
//! | [`models`] | Quote, option tables and REST DTOs |
//! | [`render`] | HTML page rendering |
//! | [`state`] | Application state |
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/?symbol=AAPL&expiration=2025-01-17` | Dashboard page |
//! | GET | `/health` | Health check |
//! | GET | `/api/v1/quote/{symbol}` | Company name and price |
//! | GET | `/api/v1/expirations/{symbol}` | Option expiration dates |
//! | GET | `/api/v1/chain/{symbol}?expiration=` | Calls and puts tables |
//!
//! ## Example Usage
//!
//! ```bash
//! # Development mode
//! cargo run
//!
//! # With custom host/port
//! HOST=127.0.0.1 PORT=3000 cargo run
//!
//! # With a configuration file
//! CONFIG_PATH=config/default.toml cargo run
//! ```
//!
//! ```bash
//! curl http://localhost:8080/api/v1/quote/AAPL
//! curl "http://localhost:8080/api/v1/chain/AAPL?expiration=2025-01-17"
//! ```

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod render;
pub mod state;
