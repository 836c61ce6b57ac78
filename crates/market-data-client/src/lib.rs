//! Market data client library.
//!
//! This crate defines the [`MarketDataProvider`] capabilities the options
//! dashboard consumes (instrument info, price history, option expirations and
//! option chains) and a Yahoo Finance implementation over `reqwest`.
//!
//! # Example
//!
//! ```no_run
//! use market_data_client::{ClientConfig, MarketDataProvider, YahooClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), market_data_client::Error> {
//!     let client = YahooClient::new(ClientConfig::default())?;
//!
//!     let info = client.get_instrument_info("AAPL").await?;
//!     println!("Name: {:?}", info.long_name);
//!
//!     for expiration in client.list_option_expirations("AAPL").await? {
//!         println!("{}", expiration);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod provider;
mod types;
mod yahoo;

pub use client::{ClientConfig, YahooClient};
pub use error::Error;
pub use provider::{MarketDataProvider, ProviderFuture};
pub use types::*;
pub use yahoo::{expiration_label, expiration_timestamp};
