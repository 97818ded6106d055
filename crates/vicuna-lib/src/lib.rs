//! Market data client library for desktop stock widgets.
//!
//! This is a facade crate that re-exports functionality from the vicuna
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use vicuna_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = MarketDataConfig::new().with_credentials("key-id", "secret");
//!     let transport = ReqwestTransport::with_defaults()?;
//!     let client = MarketDataClient::new(transport, &config)?;
//!
//!     let latest = client.latest_bars(&["AAPL", "TSLA"], Feed::Iex).await?;
//!     for bar in &latest.bars {
//!         println!("{bar}");
//!     }
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/vicuna-rs/vicuna/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use vicuna_types::*;

// Re-export the HTTP layer
#[cfg(feature = "client")]
pub use vicuna_client::{
    API_KEY_HEADER, API_SECRET_HEADER, ApiClient, DATA_URL, LatestBars, MarketDataClient, Payload,
    ReqwestTransport, RequestOptions, Transport, TransportConfig, TransportRequest,
    TransportResponse,
};

/// Prelude module for convenient imports.
///
/// ```
/// use vicuna_lib::prelude::*;
/// ```
pub mod prelude {
    pub use vicuna_types::{Feed, MarketDataConfig, Result, Timeframe, VicunaError};

    #[cfg(feature = "client")]
    pub use vicuna_client::{
        ApiClient, LatestBars, MarketDataClient, Payload, ReqwestTransport, RequestOptions,
        Transport,
    };
}
