//! HTTP layer for the vicuna market data library.
//!
//! This crate provides the request pipeline:
//!
//! - [`Transport`] - the injected capability that performs one HTTP exchange
//! - [`ReqwestTransport`] - production transport over a pooled reqwest client
//! - [`ApiClient`] - generic request client: URL building, header defaults,
//!   content-type dispatch
//! - [`MarketDataClient`] - market data operations fixed to the upstream
//!   data host

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/vicuna-rs/vicuna/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod market_data;
mod service;
mod transport;

pub use market_data::{
    API_KEY_HEADER, API_SECRET_HEADER, DATA_URL, LatestBars, MarketDataClient,
};
pub use service::{ApiClient, Payload, RequestOptions};
pub use transport::{
    ReqwestTransport, Transport, TransportConfig, TransportRequest, TransportResponse,
};
