//! Core types for the vicuna market data client.
//!
//! This crate provides the fundamental types used throughout vicuna:
//!
//! - [`VicunaError`] - Error taxonomy for HTTP, decode, and transport failures
//! - [`Timeframe`] - Bucketing interval for historical bars
//! - [`Feed`] - Market data source tier
//! - [`MarketDataConfig`] - Configuration supplied by the embedding shell

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/vicuna-rs/vicuna/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod feed;
mod timeframe;

pub use config::MarketDataConfig;
pub use error::{Result, VicunaError};
pub use feed::{Feed, FeedParseError};
pub use timeframe::{Timeframe, TimeframeParseError};
