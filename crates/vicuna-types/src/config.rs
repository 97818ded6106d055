//! Client configuration supplied by the embedding shell.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration for the market data client.
///
/// Loaded and owned by the surrounding shell, not by this library. Every
/// field has a defined default so partial configurations deserialize
/// cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketDataConfig {
    /// Extra default headers merged into every request.
    pub headers: HashMap<String, String>,
    /// API key identifier, installed as a credential header when both it
    /// and `api_secret` are present.
    pub api_key: Option<String>,
    /// API secret, installed as a credential header when both it and
    /// `api_key` are present.
    pub api_secret: Option<String>,
}

impl MarketDataConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a default header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets the API credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        self.api_key = Some(api_key.into());
        self.api_secret = Some(api_secret.into());
        self
    }
}
