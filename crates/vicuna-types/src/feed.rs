//! Market data feed selection.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The market data source tier requested from the upstream API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Feed {
    /// Investors Exchange, the free tier.
    #[default]
    Iex,
    /// Securities Information Processor, consolidated across exchanges.
    Sip,
    /// Over-the-counter exchanges.
    Otc,
}

impl Feed {
    /// Returns the feed as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Iex => "iex",
            Self::Sip => "sip",
            Self::Otc => "otc",
        }
    }
}

impl std::fmt::Display for Feed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Feed {
    type Err = FeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "iex" => Ok(Self::Iex),
            "sip" => Ok(Self::Sip),
            "otc" => Ok(Self::Otc),
            _ => Err(FeedParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid feed string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedParseError(String);

impl std::fmt::Display for FeedParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid feed '{}', expected one of: iex, sip, otc", self.0)
    }
}

impl std::error::Error for FeedParseError {}
