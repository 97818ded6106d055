//! Historical bar timeframe definitions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Bucketing interval for historical bars.
///
/// Serializes to the exact string the upstream API expects in the
/// `timeframe` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Timeframe {
    /// 1-minute bars.
    #[serde(rename = "1Min")]
    Min1,
    /// 5-minute bars.
    #[serde(rename = "5Min")]
    Min5,
    /// 15-minute bars.
    #[serde(rename = "15Min")]
    Min15,
    /// 30-minute bars.
    #[serde(rename = "30Min")]
    Min30,
    /// Hourly bars.
    #[serde(rename = "1H")]
    Hour1,
    /// Daily bars.
    #[default]
    #[serde(rename = "1D")]
    Day1,
    /// Weekly bars.
    #[serde(rename = "1W")]
    Week1,
    /// Monthly bars.
    #[serde(rename = "1M")]
    Month1,
}

impl Timeframe {
    /// Returns the timeframe as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Min1 => "1Min",
            Self::Min5 => "5Min",
            Self::Min15 => "15Min",
            Self::Min30 => "30Min",
            Self::Hour1 => "1H",
            Self::Day1 => "1D",
            Self::Week1 => "1W",
            Self::Month1 => "1M",
        }
    }

    /// Returns all available timeframes.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Min1,
            Self::Min5,
            Self::Min15,
            Self::Min30,
            Self::Hour1,
            Self::Day1,
            Self::Week1,
            Self::Month1,
        ]
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = TimeframeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1min" | "min" | "minute" | "minute1" => Ok(Self::Min1),
            "5min" | "minute5" => Ok(Self::Min5),
            "15min" | "minute15" => Ok(Self::Min15),
            "30min" | "minute30" => Ok(Self::Min30),
            "1h" | "h" | "hour" | "1hour" | "hourly" => Ok(Self::Hour1),
            "1d" | "d" | "day" | "1day" | "daily" => Ok(Self::Day1),
            "1w" | "w" | "week" | "1week" | "weekly" => Ok(Self::Week1),
            "1m" | "month" | "1month" | "monthly" => Ok(Self::Month1),
            _ => Err(TimeframeParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid timeframe string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeframeParseError(String);

impl std::fmt::Display for TimeframeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid timeframe '{}', expected one of: 1Min, 5Min, 15Min, 30Min, 1H, 1D, 1W, 1M",
            self.0
        )
    }
}

impl std::error::Error for TimeframeParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_daily() {
        assert_eq!(Timeframe::default(), Timeframe::Day1);
        assert_eq!(Timeframe::default().as_str(), "1D");
    }

    #[test]
    fn test_timeframe_parse() {
        assert_eq!("1Min".parse::<Timeframe>().unwrap(), Timeframe::Min1);
        assert_eq!("1d".parse::<Timeframe>().unwrap(), Timeframe::Day1);
        assert_eq!("daily".parse::<Timeframe>().unwrap(), Timeframe::Day1);
        assert_eq!("1H".parse::<Timeframe>().unwrap(), Timeframe::Hour1);
        assert_eq!("1M".parse::<Timeframe>().unwrap(), Timeframe::Month1);
        assert!("fortnight".parse::<Timeframe>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for timeframe in Timeframe::all() {
            let parsed: Timeframe = timeframe.to_string().parse().unwrap();
            assert_eq!(parsed, *timeframe);
        }
    }

    #[test]
    fn test_serde_wire_format() {
        let json = serde_json::to_string(&Timeframe::Day1).unwrap();
        assert_eq!(json, "\"1D\"");
        let parsed: Timeframe = serde_json::from_str("\"5Min\"").unwrap();
        assert_eq!(parsed, Timeframe::Min5);
    }
}
