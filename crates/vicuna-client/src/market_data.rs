//! Market data operations over the upstream data API.

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use std::collections::HashMap;
use url::form_urlencoded;
use vicuna_types::{Feed, MarketDataConfig, Result, Timeframe, VicunaError};

use crate::service::{ApiClient, Payload, RequestOptions};
use crate::transport::Transport;

/// Base URL for the Alpaca Data API.
pub const DATA_URL: &str = "https://data.alpaca.markets/v2";

/// Header carrying the API key identifier.
pub const API_KEY_HEADER: &str = "apca-api-key-id";
/// Header carrying the API secret.
pub const API_SECRET_HEADER: &str = "apca-api-secret-key";

/// Latest-bar lookup result, normalized to always carry a list of bars.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LatestBars {
    /// One bar record per symbol, exactly as returned by the upstream API.
    /// Empty when the reply carried no `bars` field.
    pub bars: Vec<Value>,
}

/// Client for the market data endpoints, fixed to [`DATA_URL`].
///
/// A thin specialization of [`ApiClient`]: each method translates typed
/// parameters into a query string and delegates the exchange.
#[derive(Debug)]
pub struct MarketDataClient<T: Transport> {
    api: ApiClient<T>,
}

impl<T: Transport> MarketDataClient<T> {
    /// Creates a client over `transport`, merging the configured headers
    /// into the generic client's defaults. When the configuration carries
    /// both credentials, the credential headers are installed as well.
    ///
    /// # Errors
    ///
    /// Returns [`VicunaError::InvalidHeader`] when a configured header or
    /// credential cannot be represented as a valid HTTP header.
    pub fn new(transport: T, config: &MarketDataConfig) -> Result<Self> {
        let headers = header_map(&config.headers)?;
        let mut client = Self {
            api: ApiClient::new(transport, DATA_URL, headers),
        };
        if let (Some(key), Some(secret)) = (&config.api_key, &config.api_secret) {
            client.set_credentials(key, secret)?;
        }
        Ok(client)
    }

    /// Returns the underlying generic client.
    #[must_use]
    pub const fn api(&self) -> &ApiClient<T> {
        &self.api
    }

    /// Returns the underlying generic client mutably.
    pub fn api_mut(&mut self) -> &mut ApiClient<T> {
        &mut self.api
    }

    /// Fetches the latest bar for each of `symbols` from `feed`.
    ///
    /// The reply is normalized so that callers always receive a list of
    /// bars: a missing `bars` field means "no data", not an error. This
    /// is deliberately asymmetric with [`MarketDataClient::historical_bars`],
    /// which hands back the raw payload.
    ///
    /// # Errors
    ///
    /// [`VicunaError::Decode`] when the reply carries a `bars` field that
    /// is not a sequence; otherwise see [`ApiClient::request`].
    pub async fn latest_bars(&self, symbols: &[&str], feed: Feed) -> Result<LatestBars> {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("symbols", &symbols.join(","))
            .append_pair("feed", feed.as_str())
            .finish();
        let payload = self
            .api
            .get(&format!("stocks/bars/latest?{query}"), RequestOptions::default())
            .await?;

        let bars = match payload {
            Payload::Json(Value::Object(mut reply)) => match reply.remove("bars") {
                None | Some(Value::Null) => Vec::new(),
                Some(Value::Array(bars)) => bars,
                Some(other) => {
                    return Err(VicunaError::Decode(format!(
                        "expected a sequence of bars, got {other}"
                    )));
                }
            },
            _ => Vec::new(),
        };
        Ok(LatestBars { bars })
    }

    /// Fetches historical bars for `symbols`, bucketed by `timeframe`.
    ///
    /// `start` and `end` are included in the query only when provided;
    /// omission leaves that side of the range unbounded. The decoded reply
    /// is returned unmodified.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn historical_bars(
        &self,
        symbols: &[&str],
        timeframe: Timeframe,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Payload> {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("symbols", &symbols.join(","));
        query.append_pair("timeframe", timeframe.as_str());
        if let Some(start) = start {
            query.append_pair("start", &start.to_rfc3339_opts(SecondsFormat::Millis, true));
        }
        if let Some(end) = end {
            query.append_pair("end", &end.to_rfc3339_opts(SecondsFormat::Millis, true));
        }
        query.append_pair("feed", Feed::Iex.as_str());

        self.api
            .get(&format!("stocks/bars?{}", query.finish()), RequestOptions::default())
            .await
    }

    /// Fetches metadata for `symbols`. The decoded reply is returned
    /// unmodified.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn stock_info(&self, symbols: &[&str]) -> Result<Payload> {
        self.api
            .get(
                &format!("stocks?symbols={}", symbols.join(",")),
                RequestOptions::default(),
            )
            .await
    }

    /// Installs the credential headers, merging into the existing default
    /// headers without touching unrelated entries. Takes effect on
    /// subsequent calls only.
    ///
    /// # Errors
    ///
    /// Returns [`VicunaError::InvalidHeader`] when a credential cannot be
    /// carried in a header value.
    pub fn set_credentials(&mut self, api_key: &str, api_secret: &str) -> Result<()> {
        let mut headers = HeaderMap::with_capacity(2);
        headers.insert(
            HeaderName::from_static(API_KEY_HEADER),
            HeaderValue::from_str(api_key)
                .map_err(|_| VicunaError::InvalidHeader(API_KEY_HEADER.to_string()))?,
        );
        headers.insert(
            HeaderName::from_static(API_SECRET_HEADER),
            HeaderValue::from_str(api_secret)
                .map_err(|_| VicunaError::InvalidHeader(API_SECRET_HEADER.to_string()))?,
        );
        self.api.set_headers(headers, false);
        Ok(())
    }
}

fn header_map(headers: &HashMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| VicunaError::InvalidHeader(name.clone()))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| VicunaError::InvalidHeader(name.to_string()))?;
        map.insert(name, value);
    }
    Ok(map)
}
