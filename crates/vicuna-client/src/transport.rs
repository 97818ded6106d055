//! The transport seam between the request clients and the network.

use bytes::Bytes;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use reqwest::{Method, StatusCode};
use std::time::Duration;
use vicuna_types::{Result, VicunaError};

/// A single outgoing HTTP exchange, fully resolved by the calling client.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// HTTP method.
    pub method: Method,
    /// Merged request headers.
    pub headers: HeaderMap,
    /// Request body, if any.
    pub body: Option<Bytes>,
}

impl TransportRequest {
    /// Creates a request with the given method and no headers or body.
    #[must_use]
    pub fn new(method: Method) -> Self {
        Self {
            method,
            headers: HeaderMap::new(),
            body: None,
        }
    }
}

/// The reply side of a transport exchange.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Raw response body.
    pub body: Bytes,
}

impl TransportResponse {
    /// Creates a response from its parts.
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub fn success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns the status text associated with the code, or the empty
    /// string for codes without a canonical reason.
    #[must_use]
    pub fn status_text(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("")
    }

    /// Returns the declared `content-type`, if one was sent and is valid
    /// UTF-8.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }

    /// Decodes the body as JSON, without schema validation.
    ///
    /// # Errors
    ///
    /// Returns [`VicunaError::Decode`] if the body is not valid JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Decodes the body as text, replacing invalid UTF-8 sequences.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// An injected capability that performs one HTTP exchange.
///
/// The clients never open sockets themselves; everything on the wire goes
/// through an implementation of this trait. One call is one exchange: no
/// retries, no caching. A hung exchange pends until the implementation
/// itself gives up.
pub trait Transport {
    /// Sends `request` to `url` and returns the wrapped response.
    ///
    /// # Errors
    ///
    /// Returns [`VicunaError::Transport`] on network-level failure,
    /// including implementation-level timeouts.
    fn send(
        &self,
        url: &str,
        request: TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse>> + Send;
}

/// Configuration for the reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Request timeout.
    pub timeout: Duration,
    /// Connection timeout (separate from the request timeout).
    pub connect_timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("vicuna/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Production transport over a pooled [`reqwest::Client`].
///
/// Performs exactly one attempt per exchange; transient failures surface
/// to the caller instead of being retried.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`VicunaError::Transport`] if the HTTP client cannot be
    /// built.
    pub fn new(config: &TransportConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| VicunaError::Transport(e.to_string()))?;
        Ok(Self { client })
    }

    /// Creates a transport with default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`VicunaError::Transport`] if the HTTP client cannot be
    /// built.
    pub fn with_defaults() -> Result<Self> {
        Self::new(&TransportConfig::default())
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, url: &str, request: TransportRequest) -> Result<TransportResponse> {
        let mut builder = self
            .client
            .request(request.method, url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| VicunaError::Transport(e.to_string()))?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| VicunaError::Transport(e.to_string()))?;

        Ok(TransportResponse::new(status, headers, body))
    }
}

#[cfg(test)]
pub(crate) mod stub {
    use super::*;
    use reqwest::header::HeaderValue;
    use std::sync::Mutex;

    /// Test transport that records outgoing exchanges and replays one
    /// canned response.
    #[derive(Debug)]
    pub(crate) struct StubTransport {
        response: TransportResponse,
        requests: Mutex<Vec<(String, TransportRequest)>>,
    }

    impl StubTransport {
        pub(crate) fn new(response: TransportResponse) -> Self {
            Self {
                response,
                requests: Mutex::new(Vec::new()),
            }
        }

        /// A 200 response declaring `application/json`.
        pub(crate) fn json(body: &str) -> Self {
            let mut headers = HeaderMap::new();
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            Self::new(TransportResponse::new(
                StatusCode::OK,
                headers,
                body.as_bytes().to_vec(),
            ))
        }

        /// A 200 response declaring `text/plain`.
        pub(crate) fn text(body: &str) -> Self {
            let mut headers = HeaderMap::new();
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
            Self::new(TransportResponse::new(
                StatusCode::OK,
                headers,
                body.as_bytes().to_vec(),
            ))
        }

        /// An empty response with the given status and no content type.
        pub(crate) fn status(status: u16) -> Self {
            Self::new(TransportResponse::new(
                StatusCode::from_u16(status).unwrap(),
                HeaderMap::new(),
                Vec::new(),
            ))
        }

        pub(crate) fn last_url(&self) -> String {
            let requests = self.requests.lock().unwrap();
            requests.last().expect("no requests recorded").0.clone()
        }

        pub(crate) fn last_headers(&self) -> HeaderMap {
            let requests = self.requests.lock().unwrap();
            requests.last().expect("no requests recorded").1.headers.clone()
        }

        pub(crate) fn last_request(&self) -> TransportRequest {
            let requests = self.requests.lock().unwrap();
            requests.last().expect("no requests recorded").1.clone()
        }

        pub(crate) fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    impl Transport for StubTransport {
        async fn send(&self, url: &str, request: TransportRequest) -> Result<TransportResponse> {
            self.requests
                .lock()
                .unwrap()
                .push((url.to_string(), request));
            Ok(self.response.clone())
        }
    }
}
