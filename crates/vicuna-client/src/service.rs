//! Generic request client over an injected transport.

use bytes::Bytes;
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use vicuna_types::{Result, VicunaError};

use crate::transport::{Transport, TransportRequest};

/// Per-call overrides, merged over the client defaults for a single
/// request and then discarded.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// HTTP method. When unset, the verb helper that issued the call
    /// decides (a bare [`ApiClient::request`] defaults to GET).
    pub method: Option<Method>,
    /// Headers merged over the client defaults; per-call wins on key
    /// collision.
    pub headers: HeaderMap,
    /// Request body. When set on [`ApiClient::post`] or
    /// [`ApiClient::put`], it takes precedence over the serialized data.
    pub body: Option<Bytes>,
}

/// A decoded response body, selected by the reply's declared content type.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// An `application/json` reply, decoded without schema validation.
    Json(serde_json::Value),
    /// Any other reply, decoded as text.
    Text(String),
}

impl Payload {
    /// Returns the JSON value when this payload is structured.
    #[must_use]
    pub const fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// Consumes the payload, returning the JSON value when structured.
    #[must_use]
    pub fn into_json(self) -> Option<serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// Consumes the payload, returning the text when unstructured.
    #[must_use]
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Json(_) => None,
            Self::Text(text) => Some(text),
        }
    }
}

/// Generic request client: owns a base URL and default headers, builds
/// absolute URLs from relative paths, and dispatches response decoding by
/// content type.
///
/// All network activity goes through the injected [`Transport`]; multiple
/// calls may be in flight at once, each an independent exchange. Mutating
/// the defaults takes `&mut self`, so it cannot race an in-flight call.
#[derive(Debug)]
pub struct ApiClient<T: Transport> {
    transport: T,
    base_url: String,
    default_headers: HeaderMap,
}

impl<T: Transport> ApiClient<T> {
    /// Creates a client for `base_url`.
    ///
    /// The default header map always starts from
    /// `content-type: application/json`; entries in `default_headers`
    /// merge over it and may override it.
    pub fn new(transport: T, base_url: impl Into<String>, default_headers: HeaderMap) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in &default_headers {
            headers.insert(name.clone(), value.clone());
        }
        Self {
            transport,
            base_url: base_url.into(),
            default_headers: headers,
        }
    }

    /// Returns the current base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the current default headers.
    #[must_use]
    pub const fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    /// Builds the absolute URL for `path`.
    ///
    /// A path that is already absolute is returned unchanged. Otherwise
    /// the base and path are joined with exactly one separating slash,
    /// regardless of how many either side already carries.
    #[must_use]
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Performs one HTTP exchange for `path`.
    ///
    /// Default headers merge with per-call headers (per-call wins), the
    /// transport is invoked once, and the reply is decoded according to
    /// its declared content type.
    ///
    /// # Errors
    ///
    /// [`VicunaError::Http`] on a non-success status,
    /// [`VicunaError::Decode`] when the body does not match its declared
    /// content type, and [`VicunaError::Transport`] on network failure.
    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<Payload> {
        let RequestOptions {
            method,
            headers: call_headers,
            body,
        } = options;

        let url = self.build_url(path);
        let mut headers = self.default_headers.clone();
        for (name, value) in &call_headers {
            headers.insert(name.clone(), value.clone());
        }

        log::debug!("requesting {url}");

        let request = TransportRequest {
            method: method.unwrap_or(Method::GET),
            headers,
            body,
        };
        let response = self.transport.send(&url, request).await?;

        if !response.success() {
            return Err(VicunaError::Http {
                status: response.status.as_u16(),
                reason: response.status_text().to_string(),
            });
        }

        match response.content_type() {
            Some(ct) if ct.contains("application/json") => Ok(Payload::Json(response.json()?)),
            _ => Ok(Payload::Text(response.text())),
        }
    }

    /// Performs a GET request.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn get(&self, path: &str, mut options: RequestOptions) -> Result<Payload> {
        options.method.get_or_insert(Method::GET);
        self.request(path, options).await
    }

    /// Performs a POST request, serializing `data` as the JSON body.
    ///
    /// # Errors
    ///
    /// [`VicunaError::Decode`] when `data` cannot be serialized; otherwise
    /// see [`ApiClient::request`].
    pub async fn post<D: Serialize + ?Sized>(
        &self,
        path: &str,
        data: &D,
        mut options: RequestOptions,
    ) -> Result<Payload> {
        options.method.get_or_insert(Method::POST);
        if options.body.is_none() {
            options.body = Some(Bytes::from(serde_json::to_vec(data)?));
        }
        self.request(path, options).await
    }

    /// Performs a PUT request, serializing `data` as the JSON body.
    ///
    /// # Errors
    ///
    /// [`VicunaError::Decode`] when `data` cannot be serialized; otherwise
    /// see [`ApiClient::request`].
    pub async fn put<D: Serialize + ?Sized>(
        &self,
        path: &str,
        data: &D,
        mut options: RequestOptions,
    ) -> Result<Payload> {
        options.method.get_or_insert(Method::PUT);
        if options.body.is_none() {
            options.body = Some(Bytes::from(serde_json::to_vec(data)?));
        }
        self.request(path, options).await
    }

    /// Performs a DELETE request.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn delete(&self, path: &str, mut options: RequestOptions) -> Result<Payload> {
        options.method.get_or_insert(Method::DELETE);
        self.request(path, options).await
    }

    /// Replaces the base URL. Takes effect on subsequent calls only.
    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into();
    }

    /// Updates the default headers.
    ///
    /// With `replace = false` the given entries merge over the existing
    /// map, overwriting per key; with `replace = true` the existing map is
    /// discarded entirely.
    pub fn set_headers(&mut self, headers: HeaderMap, replace: bool) {
        if replace {
            self.default_headers = headers;
        } else {
            for (name, value) in &headers {
                self.default_headers.insert(name.clone(), value.clone());
            }
        }
    }
}

#[cfg(test)]
impl<T: Transport> ApiClient<T> {
    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::stub::StubTransport;
    use reqwest::header::HeaderName;
    use serde_json::json;

    fn client(transport: StubTransport) -> ApiClient<StubTransport> {
        ApiClient::new(transport, "https://api.example.com", HeaderMap::new())
    }

    #[test]
    fn test_build_url_absolute_is_unchanged() {
        let client = client(StubTransport::status(200));
        assert_eq!(
            client.build_url("https://other-api.com/data"),
            "https://other-api.com/data"
        );
        assert_eq!(
            client.build_url("http://plain.example.com"),
            "http://plain.example.com"
        );
    }

    #[test]
    fn test_build_url_single_separating_slash() {
        let stub = StubTransport::status(200);
        let mut client = ApiClient::new(stub, "https://api.example.com", HeaderMap::new());

        assert_eq!(client.build_url("users"), "https://api.example.com/users");
        assert_eq!(client.build_url("/users"), "https://api.example.com/users");

        client.set_base_url("https://api.example.com/");
        assert_eq!(client.build_url("users"), "https://api.example.com/users");
        assert_eq!(client.build_url("/users"), "https://api.example.com/users");

        client.set_base_url("https://api.example.com//");
        assert_eq!(client.build_url("//users"), "https://api.example.com/users");
    }

    #[test]
    fn test_default_content_type_is_declared() {
        let client = client(StubTransport::status(200));
        assert_eq!(
            client.default_headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_constructor_headers_can_override_content_type() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/xml"));
        let client = ApiClient::new(StubTransport::status(200), "https://a.example", headers);
        assert_eq!(
            client.default_headers().get(CONTENT_TYPE).unwrap(),
            "application/xml"
        );
    }

    #[test]
    fn test_set_headers_merge_preserves_unrelated_keys() {
        let mut client = client(StubTransport::status(200));

        let mut first = HeaderMap::new();
        first.insert(
            HeaderName::from_static("x-first"),
            HeaderValue::from_static("1"),
        );
        client.set_headers(first, false);

        let mut second = HeaderMap::new();
        second.insert(
            HeaderName::from_static("x-second"),
            HeaderValue::from_static("2"),
        );
        client.set_headers(second, false);

        assert_eq!(client.default_headers().get("x-first").unwrap(), "1");
        assert_eq!(client.default_headers().get("x-second").unwrap(), "2");
        assert!(client.default_headers().contains_key(CONTENT_TYPE));
    }

    #[test]
    fn test_set_headers_replace_discards_previous_keys() {
        let mut client = client(StubTransport::status(200));

        let mut replacement = HeaderMap::new();
        replacement.insert(
            HeaderName::from_static("x-only"),
            HeaderValue::from_static("yes"),
        );
        client.set_headers(replacement, true);

        assert_eq!(client.default_headers().len(), 1);
        assert_eq!(client.default_headers().get("x-only").unwrap(), "yes");
        assert!(!client.default_headers().contains_key(CONTENT_TYPE));
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_http_error() {
        let client = client(StubTransport::status(404));
        let err = client
            .get("missing", RequestOptions::default())
            .await
            .unwrap_err();
        match err {
            VicunaError::Http { status, reason } => {
                assert_eq!(status, 404);
                assert_eq!(reason, "Not Found");
            }
            other => panic!("expected an HTTP error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_json_content_type_decodes_structured() {
        let client = client(StubTransport::json(r#"{"ok":true}"#));
        let payload = client.get("status", RequestOptions::default()).await.unwrap();
        assert_eq!(payload, Payload::Json(json!({"ok": true})));
    }

    #[tokio::test]
    async fn test_other_content_type_decodes_text() {
        let client = client(StubTransport::text("pong"));
        let payload = client.get("ping", RequestOptions::default()).await.unwrap();
        assert_eq!(payload, Payload::Text("pong".to_string()));
    }

    #[tokio::test]
    async fn test_per_call_headers_win_over_defaults() {
        let stub = StubTransport::json("{}");
        let client = ApiClient::new(stub, "https://api.example.com", HeaderMap::new());

        let mut options = RequestOptions::default();
        options
            .headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("text/csv"));
        client.get("export", options).await.unwrap();

        let sent = client.transport.last_headers();
        assert_eq!(sent.get(CONTENT_TYPE).unwrap(), "text/csv");
    }

    #[tokio::test]
    async fn test_post_serializes_data_as_json_body() {
        let stub = StubTransport::json("{}");
        let client = ApiClient::new(stub, "https://api.example.com", HeaderMap::new());

        client
            .post("orders", &json!({"symbol": "AAPL"}), RequestOptions::default())
            .await
            .unwrap();

        let sent = client.transport.last_request();
        assert_eq!(sent.method, Method::POST);
        assert_eq!(sent.body.unwrap(), r#"{"symbol":"AAPL"}"#.as_bytes());
    }

    #[tokio::test]
    async fn test_delete_fixes_the_method() {
        let stub = StubTransport::json("{}");
        let client = ApiClient::new(stub, "https://api.example.com", HeaderMap::new());

        client.delete("orders/1", RequestOptions::default()).await.unwrap();
        assert_eq!(client.transport.last_request().method, Method::DELETE);
    }

    #[tokio::test]
    async fn test_request_reaches_the_resolved_url() {
        let stub = StubTransport::json("{}");
        let client = ApiClient::new(stub, "https://api.example.com/", HeaderMap::new());

        client.get("/v2/stocks", RequestOptions::default()).await.unwrap();
        assert_eq!(
            client.transport.last_url(),
            "https://api.example.com/v2/stocks"
        );
    }

    #[test]
    fn test_payload_accessors() {
        let payload = Payload::Json(json!({"a": 1}));
        assert!(payload.as_json().is_some());
        assert_eq!(payload.clone().into_text(), None);
        assert_eq!(payload.into_json(), Some(json!({"a": 1})));

        let text = Payload::Text("hello".to_string());
        assert!(text.as_json().is_none());
        assert_eq!(text.into_text(), Some("hello".to_string()));
    }
}
