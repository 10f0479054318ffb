//! HTTP transport abstraction
//!
//! The executor talks to the network through [`HttpTransport`], so request
//! construction and response handling can be tested without real HTTP calls.
//! [`ReqwestTransport`] is the production implementation; [`MockTransport`]
//! records requests and replays canned responses.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

/// Transport layer errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Request did not complete within its timeout
    #[error("request timed out: {0}")]
    Timeout(String),

    /// DNS failure, refused or reset connection
    #[error("connection failed: {0}")]
    Connect(String),

    /// Any other transport failure (TLS, body read, client setup)
    #[error("{0}")]
    Other(String),
}

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Upper-case method name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully assembled HTTP request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute URL without query string
    pub url: String,
    /// Header name/value pairs
    pub headers: Vec<(String, String)>,
    /// Flattened query pairs, in order
    pub query: Vec<(String, String)>,
    /// Body bytes, sent verbatim
    pub body: Option<Vec<u8>>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl HttpRequest {
    /// Look up a header value (case-insensitive name)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Body as text, if present and valid UTF-8
    pub fn body_str(&self) -> Option<&str> {
        self.body.as_deref().and_then(|b| std::str::from_utf8(b).ok())
    }

    /// URL with the url-encoded query appended
    pub fn full_url(&self) -> Result<String, TransportError> {
        if self.query.is_empty() {
            return Ok(self.url.clone());
        }
        let query = serde_urlencoded::to_string(&self.query)
            .map_err(|e| TransportError::Other(format!("query encoding failed: {e}")))?;
        Ok(format!("{}?{query}", self.url))
    }
}

/// Status and body text of an HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for HTTP transport abstraction
///
/// Implementations must be safe to share between concurrent callers; each
/// call is one independent round trip.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Perform one HTTP round trip
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Real transport backed by a pooled `reqwest::Client`
///
/// Cloning shares the underlying connection pool.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with its own connection pool
    pub fn new(user_agent: &str) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| TransportError::Other(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Wrap an existing client
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

/// Render an error and every `source()` below it, outermost first
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    let message = error_chain(&err);
    if err.is_timeout() {
        TransportError::Timeout(message)
    } else if err.is_connect() {
        TransportError::Connect(message)
    } else {
        TransportError::Other(message)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self
            .client
            .request(method, request.full_url()?)
            .timeout(request.timeout);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_reqwest_error)?;

        debug!(status, len = body.len(), "Received response");
        Ok(HttpResponse { status, body })
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport").finish_non_exhaustive()
    }
}

/// Mock transport for testing
///
/// Replays queued responses in order and records every request it was given.
/// Shared through an `Arc`, so a test keeps a handle while the client owns
/// another.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: parking_lot::Mutex<std::collections::VecDeque<Result<HttpResponse, TransportError>>>,
    requests: parking_lot::Mutex<Vec<HttpRequest>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockTransport {
    /// Create a mock with no queued responses
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response
    pub fn push_response(&self, status: u16, body: impl Into<String>) {
        self.responses
            .lock()
            .push_back(Ok(HttpResponse::new(status, body)));
    }

    /// Queue a JSON response
    pub fn push_json(&self, status: u16, body: &serde_json::Value) {
        self.push_response(status, body.to_string());
    }

    /// Queue a transport failure
    pub fn push_error(&self, error: TransportError) {
        self.responses.lock().push_back(Err(error));
    }

    /// Every request sent so far
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    /// The most recent request
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().last().cloned()
    }

    /// Number of requests sent so far
    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().push(request);
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Other("no mock response queued".into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: "https://mock.test/ping".to_string(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            query: Vec::new(),
            body: None,
            timeout: Duration::from_secs(1),
        }
    }

    #[tokio::test]
    async fn test_mock_replays_in_order() {
        let mock = MockTransport::new();
        mock.push_response(200, "first");
        mock.push_error(TransportError::Timeout("slow".into()));

        assert_eq!(mock.send(request()).await.unwrap().body, "first");
        assert!(matches!(
            mock.send(request()).await,
            Err(TransportError::Timeout(_))
        ));
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_without_responses_fails() {
        let mock = MockTransport::new();
        assert!(mock.send(request()).await.is_err());
        assert_eq!(mock.call_count(), 1);
    }

    #[test]
    fn test_full_url_encodes_query() {
        assert_eq!(request().full_url().unwrap(), "https://mock.test/ping");

        let req = HttpRequest {
            query: vec![
                ("pair".to_string(), "B-BTC_USDT".to_string()),
                ("margin_currency_short_name[]".to_string(), "USDT".to_string()),
                ("margin_currency_short_name[]".to_string(), "INR".to_string()),
                ("note".to_string(), "a b&c".to_string()),
            ],
            ..request()
        };
        assert_eq!(
            req.full_url().unwrap(),
            "https://mock.test/ping?pair=B-BTC_USDT\
             &margin_currency_short_name%5B%5D=USDT\
             &margin_currency_short_name%5B%5D=INR\
             &note=a+b%26c"
        );
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let req = request();
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("X-AUTH-APIKEY"), None);
    }

    #[derive(Debug)]
    struct Layer(&'static str, Option<Box<Layer>>);

    impl std::fmt::Display for Layer {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.0)
        }
    }

    impl std::error::Error for Layer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            self.1.as_deref().map(|e| e as &(dyn std::error::Error + 'static))
        }
    }

    #[test]
    fn test_error_chain_includes_causes() {
        let err = Layer(
            "error sending request for url (http://127.0.0.1:9/exchange/ticker)",
            Some(Box::new(Layer(
                "client error (Connect)",
                Some(Box::new(Layer(
                    "tcp connect error",
                    Some(Box::new(Layer("Connection refused (os error 111)", None))),
                ))),
            ))),
        );
        assert_eq!(
            error_chain(&err),
            "error sending request for url (http://127.0.0.1:9/exchange/ticker): \
             client error (Connect): tcp connect error: Connection refused (os error 111)"
        );
    }

    #[test]
    fn test_error_chain_skips_repeated_text() {
        let err = Layer("timed out: operation timed out", Some(Box::new(Layer("operation timed out", None))));
        assert_eq!(error_chain(&err), "timed out: operation timed out");
        assert_eq!(error_chain(&Layer("plain", None)), "plain");
    }

    #[test]
    fn test_success_range() {
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(301, "").is_success());
        assert!(!HttpResponse::new(429, "").is_success());
    }
}
