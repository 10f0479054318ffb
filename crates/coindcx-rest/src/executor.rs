//! Request construction, signing and response interpretation
//!
//! Every endpoint method builds a [`RequestDescriptor`] and hands it to the
//! [`RequestExecutor`], which performs exactly one HTTP round trip:
//!
//! 1. Authenticated requests without a full key/secret pair fail before any I/O.
//! 2. The descriptor's host selects the primary or public base URL.
//! 3. Public requests carry query parameters and no body.
//! 4. Authenticated requests carry a signed JSON body (see [`SignedEnvelope`])
//!    plus the `X-AUTH-APIKEY` and `X-AUTH-SIGNATURE` headers.
//! 5. The response is classified by [`interpret_response`].

use coindcx_auth::{timestamp_ms, AuthError, Credentials, SignedEnvelope};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::error::{ErrorBody, RestError, RestResult};
use crate::query::QueryParams;
use crate::transport::{HttpMethod, HttpRequest, HttpTransport};

/// Source of millisecond timestamps for signed bodies
pub type Clock = fn() -> u64;

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "X-AUTH-APIKEY";

/// Header carrying the body signature
pub const SIGNATURE_HEADER: &str = "X-AUTH-SIGNATURE";

/// Which base URL a request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Host {
    /// `api.coindcx.com`, serves public and authenticated endpoints
    #[default]
    Primary,
    /// `public.coindcx.com`, market data only
    Public,
}

/// Logical description of one API call
///
/// Public requests send `query` as URL parameters; authenticated requests send
/// `body` as signed JSON and ignore `query`.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    method: HttpMethod,
    path: String,
    host: Host,
    authenticated: bool,
    query: QueryParams,
    body: Map<String, Value>,
}

impl RequestDescriptor {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            host: Host::Primary,
            authenticated: false,
            query: QueryParams::new(),
            body: Map::new(),
        }
    }

    /// Public GET request
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Signed POST request
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path).signed()
    }

    /// Target the public market data host
    pub fn on_public_host(mut self) -> Self {
        self.host = Host::Public;
        self
    }

    /// Require authentication
    pub fn signed(mut self) -> Self {
        self.authenticated = true;
        self
    }

    /// Add a scalar query parameter
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.insert(key, value);
        self
    }

    /// Add a query parameter when a value is present
    pub fn query_opt(self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(v) => self.query(key, v),
            None => self,
        }
    }

    /// Add a list query parameter (`key[]=a&key[]=b`)
    pub fn query_list<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.query.insert_list(key, values);
        self
    }

    /// Replace the body
    pub fn body(mut self, body: Map<String, Value>) -> Self {
        self.body = body;
        self
    }

    /// Add a body field
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.body.insert(key.into(), value.into());
        self
    }

    /// Add a body field when a value is present
    pub fn field_opt(self, key: impl Into<String>, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(v) => self.field(key, v),
            None => self,
        }
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn host(&self) -> Host {
        self.host
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn query_params(&self) -> &QueryParams {
        &self.query
    }

    pub fn body_fields(&self) -> &Map<String, Value> {
        &self.body
    }
}

/// Join a base URL and an endpoint path with exactly one `/`
///
/// A path that is already an absolute URL is returned unchanged.
pub fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Classify a response into a decoded payload or a typed error
///
/// In priority order: 429 is `RateLimited`; a non-JSON body is an `Api` error
/// on failure and passed through as a JSON string on success; a JSON body is
/// an `Api` error (message from its `message` field) on failure and returned
/// as-is on success. Success means a 2xx status.
pub fn interpret_response(status: u16, text: String) -> RestResult<Value> {
    if status == 429 {
        return Err(RestError::RateLimited { status, body: text });
    }

    let success = (200..300).contains(&status);

    match serde_json::from_str::<Value>(&text) {
        Err(_) if success => Ok(Value::String(text)),
        Err(_) => Err(RestError::Api {
            status,
            message: format!("HTTP {status}: {text}"),
            body: ErrorBody::text(text),
        }),
        Ok(json) if success => Ok(json),
        Ok(json) => {
            let message = match json.get("message") {
                Some(Value::String(m)) => m.clone(),
                Some(Value::Null) | None => text.clone(),
                Some(other) => other.to_string(),
            };
            Err(RestError::Api {
                status,
                message,
                body: ErrorBody::json(text, json),
            })
        }
    }
}

/// Turns request descriptors into HTTP round trips
///
/// Holds no per-request state, so one executor serves concurrent callers.
#[derive(Clone)]
pub struct RequestExecutor {
    transport: Arc<dyn HttpTransport>,
    credentials: Credentials,
    base_url: String,
    public_url: String,
    timeout: Duration,
    clock: Clock,
}

impl RequestExecutor {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        credentials: Credentials,
        base_url: impl Into<String>,
        public_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            transport,
            credentials,
            base_url: base_url.into(),
            public_url: public_url.into(),
            timeout,
            clock: timestamp_ms,
        }
    }

    /// Use a different clock for body timestamps
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Base URL for a host
    pub fn base_url(&self, host: Host) -> &str {
        match host {
            Host::Primary => &self.base_url,
            Host::Public => &self.public_url,
        }
    }

    /// Assemble the HTTP request for a descriptor without sending it
    ///
    /// # Errors
    /// `RestError::Authentication` if the descriptor is authenticated and the
    /// key or secret is missing.
    pub fn build(&self, descriptor: RequestDescriptor) -> RestResult<HttpRequest> {
        let RequestDescriptor {
            method,
            path,
            host,
            authenticated,
            query,
            body,
        } = descriptor;

        let api_key = match (authenticated, self.credentials.api_key()) {
            (true, Some(key)) if self.credentials.has_secret() => Some(key),
            (true, _) => return Err(AuthError::MissingCredentials.into()),
            (false, _) => None,
        };

        let url = join_url(self.base_url(host), &path);
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];

        let Some(api_key) = api_key else {
            return Ok(HttpRequest {
                method,
                url,
                headers,
                query: query.to_pairs(),
                body: None,
                timeout: self.timeout,
            });
        };

        let envelope = SignedEnvelope::seal(&self.credentials, body, (self.clock)())?;
        let (bytes, signature) = envelope.into_parts();

        headers.push((API_KEY_HEADER.to_string(), api_key.to_string()));
        headers.push((SIGNATURE_HEADER.to_string(), signature));

        Ok(HttpRequest {
            method,
            url,
            headers,
            query: Vec::new(),
            body: Some(bytes),
            timeout: self.timeout,
        })
    }

    /// Execute a request and return the decoded payload
    #[instrument(
        skip(self, descriptor),
        fields(method = %descriptor.method(), path = %descriptor.path(), signed = descriptor.is_authenticated())
    )]
    pub async fn execute(&self, descriptor: RequestDescriptor) -> RestResult<Value> {
        let request = self.build(descriptor)?;
        debug!(url = %request.url, "Sending request");

        let response = self.transport.send(request).await.map_err(|e| {
            warn!(error = %e, "Transport failure");
            RestError::Request(e)
        })?;

        let result = interpret_response(response.status, response.body);
        if let Err(e) = &result {
            warn!(status = response.status, error = %e, "Request failed");
        }
        result
    }

    /// Execute a request and deserialize the payload into `T`
    pub async fn execute_as<T: DeserializeOwned>(&self, descriptor: RequestDescriptor) -> RestResult<T> {
        let value = self.execute(descriptor).await?;
        Ok(serde_json::from_value(value)?)
    }
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("credentials", &self.credentials)
            .field("base_url", &self.base_url)
            .field("public_url", &self.public_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
