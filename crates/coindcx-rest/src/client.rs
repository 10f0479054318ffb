//! Main REST client implementation

use coindcx_auth::Credentials;
use coindcx_types::{CandleInterval, IntoWire};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::endpoints::{FuturesEndpoints, MarginEndpoints, MarketEndpoints, SpotEndpoints};
use crate::error::{RestError, RestResult};
use crate::executor::{Clock, RequestDescriptor, RequestExecutor};
use crate::transport::{HttpTransport, ReqwestTransport};

/// Primary API host (public and authenticated endpoints)
pub const API_BASE_URL: &str = "https://api.coindcx.com";

/// Public market data host
pub const PUBLIC_BASE_URL: &str = "https://public.coindcx.com";

/// Default request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const DEFAULT_USER_AGENT: &str = concat!("coindcx-rest/", env!("CARGO_PKG_VERSION"));

/// CoinDCX REST API client
///
/// Provides access to both public and authenticated endpoints. Cloning is
/// cheap and clones share one connection pool.
///
/// # Example
///
/// ```no_run
/// use coindcx_rest::{CoinDcxClient, ClientConfig, Credentials};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = CoinDcxClient::new()?;
///     let markets = client.get_markets().await?;
///
///     // With authentication for account and trading endpoints
///     let creds = Credentials::from_env()?;
///     let auth_client = CoinDcxClient::with_config(ClientConfig::new().with_credentials(creds))?;
///     let balances = auth_client.get_balances().await?;
///
///     auth_client.close();
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct CoinDcxClient {
    executor: RequestExecutor,
}

impl CoinDcxClient {
    /// Create a client without credentials
    ///
    /// Only public endpoints will succeed.
    pub fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with credentials
    pub fn with_credentials(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(ClientConfig::new().with_credentials(credentials))
    }

    /// Create a client with custom configuration
    ///
    /// # Errors
    /// - `RestError::InvalidParameter` if the timeout is zero
    /// - `RestError::Request` if the HTTP client cannot be created
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        config.validate()?;
        let user_agent = config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        let transport = ReqwestTransport::new(user_agent)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client on top of a custom transport
    ///
    /// # Errors
    /// `RestError::InvalidParameter` if the timeout is zero
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> RestResult<Self> {
        config.validate()?;
        let mut executor = RequestExecutor::new(
            transport,
            config.credentials,
            config.base_url,
            config.public_url,
            Duration::from_secs(config.timeout_secs),
        );
        if let Some(clock) = config.clock {
            executor = executor.with_clock(clock);
        }

        info!(
            authenticated = executor.credentials().is_complete(),
            "Created CoinDCX REST client"
        );

        Ok(Self { executor })
    }

    /// Check if the client has both halves of its credentials
    pub fn has_credentials(&self) -> bool {
        self.executor.credentials().is_complete()
    }

    /// The underlying request executor
    pub fn executor(&self) -> &RequestExecutor {
        &self.executor
    }

    /// Execute an arbitrary request
    pub async fn request(&self, descriptor: RequestDescriptor) -> RestResult<Value> {
        self.executor.execute(descriptor).await
    }

    /// Release the connection pool
    ///
    /// Dropping the client has the same effect; this makes the release
    /// explicit at the call site.
    pub fn close(self) {
        info!("Closed CoinDCX REST client");
    }

    // ========================================================================
    // Endpoint groups
    // ========================================================================

    /// Public market data endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(&self.executor)
    }

    /// Spot account and order endpoints
    pub fn spot(&self) -> SpotEndpoints<'_> {
        SpotEndpoints::new(&self.executor)
    }

    /// Margin trading endpoints
    pub fn margin(&self) -> MarginEndpoints<'_> {
        MarginEndpoints::new(&self.executor)
    }

    /// Futures data, order and position endpoints
    pub fn futures(&self) -> FuturesEndpoints<'_> {
        FuturesEndpoints::new(&self.executor)
    }

    // ========================================================================
    // Shortcuts
    // ========================================================================

    /// Get ticker for all markets
    pub async fn get_ticker(&self) -> RestResult<Value> {
        self.market().get_ticker().await
    }

    /// Get the list of active market symbols
    pub async fn get_markets(&self) -> RestResult<Value> {
        self.market().get_markets().await
    }

    /// Get details for every market
    pub async fn get_markets_details(&self) -> RestResult<Value> {
        self.market().get_markets_details().await
    }

    /// Get recent trades for a pair
    pub async fn get_trades(&self, pair: &str, limit: Option<u32>) -> RestResult<Value> {
        self.market().get_trades(pair, limit).await
    }

    /// Get the orderbook for a pair
    pub async fn get_orderbook(&self, pair: &str) -> RestResult<Value> {
        self.market().get_orderbook(pair).await
    }

    /// Get candlesticks for a pair
    pub async fn get_candles(
        &self,
        pair: &str,
        interval: impl IntoWire<CandleInterval>,
        start_time: Option<u64>,
        end_time: Option<u64>,
        limit: Option<u32>,
    ) -> RestResult<Value> {
        self.market()
            .get_candles(pair, interval, start_time, end_time, limit)
            .await
    }

    /// Get account balances
    pub async fn get_balances(&self) -> RestResult<Value> {
        self.spot().get_balances().await
    }

    /// Get account information
    pub async fn get_user_info(&self) -> RestResult<Value> {
        self.spot().get_user_info().await
    }
}

impl std::fmt::Debug for CoinDcxClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinDcxClient")
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API credentials (may be empty)
    pub credentials: Credentials,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Primary host
    pub base_url: String,
    /// Public market data host
    pub public_url: String,
    /// Custom user agent
    pub user_agent: Option<String>,
    /// Clock for body timestamps (system time when unset)
    pub clock: Option<Clock>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: Credentials::none(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            base_url: API_BASE_URL.to_string(),
            public_url: PUBLIC_BASE_URL.to_string(),
            user_agent: None,
            clock: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Override the primary host
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Override the public data host
    pub fn with_public_url(mut self, url: impl Into<String>) -> Self {
        self.public_url = url.into();
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Use a fixed or custom clock for body timestamps
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Check the settings before a client is built
    pub fn validate(&self) -> RestResult<()> {
        if self.timeout_secs == 0 {
            return Err(RestError::InvalidParameter(
                "timeout must be at least 1 second".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use coindcx_auth::AuthError;

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::new()
            .with_timeout(60)
            .with_user_agent("test-agent")
            .with_base_url("http://localhost:8080");

        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.user_agent, Some("test-agent".to_string()));
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.public_url, PUBLIC_BASE_URL);
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.base_url, API_BASE_URL);
        assert!(!config.credentials.is_complete());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = ClientConfig::new().with_timeout(0);
        assert!(matches!(config.validate(), Err(RestError::InvalidParameter(_))));

        let mock = Arc::new(MockTransport::new());
        let err = CoinDcxClient::with_transport(config.clone(), mock).unwrap_err();
        assert!(err.to_string().contains("at least 1 second"));
        assert!(matches!(
            CoinDcxClient::with_config(config),
            Err(RestError::InvalidParameter(_))
        ));
        assert!(ClientConfig::new().with_timeout(1).validate().is_ok());
    }

    #[test]
    fn test_client_without_credentials() {
        let client = CoinDcxClient::with_transport(ClientConfig::new(), Arc::new(MockTransport::new())).unwrap();
        assert!(!client.has_credentials());
        assert!(format!("{:?}", client).contains("has_credentials: false"));
    }

    #[tokio::test]
    async fn test_auth_required_error() {
        let mock = Arc::new(MockTransport::new());
        let client = CoinDcxClient::with_transport(ClientConfig::new(), mock.clone()).unwrap();

        let result = client.get_balances().await;
        assert!(matches!(
            result,
            Err(RestError::Authentication(AuthError::MissingCredentials))
        ));
        assert_eq!(mock.call_count(), 0);
    }

    #[test]
    fn test_real_transport_builds() {
        let client = CoinDcxClient::new().unwrap();
        assert_eq!(client.executor().timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        client.close();
    }
}
