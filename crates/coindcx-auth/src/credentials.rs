//! Authentication credentials for the CoinDCX API
//!
//! Implements hex-encoded HMAC-SHA256 signing as required by CoinDCX's
//! authenticated endpoints.
//!
//! # Security
//!
//! The API secret is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretBox};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "COINDCX_API_KEY";

/// Environment variable holding the API secret
pub const API_SECRET_ENV: &str = "COINDCX_API_SECRET";

/// API credentials for authenticated requests
///
/// Either half may be absent; a client built with incomplete credentials can
/// still call public endpoints. Credentials are immutable once built, so
/// rotating keys means building a new client.
pub struct Credentials {
    /// API key (sent verbatim in `X-AUTH-APIKEY`)
    api_key: Option<String>,
    /// API secret bytes (zeroized on drop)
    api_secret: Option<SecretBox<Vec<u8>>>,
}

impl Credentials {
    /// Create credentials from an API key and secret
    pub fn new(api_key: impl Into<String>, api_secret: impl AsRef<str>) -> Self {
        Self::from_parts(Some(api_key.into()), Some(api_secret.as_ref().to_string()))
    }

    /// Credentials with neither key nor secret (public endpoints only)
    pub fn none() -> Self {
        Self {
            api_key: None,
            api_secret: None,
        }
    }

    /// Create credentials from optional parts
    ///
    /// Empty strings are treated the same as missing values.
    pub fn from_parts(api_key: Option<String>, api_secret: Option<String>) -> Self {
        let api_key = api_key.filter(|k| !k.is_empty());
        let api_secret = api_secret
            .filter(|s| !s.is_empty())
            .map(|s| SecretBox::new(Box::new(s.into_bytes())));

        Self { api_key, api_secret }
    }

    /// Create credentials from environment variables
    ///
    /// Reads `COINDCX_API_KEY` and `COINDCX_API_SECRET` from the environment.
    pub fn from_env() -> AuthResult<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(API_KEY_ENV.to_string()))?;
        let api_secret = std::env::var(API_SECRET_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(API_SECRET_ENV.to_string()))?;

        Ok(Self::new(api_key, api_secret))
    }

    /// Get the API key, if configured
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Check whether a secret is configured
    pub fn has_secret(&self) -> bool {
        self.api_secret.is_some()
    }

    /// Check whether both key and secret are configured
    pub fn is_complete(&self) -> bool {
        self.api_key.is_some() && self.api_secret.is_some()
    }

    /// Sign a payload with the configured secret
    ///
    /// # Returns
    /// Lowercase hex HMAC-SHA256 digest of `payload`
    ///
    /// # Errors
    /// `AuthError::MissingSecret` if no secret is configured
    pub fn sign(&self, payload: &[u8]) -> AuthResult<String> {
        let secret = self.api_secret.as_ref().ok_or(AuthError::MissingSecret)?;
        Ok(hmac_sha256_hex(secret.expose_secret(), payload))
    }
}

/// Compute the lowercase hex HMAC-SHA256 of `payload` keyed by `secret`
pub fn hmac_sha256_hex(secret: &[u8], payload: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Current time in milliseconds since the Unix epoch
pub fn timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

impl Default for Credentials {
    fn default() -> Self {
        Self::none()
    }
}

impl Clone for Credentials {
    /// Clone credentials (creates new SecretBox with same content)
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            api_secret: self
                .api_secret
                .as_ref()
                .map(|s| SecretBox::new(Box::new(s.expose_secret().clone()))),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let api_key = self
            .api_key
            .as_ref()
            .map(|k| format!("{}...", k.chars().take(4).collect::<String>()));

        f.debug_struct("Credentials")
            .field("api_key", &api_key)
            .field("api_secret", &self.api_secret.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hmac_known_vector() {
        // RFC 4231, test case 2
        let sig = hmac_sha256_hex(b"Jefe", b"what do ya want for nothing?");
        assert_eq!(
            sig,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_signing_consistency() {
        let creds = Credentials::new("key", "secret");
        let payload = br#"{"timestamp":1616492376594}"#;

        let first = creds.sign(payload).unwrap();
        let second = creds.sign(payload).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_signature_changes_with_payload_or_secret() {
        let creds = Credentials::new("key", "secret");
        let base = creds.sign(b"{\"a\":1}").unwrap();

        assert_ne!(base, creds.sign(b"{\"a\":2}").unwrap());
        assert_ne!(base, Credentials::new("key", "secres").sign(b"{\"a\":1}").unwrap());
    }

    #[test]
    fn test_sign_without_secret_fails() {
        let creds = Credentials::from_parts(Some("key".to_string()), None);
        assert_eq!(creds.sign(b"{}"), Err(AuthError::MissingSecret));
        assert!(!creds.is_complete());
    }

    #[test]
    fn test_empty_parts_are_absent() {
        let creds = Credentials::from_parts(Some(String::new()), Some(String::new()));
        assert_eq!(creds.api_key(), None);
        assert!(!creds.has_secret());
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let creds = Credentials::new("test_api_key", "super_secret_value");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("super_secret_value"));
        assert!(!debug.contains("test_api_key"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_clone_keeps_secret() {
        let creds = Credentials::new("key", "secret");
        let cloned = creds.clone();
        assert_eq!(creds.sign(b"x").unwrap(), cloned.sign(b"x").unwrap());
    }

    #[test]
    fn test_timestamp_is_milliseconds() {
        // Anything after 2020 in ms has 13 digits
        let ts = timestamp_ms();
        assert!(ts > 1_577_836_800_000);
        assert_eq!(ts.to_string().len(), 13);
    }
}
