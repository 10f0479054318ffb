//! Signed request bodies
//!
//! A [`SignedEnvelope`] is the canonical payload of one authenticated call:
//! the compact JSON bytes (with `timestamp` injected when absent) and the
//! signature computed over exactly those bytes. The bytes must be transmitted
//! unmodified; re-serializing the body after signing invalidates the signature.

use serde_json::{Map, Value};
use tracing::trace;

use crate::credentials::Credentials;
use crate::error::{AuthError, AuthResult};

/// Body field carrying the request time in milliseconds
pub const TIMESTAMP_FIELD: &str = "timestamp";

/// Canonical body bytes plus their signature
#[derive(Clone, PartialEq, Eq)]
pub struct SignedEnvelope {
    body: Vec<u8>,
    signature: String,
    timestamp: Option<u64>,
}

impl SignedEnvelope {
    /// Inject the timestamp (if absent), serialize and sign a request body
    ///
    /// # Arguments
    /// * `credentials` - Credentials holding the signing secret
    /// * `body` - Body fields, in wire order
    /// * `now_ms` - Current time in milliseconds, used only when `body` has no timestamp
    ///
    /// # Errors
    /// `AuthError::MissingSecret` if the credentials carry no secret
    pub fn seal(credentials: &Credentials, mut body: Map<String, Value>, now_ms: u64) -> AuthResult<Self> {
        if !body.contains_key(TIMESTAMP_FIELD) {
            body.insert(TIMESTAMP_FIELD.to_string(), Value::from(now_ms));
        }
        let timestamp = body.get(TIMESTAMP_FIELD).and_then(Value::as_u64);

        let bytes = serde_json::to_vec(&body).map_err(|e| AuthError::Serialization(e.to_string()))?;
        let signature = credentials.sign(&bytes)?;

        trace!(len = bytes.len(), "Sealed request body");

        Ok(Self {
            body: bytes,
            signature,
            timestamp,
        })
    }

    /// Exact bytes that were signed and must be sent
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as text (always valid UTF-8, it came from serde_json)
    pub fn body_str(&self) -> &str {
        std::str::from_utf8(&self.body).unwrap_or_default()
    }

    /// Hex signature for the `X-AUTH-SIGNATURE` header
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Timestamp carried by the body, if it is an integer
    pub fn timestamp(&self) -> Option<u64> {
        self.timestamp
    }

    /// Split into body bytes and signature
    pub fn into_parts(self) -> (Vec<u8>, String) {
        (self.body, self.signature)
    }
}

impl std::fmt::Debug for SignedEnvelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedEnvelope")
            .field("body_len", &self.body.len())
            .field("timestamp", &self.timestamp)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::hmac_sha256_hex;
    use serde_json::json;

    fn body(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_timestamp_injected_last() {
        let creds = Credentials::new("key", "secret");
        let env = SignedEnvelope::seal(&creds, body(json!({"side": "buy", "market": "SNTBTC"})), 42).unwrap();

        assert_eq!(env.body_str(), r#"{"side":"buy","market":"SNTBTC","timestamp":42}"#);
        assert_eq!(env.timestamp(), Some(42));
    }

    #[test]
    fn test_existing_timestamp_preserved() {
        let creds = Credentials::new("key", "secret");
        let env = SignedEnvelope::seal(&creds, body(json!({"timestamp": 7, "id": "x"})), 42).unwrap();

        assert_eq!(env.body_str(), r#"{"timestamp":7,"id":"x"}"#);
        assert_eq!(env.timestamp(), Some(7));
    }

    #[test]
    fn test_empty_body_gets_timestamp() {
        let creds = Credentials::new("key", "secret");
        let env = SignedEnvelope::seal(&creds, Map::new(), 1_700_000_000_000).unwrap();
        assert_eq!(env.body_str(), r#"{"timestamp":1700000000000}"#);
    }

    #[test]
    fn test_signature_covers_exact_bytes() {
        let creds = Credentials::new("key", "secret");
        let env = SignedEnvelope::seal(&creds, body(json!({"a": 1})), 5).unwrap();
        assert_eq!(env.signature(), hmac_sha256_hex(b"secret", env.body()));
    }

    #[test]
    fn test_sealing_is_byte_stable() {
        let creds = Credentials::new("key", "secret");
        let make = || body(json!({"order": {"pair": "B-BTC_USDT", "price": 0.1}, "page": 1}));

        let first = SignedEnvelope::seal(&creds, make(), 99).unwrap();
        let second = SignedEnvelope::seal(&creds, make(), 99).unwrap();
        assert_eq!(first, second);
        assert!(!first.body_str().contains(' '));
    }

    #[test]
    fn test_missing_secret() {
        let creds = Credentials::from_parts(Some("key".to_string()), None);
        let err = SignedEnvelope::seal(&creds, Map::new(), 1).unwrap_err();
        assert_eq!(err, AuthError::MissingSecret);
    }

    #[test]
    fn test_debug_hides_body() {
        let creds = Credentials::new("key", "secret");
        let env = SignedEnvelope::seal(&creds, body(json!({"secret_field": 1})), 1).unwrap();
        assert!(!format!("{:?}", env).contains("secret_field"));
    }
}
