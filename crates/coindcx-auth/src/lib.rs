//! Credentials and request signing for the CoinDCX API
//!
//! Authenticated CoinDCX endpoints take a JSON body carrying a millisecond
//! `timestamp`. The body is serialized once, signed with HMAC-SHA256 keyed by
//! the API secret, and those exact bytes are sent alongside the
//! `X-AUTH-APIKEY` and `X-AUTH-SIGNATURE` headers.
//!
//! # Example
//!
//! ```
//! use coindcx_auth::{Credentials, SignedEnvelope};
//! use serde_json::{json, Map, Value};
//!
//! let creds = Credentials::new("my_key", "my_secret");
//!
//! let mut body = Map::new();
//! body.insert("market".to_string(), json!("SNTBTC"));
//!
//! let envelope = SignedEnvelope::seal(&creds, body, 1_700_000_000_000).unwrap();
//! assert_eq!(envelope.body_str(), r#"{"market":"SNTBTC","timestamp":1700000000000}"#);
//! assert_eq!(envelope.signature().len(), 64);
//! ```

mod credentials;
mod envelope;
mod error;

pub use credentials::{hmac_sha256_hex, timestamp_ms, Credentials, API_KEY_ENV, API_SECRET_ENV};
pub use envelope::{SignedEnvelope, TIMESTAMP_FIELD};
pub use error::{AuthError, AuthResult};
