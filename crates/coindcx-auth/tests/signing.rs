//! Signing behaviour through the public API

use coindcx_auth::{hmac_sha256_hex, AuthError, Credentials, SignedEnvelope};
use serde_json::{json, Map, Value};

fn body(pairs: &[(&str, Value)]) -> Map<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[test]
fn envelope_signature_matches_standalone_hmac() {
    let creds = Credentials::new("key", "secret");
    let envelope = SignedEnvelope::seal(
        &creds,
        body(&[("side", json!("buy")), ("total_quantity", json!(400))]),
        1_700_000_000_000,
    )
    .unwrap();

    assert_eq!(
        envelope.body_str(),
        r#"{"side":"buy","total_quantity":400,"timestamp":1700000000000}"#
    );
    assert_eq!(envelope.signature(), hmac_sha256_hex(b"secret", envelope.body()));
    assert_eq!(envelope.signature(), creds.sign(envelope.body()).unwrap());
}

#[test]
fn same_input_same_bytes() {
    let creds = Credentials::new("key", "secret");
    let make = || {
        SignedEnvelope::seal(&creds, body(&[("market", json!("SNTBTC"))]), 42)
            .unwrap()
            .into_parts()
    };
    assert_eq!(make(), make());
}

#[test]
fn different_secrets_differ() {
    let a = SignedEnvelope::seal(&Credentials::new("key", "one"), Map::new(), 1).unwrap();
    let b = SignedEnvelope::seal(&Credentials::new("key", "two"), Map::new(), 1).unwrap();
    assert_eq!(a.body(), b.body());
    assert_ne!(a.signature(), b.signature());
}

#[test]
fn key_without_secret_cannot_sign() {
    let creds = Credentials::from_parts(Some("key".into()), None);
    assert!(!creds.is_complete());
    assert!(matches!(
        SignedEnvelope::seal(&creds, Map::new(), 1),
        Err(AuthError::MissingSecret)
    ));
}

#[test]
fn debug_never_shows_secret() {
    let creds = Credentials::new("abcdefgh", "super_secret_value");
    let rendered = format!("{creds:?}");
    assert!(!rendered.contains("super_secret_value"));
    assert!(!rendered.contains("abcdefgh"));
}
