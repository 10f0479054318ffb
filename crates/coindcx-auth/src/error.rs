//! Error types for authentication operations

/// Errors that can occur during authentication
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Authenticated request attempted without both key and secret
    #[error("API key and secret are required for authenticated endpoints")]
    MissingCredentials,

    /// Signing attempted without a secret
    #[error("API secret is required to sign requests")]
    MissingSecret,

    /// Body could not be serialized for signing
    #[error("Failed to serialize request body: {0}")]
    Serialization(String),

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
