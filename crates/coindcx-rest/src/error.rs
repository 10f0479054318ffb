//! Error types for REST API operations

use coindcx_auth::AuthError;
use coindcx_types::TypesError;
use serde_json::Value;

use crate::transport::TransportError;

/// Body of a failed HTTP response
///
/// Always keeps the raw text; `json` is set when the text parsed as JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorBody {
    text: String,
    json: Option<Value>,
}

impl ErrorBody {
    /// Non-JSON response body
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            json: None,
        }
    }

    /// JSON response body with the text it was parsed from
    pub fn json(text: impl Into<String>, json: Value) -> Self {
        Self {
            text: text.into(),
            json: Some(json),
        }
    }

    /// Raw response text
    pub fn as_text(&self) -> &str {
        &self.text
    }

    /// Parsed JSON, if the body was JSON
    pub fn as_json(&self) -> Option<&Value> {
        self.json.as_ref()
    }
}

/// Stable names for each error kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Authentication,
    Request,
    RateLimited,
    Api,
    InvalidOrder,
    InvalidParameter,
    Serialization,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::Request => "request",
            Self::RateLimited => "rate_limited",
            Self::Api => "api",
            Self::InvalidOrder => "invalid_order",
            Self::InvalidParameter => "invalid_parameter",
            Self::Serialization => "serialization",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// Missing credentials for an authenticated endpoint, or signing failed
    #[error("authentication error: {0}")]
    Authentication(#[from] AuthError),

    /// Transport failure (DNS, connection, timeout)
    #[error("request failed: {0}")]
    Request(#[from] TransportError),

    /// HTTP 429
    #[error("[{status}] rate limit exceeded")]
    RateLimited {
        /// HTTP status code
        status: u16,
        /// Raw response text
        body: String,
    },

    /// Any other non-success response
    #[error("[{status}] {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Best-effort human readable message
        message: String,
        /// Response body
        body: ErrorBody,
    },

    /// Order rejected client-side before dispatch
    #[error("invalid order: {0}")]
    InvalidOrder(String),

    /// Unknown enum value or unusable argument
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Failed to convert a JSON value
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<TypesError> for RestError {
    fn from(err: TypesError) -> Self {
        Self::InvalidParameter(err.to_string())
    }
}

impl RestError {
    /// Kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Authentication(_) => ErrorKind::Authentication,
            Self::Request(_) => ErrorKind::Request,
            Self::RateLimited { .. } => ErrorKind::RateLimited,
            Self::Api { .. } => ErrorKind::Api,
            Self::InvalidOrder(_) => ErrorKind::InvalidOrder,
            Self::InvalidParameter(_) => ErrorKind::InvalidParameter,
            Self::Serialization(_) => ErrorKind::Serialization,
        }
    }

    /// HTTP status code, for errors produced from a response
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::RateLimited { status, .. } | Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response text, for errors produced from a response
    pub fn body_text(&self) -> Option<&str> {
        match self {
            Self::RateLimited { body, .. } => Some(body),
            Self::Api { body, .. } => Some(body.as_text()),
            _ => None,
        }
    }

    /// Check if this error indicates rate limiting
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// Check if a retry could succeed
    ///
    /// The client itself never retries; this only classifies.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Request(_))
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let rate_limited = RestError::RateLimited {
            status: 429,
            body: "slow down".to_string(),
        };
        assert!(rate_limited.is_rate_limited());
        assert!(rate_limited.is_retryable());
        assert_eq!(rate_limited.status_code(), Some(429));
        assert_eq!(rate_limited.body_text(), Some("slow down"));

        let auth = RestError::Authentication(AuthError::MissingCredentials);
        assert!(!auth.is_retryable());
        assert_eq!(auth.kind(), ErrorKind::Authentication);
        assert_eq!(auth.status_code(), None);

        let timeout = RestError::Request(TransportError::Timeout("30s".into()));
        assert!(timeout.is_retryable());
    }

    #[test]
    fn test_api_error_display() {
        let err = RestError::Api {
            status: 404,
            message: "not found".to_string(),
            body: ErrorBody::json(r#"{"message":"not found"}"#, serde_json::json!({"message": "not found"})),
        };
        assert_eq!(err.to_string(), "[404] not found");
        assert_eq!(err.body_text(), Some(r#"{"message":"not found"}"#));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_unknown_variant_is_invalid_parameter() {
        let err: RestError = TypesError::UnknownVariant {
            field: "side",
            value: "hold".to_string(),
            expected: "buy, sell".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
        assert!(err.to_string().contains("hold"));
    }
}
