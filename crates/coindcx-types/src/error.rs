//! Error types for wire value normalization

use thiserror::Error;

/// Errors raised while normalizing request values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypesError {
    /// Raw string is not one of the values the field accepts
    #[error("invalid value '{value}' for {field}, expected one of: {expected}")]
    UnknownVariant {
        /// Field being normalized (e.g. "side")
        field: &'static str,
        /// Rejected raw value
        value: String,
        /// Comma separated list of accepted values
        expected: String,
    },
}

/// Result type alias for type-level operations
pub type TypesResult<T> = Result<T, TypesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TypesError::UnknownVariant {
            field: "side",
            value: "hold".to_string(),
            expected: "buy, sell".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("hold"));
        assert!(msg.contains("buy, sell"));
    }
}
