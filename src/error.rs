//! Error types for the safety engine.

use thiserror::Error;

/// Safety engine error type.
#[derive(Debug, Error)]
pub enum SafetyError {
    /// Configuration failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A blocklist pattern entry failed to compile.
    #[error("Invalid pattern for term '{term}': {source}")]
    InvalidPattern {
        /// The offending term.
        term: String,
        /// The underlying regex error.
        #[source]
        source: regex::Error,
    },

    /// HTTP transport error from the external moderation endpoint.
    #[error("Moderation request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The external moderation endpoint returned an unusable payload.
    #[error("Invalid moderation response: {0}")]
    InvalidResponse(String),

    /// The external moderation call exceeded its deadline.
    #[error("Moderation request timed out after {0}ms")]
    Timeout(u64),
}

/// Result type for safety engine operations.
pub type Result<T> = std::result::Result<T, SafetyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = SafetyError::InvalidConfig("minimum_safety_score out of range".to_string());
        assert!(err.to_string().contains("minimum_safety_score"));

        let err = SafetyError::Timeout(3000);
        assert!(err.to_string().contains("3000"));
    }

    #[test]
    fn invalid_pattern_carries_term() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = SafetyError::InvalidPattern {
            term: "(".to_string(),
            source,
        };
        assert!(err.to_string().contains("Invalid pattern"));
    }
}
