//! Error types for the GenLearn client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire GenLearn client.
///
/// Errors are categorised by where they surface: the HTTP boundary
/// (`Unauthorized`, `Api`, `Network`, `UnexpectedResponseShape`), the
/// local storage layer (`Io`, `Serialization`, `Config`) and the session
/// flow (`Validation`, `InvalidTransition`, `Cancelled`).
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GenlearnError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound { entity_type: String, id: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input rejected before it reached the backend
    #[error("Validation error: {0}")]
    Validation(String),

    /// The backend answered 401; the stored token has been cleared
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Non-success HTTP status other than 401
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Transport failure (connect, timeout, body read)
    #[error("Network error: {0}")]
    Network(String),

    /// The response body did not match any accepted shape
    #[error("Unexpected response shape from {endpoint}: expected {expected}")]
    UnexpectedResponseShape { endpoint: String, expected: String },

    /// An operation was invoked in a phase that does not allow it
    #[error("Cannot {action} while in {from} phase")]
    InvalidTransition { from: String, action: String },

    /// The owning scope was cancelled before the operation finished
    #[error("Operation cancelled: {0}")]
    Cancelled(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GenlearnError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Creates an UnexpectedResponseShape error
    pub fn unexpected_shape(endpoint: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::UnexpectedResponseShape {
            endpoint: endpoint.into(),
            expected: expected.into(),
        }
    }

    /// Creates an InvalidTransition error
    pub fn invalid_transition(from: impl ToString, action: impl Into<String>) -> Self {
        Self::InvalidTransition {
            from: from.to_string(),
            action: action.into(),
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a 401 from the backend
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Check if this is an InvalidTransition error
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::InvalidTransition { .. })
    }

    /// Whether offering the user a manual "try again" makes sense.
    ///
    /// True for transport failures and 5xx responses. Nothing in the client
    /// retries automatically; this only drives the presentation layer.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for GenlearnError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for GenlearnError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for GenlearnError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for GenlearnError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, GenlearnError>`.
pub type Result<T> = std::result::Result<T, GenlearnError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(GenlearnError::Network("connection refused".into()).is_retryable());
        assert!(
            GenlearnError::Api {
                status: 503,
                message: "busy".into()
            }
            .is_retryable()
        );
        assert!(
            !GenlearnError::Api {
                status: 404,
                message: "Session not found".into()
            }
            .is_retryable()
        );
        assert!(
            !GenlearnError::Unauthorized {
                message: "expired".into()
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_invalid_transition_message() {
        let err = GenlearnError::invalid_transition("story", "submit an answer");
        assert!(err.is_invalid_transition());
        assert_eq!(err.to_string(), "Cannot submit an answer while in story phase");
    }

    #[test]
    fn test_json_error_conversion() {
        let err: GenlearnError = serde_json::from_str::<u32>("\"x\"").unwrap_err().into();
        assert!(err.is_serialization());
    }
}
