//! Error types for the Immify application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Immify application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
///
/// The `Auth` and `DataAccess` variants display the collaborator's message
/// verbatim: whatever the hosted backend reports is what the user sees.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ImmifyError {
    /// Authentication failure reported by the auth provider.
    #[error("{0}")]
    Auth(String),

    /// Insert/query failure reported by the table storage backend.
    #[error("{0}")]
    DataAccess(String),

    /// Inference endpoint failure (transport error or non-2xx status).
    /// Non-2xx responses carry the status code; the body is not inspected.
    #[error("Advisor request failed: {message}")]
    Agent {
        status_code: Option<u16>,
        message: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ImmifyError {
    /// Creates an Auth error carrying the provider's message.
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Creates a DataAccess error carrying the backend's message.
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates an Agent error without a status code (transport failure).
    pub fn agent_transport(message: impl Into<String>) -> Self {
        Self::Agent {
            status_code: None,
            message: message.into(),
        }
    }

    /// Creates an Agent error from a non-2xx HTTP status.
    pub fn agent_status(status_code: u16) -> Self {
        Self::Agent {
            status_code: Some(status_code),
            message: format!("endpoint returned HTTP {status_code}"),
        }
    }

    /// Creates a Config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this is an inference endpoint error.
    pub fn is_agent(&self) -> bool {
        matches!(self, Self::Agent { .. })
    }
}

impl From<std::io::Error> for ImmifyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ImmifyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ImmifyError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, ImmifyError>`.
pub type Result<T> = std::result::Result<T, ImmifyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_error_displays_provider_message_verbatim() {
        let err = ImmifyError::auth("Invalid login credentials");
        assert_eq!(err.to_string(), "Invalid login credentials");
    }

    #[test]
    fn data_access_error_displays_backend_message_verbatim() {
        let err = ImmifyError::data_access("duplicate key value violates unique constraint");
        assert_eq!(
            err.to_string(),
            "duplicate key value violates unique constraint"
        );
    }

    #[test]
    fn agent_status_error_records_the_code() {
        let err = ImmifyError::agent_status(500);
        assert!(err.is_agent());
        match err {
            ImmifyError::Agent { status_code, .. } => assert_eq!(status_code, Some(500)),
            _ => unreachable!(),
        }
    }
}
