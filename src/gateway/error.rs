//! Gateway-specific error types.

use crate::entity::WireError;

/// Errors that can occur while talking to the REST gateway.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The request never produced a response
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The gateway rejected the bearer token
    #[error("Unauthorized")]
    Unauthorized,

    /// The record collides with an existing one
    #[error("Conflict: {}", .message.as_deref().unwrap_or("record already exists"))]
    Conflict { message: Option<String> },

    /// Non-success HTTP status
    #[error("HTTP error (status {status}): {}", .message.as_deref().unwrap_or("no message"))]
    Http { status: u16, message: Option<String> },

    /// A success status carrying `success: false`
    #[error("Request rejected: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected {
        status_code: Option<u16>,
        message: Option<String>,
    },

    /// Failed to deserialize the response body
    #[error("Failed to deserialize gateway response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// Failed to map a record into the view model
    #[error(transparent)]
    Wire(#[from] WireError),
}

impl GatewayError {
    /// Returns whether the session must be torn down.
    ///
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, GatewayError::Unauthorized)
    }

    /// Returns whether the failure is a uniqueness conflict.
    ///
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            GatewayError::Conflict { .. }
                | GatewayError::Rejected {
                    status_code: Some(409),
                    ..
                }
        )
    }

    /// Returns the message supplied by the gateway, if any.
    ///
    pub fn server_message(&self) -> Option<&str> {
        match self {
            GatewayError::Conflict { message }
            | GatewayError::Http { message, .. }
            | GatewayError::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}
