//! Failure taxonomy used by the view controllers.
//!
//! Every outcome of a user action that did not succeed is classified into
//! one of these variants. Validation and auth errors are shown inline;
//! request errors are only logged; network and storage errors are reduced
//! to a generic message.

use thiserror::Error;

use crate::api::ApiError;
use crate::auth::StorageError;

/// Generic message shown when no better one is available
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("{field} is required")]
    Validation { field: &'static str },

    #[error("{0}")]
    Auth(String),

    #[error("Request failed with status {status}: {message}")]
    Request { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl ClientError {
    /// Message to show the user, or `None` when the error is only logged.
    pub fn user_message(&self) -> Option<String> {
        match self {
            ClientError::Validation { .. } | ClientError::Auth(_) => Some(self.to_string()),
            ClientError::Request { .. } => None,
            ClientError::Network(_) | ClientError::Storage(_) => Some(UNEXPECTED_ERROR.to_string()),
        }
    }
}

impl From<ApiError> for ClientError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::Status { status, message } => ClientError::Request {
                status,
                message: message.unwrap_or_default(),
            },
            other => ClientError::Network(other.to_string()),
        }
    }
}

impl From<StorageError> for ClientError {
    fn from(e: StorageError) -> Self {
        ClientError::Storage(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_per_kind() {
        let v = ClientError::Validation { field: "Username" };
        assert_eq!(v.user_message().as_deref(), Some("Username is required"));

        let a = ClientError::Auth("Invalid username or password".to_string());
        assert_eq!(a.user_message().as_deref(), Some("Invalid username or password"));

        let r = ClientError::Request { status: 500, message: "boom".to_string() };
        assert_eq!(r.user_message(), None);

        let n = ClientError::Network("connection refused".to_string());
        assert_eq!(n.user_message().as_deref(), Some(UNEXPECTED_ERROR));

        let s = ClientError::Storage("disk full".to_string());
        assert_eq!(s.user_message().as_deref(), Some(UNEXPECTED_ERROR));
    }

    #[test]
    fn test_from_api_error() {
        let e: ClientError = ApiError::Status { status: 404, message: None }.into();
        assert_eq!(e, ClientError::Request { status: 404, message: String::new() });

        let e: ClientError = ApiError::InvalidResponse("not json".to_string()).into();
        assert!(matches!(e, ClientError::Network(_)));
    }
}
