//! Shared types for the posts dashboard
//!
//! This crate holds everything that crosses crate boundaries:
//! - `models` - remote entities as served by the JSONPlaceholder API
//! - `notification` - transient user-facing messages
//! - `theme` - the persisted light/dark preference
//! - `ApiError` - the error taxonomy for remote calls

pub mod models;
pub mod notification;
pub mod theme;

use serde::{Deserialize, Serialize};

pub use models::{
    Address, Album, AlbumId, Comment, CommentId, Company, Geo, Photo, PhotoId, Post, PostDraft,
    PostId, Todo, TodoId, User, UserId,
};
pub use notification::{
    DEFAULT_AUTO_HIDE_MS, Notification, NotificationId, NotificationRequest, Severity,
};
pub use theme::ThemeMode;

/// Result type for remote API calls
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Structured error types for remote API operations.
///
/// Every failure of a remote call ends up as one of these variants. Dispatchers
/// turn them into a slice error string plus an error notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ApiError {
    /// Transport failure: connect, timeout, TLS, DNS
    #[error("Network error: {message}")]
    Network { message: String },

    /// The server answered with a non-2xx status
    #[error("HTTP {status} error from {url}: {body}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },

    /// The response body did not match the expected entity shape
    #[error("Decode error for {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ApiError {
    pub fn network(message: impl Into<String>) -> Self {
        ApiError::Network {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal {
            message: message.into(),
        }
    }

    /// HTTP status code if the server responded at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_exposes_code() {
        let err = ApiError::Status {
            status: 404,
            url: "https://example.test/posts/9".to_string(),
            body: "{}".to_string(),
        };
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "HTTP 404 error from https://example.test/posts/9: {}"
        );
        assert_eq!(ApiError::network("offline").status_code(), None);
    }
}
