//! Error taxonomy for exchange and data-fetch calls
//!
//! Everything here is terminal for the operation it came from: authorization
//! codes are single-use and data fetches are user-retriable, so nothing is
//! retried automatically.

use thiserror::Error;

/// Errors surfaced by authenticated provider calls and the exchange path.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Required input was missing; no network call was made.
    #[error("{0}")]
    Validation(String),

    /// The provider returned a structured error payload.
    #[error("{message}")]
    Provider {
        message: String,
        code: Option<i64>,
    },

    /// The provider rejected the stored token as invalid or expired.
    /// The session must be cleared and the user sent back through login.
    #[error("Session expired. Please login again.")]
    SessionExpired,

    /// Network or decoding failure below the provider protocol.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn provider(message: impl Into<String>, code: Option<i64>) -> Self {
        Self::Provider {
            message: message.into(),
            code,
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }
}
