//! Interview API error types

use std::fmt;
use thiserror::Error;

/// API error with classification
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Network, message)
    }

    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Server { status }, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Decode, message)
    }

    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

/// Error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Connection failures, timeouts, truncated bodies
    Network,
    /// Backend answered with a non-success status
    Server { status: u16 },
    /// Response body did not match the expected shape
    Decode,
}

impl ApiErrorKind {
    /// Network trouble and 5xx responses are worth trying again
    pub fn is_retryable(self) -> bool {
        match self {
            Self::Network => true,
            Self::Server { status } => status >= 500,
            Self::Decode => false,
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network => write!(f, "network"),
            Self::Server { status } => write!(f, "server_{status}"),
            Self::Decode => write!(f, "decode"),
        }
    }
}
