//! Error types for the fact-checking client.

use std::fmt;

use thiserror::Error;

/// Errors that can occur when talking to the fact-checking service.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (connect, DNS, reset, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// A success status with a body that is not the expected payload.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// The configured endpoint cannot be used.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Unknown deployment mode name.
    #[error("invalid deployment mode '{0}' (expected 'development' or 'production')")]
    InvalidMode(String),

    /// The streaming endpoint reported an error event.
    #[error("stream error: {0}")]
    Stream(String),
}

/// Coarse failure category, used for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The service could not be reached.
    Transport,
    /// The service was reached but did not produce a usable answer.
    Service,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport => write!(f, "transport"),
            Self::Service => write!(f, "service"),
        }
    }
}

impl ClientError {
    /// Classify this error for logging.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Http(e) if e.is_status() || e.is_decode() => FailureKind::Service,
            Self::Http(_) | Self::InvalidEndpoint(_) | Self::InvalidMode(_) => {
                FailureKind::Transport
            }
            Self::Status { .. } | Self::MalformedPayload(_) | Self::Stream(_) => {
                FailureKind::Service
            }
        }
    }
}
