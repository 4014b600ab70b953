//! Session status.

use serde::{Deserialize, Serialize};

/// Status of the current session.
///
/// Transient: it is not part of the conversation and is never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionStatus {
    /// No request outstanding; new submissions are accepted.
    #[default]
    Idle,
    /// A request was sent and its response has not arrived yet.
    AwaitingResponse,
}

impl SessionStatus {
    /// Returns true if a new utterance may be submitted.
    pub fn accepts_submissions(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Human-readable label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AwaitingResponse => "awaiting-response",
        }
    }
}
