//! Conversation errors.

use thiserror::Error;

/// Reasons the conversation store refuses an operation.
///
/// A refused operation never changes the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The utterance was empty or whitespace-only.
    #[error("Utterance is empty")]
    EmptyUtterance,

    /// A request is already outstanding.
    #[error("A request is already awaiting a response")]
    RequestInFlight,

    /// A resolution arrived while no request was outstanding.
    #[error("No request is awaiting a response")]
    NoRequestInFlight,
}
