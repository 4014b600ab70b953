//! Health Fact Checker Core Types
//!
//! This crate contains the conversation state machine with no dependencies on:
//! - Network/HTTP
//! - Terminal rendering
//! - Runtime specifics
//!
//! The [`ConversationStore`] is the single owner of the exchanged messages and
//! of the session status that gates new submissions.

pub mod chat;
pub mod conversation;
pub mod error;
pub mod ids;
pub mod status;

// Re-export commonly used types
pub use chat::{Message, Role};
pub use conversation::{ConversationStore, DisplayEntry, APOLOGY_TEXT, FAILURE_BANNER};
pub use error::CoreError;
pub use ids::MessageId;
pub use status::SessionStatus;
