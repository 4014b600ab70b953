//! Message types for the conversation history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::MessageId;

/// Role of a stored message in the conversation.
///
/// The in-flight "pending" entry is not a role: it is derived from the
/// session status, see [`crate::DisplayEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Utterance typed by the user.
    User,
    /// Answer from the fact-checking service, or the failure apology.
    Assistant,
}

/// A message in the conversation history.
///
/// Fields are private so a message cannot change after it is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    role: Role,
    content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sources: Option<Vec<String>>,
    timestamp: DateTime<Utc>,
}

impl Message {
    fn new(role: Role, content: impl Into<String>, sources: Option<Vec<String>>) -> Self {
        Self {
            id: MessageId::generate(),
            role,
            content: content.into(),
            sources,
            timestamp: Utc::now(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content, None)
    }

    /// Create an assistant message.
    ///
    /// An empty source list is stored as no sources.
    pub fn assistant(content: impl Into<String>, sources: Option<Vec<String>>) -> Self {
        let sources = sources.filter(|s| !s.is_empty());
        Self::new(Role::Assistant, content, sources)
    }

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Citation labels, present only on successful assistant answers.
    pub fn sources(&self) -> Option<&[String]> {
        self.sources.as_deref()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}
