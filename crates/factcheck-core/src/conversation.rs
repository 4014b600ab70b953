//! Append-only conversation store with a one-request-at-a-time gate.

use crate::chat::Message;
use crate::error::CoreError;
use crate::ids::MessageId;
use crate::status::SessionStatus;

/// Assistant content appended when a request fails for any reason.
pub const APOLOGY_TEXT: &str =
    "Sorry, I encountered an error while processing your request. Please try again.";

/// Banner text recorded as the last error when a request fails.
pub const FAILURE_BANNER: &str = "Failed to get response. Please try again.";

/// An entry as it should be displayed.
///
/// `Pending` is derived from the session status and is never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayEntry<'a> {
    Message(&'a Message),
    Pending,
}

/// Ordered messages of one session plus the status of the current request.
///
/// Invariants:
/// - messages are only ever appended, never edited or removed
/// - every user message is followed by exactly one assistant message before
///   the next user message
/// - while `AwaitingResponse`, the last message is a user message
#[derive(Debug, Default)]
pub struct ConversationStore {
    messages: Vec<Message>,
    status: SessionStatus,
    last_error: Option<String>,
}

impl ConversationStore {
    /// Create an empty store in the `Idle` status.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user utterance and start awaiting its response.
    ///
    /// Refused without any state change when the text is blank or a request
    /// is already outstanding. The content is stored verbatim.
    pub fn append_user(&mut self, text: &str) -> Result<MessageId, CoreError> {
        if !self.status.accepts_submissions() {
            return Err(CoreError::RequestInFlight);
        }
        if text.trim().is_empty() {
            return Err(CoreError::EmptyUtterance);
        }

        let message = Message::user(text);
        let id = message.id().clone();
        self.messages.push(message);
        self.status = SessionStatus::AwaitingResponse;
        self.last_error = None;
        Ok(id)
    }

    /// Append the service's answer and return to `Idle`.
    pub fn resolve_success(
        &mut self,
        text: impl Into<String>,
        sources: Option<Vec<String>>,
    ) -> Result<MessageId, CoreError> {
        self.resolve(Message::assistant(text, sources))
    }

    /// Append the fixed apology, record the banner, and return to `Idle`.
    pub fn resolve_failure(&mut self) -> Result<MessageId, CoreError> {
        let id = self.resolve(Message::assistant(APOLOGY_TEXT, None))?;
        self.last_error = Some(FAILURE_BANNER.to_string());
        Ok(id)
    }

    fn resolve(&mut self, message: Message) -> Result<MessageId, CoreError> {
        if self.status != SessionStatus::AwaitingResponse {
            return Err(CoreError::NoRequestInFlight);
        }
        let id = message.id().clone();
        self.messages.push(message);
        self.status = SessionStatus::Idle;
        Ok(id)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_awaiting_response(&self) -> bool {
        self.status == SessionStatus::AwaitingResponse
    }

    /// Banner text of the last failure, cleared by the next accepted submission.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Stored messages followed by a pending entry while a request is outstanding.
    pub fn display_entries(&self) -> Vec<DisplayEntry<'_>> {
        let mut entries: Vec<DisplayEntry<'_>> =
            self.messages.iter().map(DisplayEntry::Message).collect();
        if self.is_awaiting_response() {
            entries.push(DisplayEntry::Pending);
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::Role;

    #[test]
    fn test_accepted_exchange_adds_two_entries() {
        let mut store = ConversationStore::new();
        store.append_user("question").unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.is_awaiting_response());

        store.resolve_success("answer", None).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.status(), SessionStatus::Idle);
    }

    #[test]
    fn test_submit_while_awaiting_is_noop() {
        let mut store = ConversationStore::new();
        store.append_user("a").unwrap();

        let result = store.append_user("b");
        assert_eq!(result, Err(CoreError::RequestInFlight));
        assert_eq!(store.len(), 1);
        assert_eq!(store.status(), SessionStatus::AwaitingResponse);
        assert_eq!(store.messages()[0].content(), "a");
    }

    #[test]
    fn test_blank_submissions_are_noops() {
        let mut store = ConversationStore::new();
        for text in ["", "   ", "\n\t "] {
            assert_eq!(store.append_user(text), Err(CoreError::EmptyUtterance));
        }
        assert!(store.is_empty());
        assert_eq!(store.status(), SessionStatus::Idle);
    }

    #[test]
    fn test_user_content_is_stored_verbatim() {
        let mut store = ConversationStore::new();
        store.append_user("  padded question ").unwrap();
        assert_eq!(store.messages()[0].content(), "  padded question ");
    }

    #[test]
    fn test_success_mirrors_payload() {
        let mut store = ConversationStore::new();
        store
            .append_user("Is turmeric effective for reducing inflammation?")
            .unwrap();
        store
            .resolve_success("Limited evidence...", Some(vec!["PMID:12345".to_string()]))
            .unwrap();

        let messages = store.messages();
        assert_eq!(messages[0].role(), Role::User);
        assert_eq!(
            messages[0].content(),
            "Is turmeric effective for reducing inflammation?"
        );
        assert_eq!(messages[1].role(), Role::Assistant);
        assert_eq!(messages[1].content(), "Limited evidence...");
        assert_eq!(messages[1].sources(), Some(&["PMID:12345".to_string()][..]));
        assert_eq!(store.status(), SessionStatus::Idle);
        assert_eq!(store.last_error(), None);
    }

    #[test]
    fn test_empty_source_list_means_no_sources() {
        let mut store = ConversationStore::new();
        store.append_user("q").unwrap();
        store.resolve_success("a", Some(Vec::new())).unwrap();
        assert_eq!(store.messages()[1].sources(), None);
    }

    #[test]
    fn test_failure_appends_apology_and_banner() {
        let mut store = ConversationStore::new();
        store.append_user("test").unwrap();
        store.resolve_failure().unwrap();

        let reply = store.last_message().unwrap();
        assert_eq!(reply.role(), Role::Assistant);
        assert_eq!(reply.content(), APOLOGY_TEXT);
        assert_eq!(reply.sources(), None);
        assert_eq!(store.last_error(), Some(FAILURE_BANNER));
        assert_eq!(store.status(), SessionStatus::Idle);
    }

    #[test]
    fn test_next_submission_clears_banner() {
        let mut store = ConversationStore::new();
        store.append_user("first").unwrap();
        store.resolve_failure().unwrap();
        assert!(store.last_error().is_some());

        store.append_user("second").unwrap();
        assert_eq!(store.last_error(), None);
    }

    #[test]
    fn test_resolve_without_request_is_refused() {
        let mut store = ConversationStore::new();
        assert_eq!(
            store.resolve_success("orphan", None),
            Err(CoreError::NoRequestInFlight)
        );
        assert_eq!(store.resolve_failure(), Err(CoreError::NoRequestInFlight));
        assert!(store.is_empty());
        assert_eq!(store.last_error(), None);
    }

    #[test]
    fn test_pending_is_derived_not_stored() {
        let mut store = ConversationStore::new();
        store.append_user("q").unwrap();

        let entries = store.display_entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1], DisplayEntry::Pending);
        assert_eq!(store.len(), 1);

        store.resolve_success("a", None).unwrap();
        assert!(store
            .display_entries()
            .iter()
            .all(|e| matches!(e, DisplayEntry::Message(_))));
    }

    #[test]
    fn test_roles_alternate_across_exchanges() {
        let mut store = ConversationStore::new();
        for i in 0..3 {
            store.append_user(&format!("q{}", i)).unwrap();
            if i % 2 == 0 {
                store.resolve_success("a", None).unwrap();
            } else {
                store.resolve_failure().unwrap();
            }
        }

        let roles: Vec<Role> = store.messages().iter().map(|m| m.role()).collect();
        assert_eq!(
            roles,
            vec![
                Role::User,
                Role::Assistant,
                Role::User,
                Role::Assistant,
                Role::User,
                Role::Assistant
            ]
        );
        let ids: std::collections::HashSet<_> = store.messages().iter().map(|m| m.id()).collect();
        assert_eq!(ids.len(), 6);
    }
}
