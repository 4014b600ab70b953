//! UI state for rendering.

use tracing::{debug, warn};

use factcheck_client::CycleOutcome;
use factcheck_core::ConversationStore;

use crate::input::InputLine;

/// Questions offered while the conversation is empty.
pub const EXAMPLE_QUESTIONS: [&str; 4] = [
    "Is turmeric effective for reducing inflammation?",
    "What are the benefits of omega-3 supplements?",
    "Are probiotics good for digestive health?",
    "Does green tea extract help with weight loss?",
];

/// Scroll value that pins the chat to its latest entry.
pub const AUTO_SCROLL: usize = usize::MAX;

/// Everything the renderer needs (no async, no locks).
pub struct UiState {
    /// The session's conversation; the only place submissions are gated.
    pub conversation: ConversationStore,

    /// Text being typed.
    pub input: InputLine,

    /// Chat scroll offset in lines, or [`AUTO_SCROLL`].
    pub chat_scroll: usize,

    /// First chat line shown by the last render.
    pub chat_top: usize,

    /// Highlighted example question in the empty state.
    pub example_index: usize,

    /// Base URL requests are sent to, shown in the footer.
    pub endpoint: String,

    /// Render loop counter, drives the pending spinner.
    pub tick: usize,

    should_quit: bool,
}

impl UiState {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            conversation: ConversationStore::new(),
            input: InputLine::default(),
            chat_scroll: AUTO_SCROLL,
            chat_top: 0,
            example_index: 0,
            endpoint: endpoint.into(),
            tick: 0,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Try to submit the current input.
    ///
    /// Returns the utterance to send when the conversation accepted it. The
    /// input is kept when the submission is refused.
    pub fn submit_input(&mut self) -> Option<String> {
        let utterance = self.input.text().to_string();
        match self.conversation.append_user(&utterance) {
            Ok(id) => {
                debug!(message_id = %id, "Utterance accepted");
                self.input.clear();
                self.chat_scroll = AUTO_SCROLL;
                Some(utterance)
            }
            Err(e) => {
                debug!(reason = %e, "Submission ignored");
                None
            }
        }
    }

    /// Apply a finished request to the conversation.
    pub fn apply_outcome(&mut self, outcome: CycleOutcome) {
        if let Err(e) = outcome.apply(&mut self.conversation) {
            warn!(error = %e, "Discarding outcome with no outstanding request");
            return;
        }
        self.chat_scroll = AUTO_SCROLL;
    }

    /// Whether the input box should accept typing and submission.
    pub fn input_enabled(&self) -> bool {
        !self.conversation.is_awaiting_response()
    }

    pub fn show_examples(&self) -> bool {
        self.conversation.is_empty() && !self.conversation.is_awaiting_response()
    }

    pub fn select_next_example(&mut self) {
        self.example_index = (self.example_index + 1) % EXAMPLE_QUESTIONS.len();
    }

    pub fn select_prev_example(&mut self) {
        self.example_index = self
            .example_index
            .checked_sub(1)
            .unwrap_or(EXAMPLE_QUESTIONS.len() - 1);
    }

    /// Copy the highlighted example question into the input.
    pub fn use_selected_example(&mut self) {
        self.input.set(EXAMPLE_QUESTIONS[self.example_index]);
    }

    pub fn scroll_up(&mut self, lines: usize) {
        let top = if self.chat_scroll == AUTO_SCROLL {
            self.chat_top
        } else {
            self.chat_scroll
        };
        self.chat_scroll = top.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        if self.chat_scroll != AUTO_SCROLL {
            self.chat_scroll = self.chat_scroll.saturating_add(lines);
        }
    }

    pub fn scroll_to_bottom(&mut self) {
        self.chat_scroll = AUTO_SCROLL;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use factcheck_client::{ChatReply, FailureKind};
    use factcheck_core::{SessionStatus, APOLOGY_TEXT};

    #[test]
    fn test_submit_clears_input_and_gates() {
        let mut state = UiState::new("http://127.0.0.1:8000");
        state.input.set("a");
        assert_eq!(state.submit_input().as_deref(), Some("a"));
        assert!(state.input.text().is_empty());
        assert!(!state.input_enabled());

        state.input.set("b");
        assert_eq!(state.submit_input(), None);
        assert_eq!(state.input.text(), "b");
        assert_eq!(state.conversation.len(), 1);

        state.apply_outcome(CycleOutcome::Answered(ChatReply {
            response: "answer".into(),
            sources: None,
        }));
        assert_eq!(state.conversation.len(), 2);
        assert!(state.input_enabled());
    }

    #[test]
    fn test_blank_input_is_not_submitted() {
        let mut state = UiState::new("x");
        state.input.set("   ");
        assert_eq!(state.submit_input(), None);
        assert!(state.conversation.is_empty());
        assert_eq!(state.conversation.status(), SessionStatus::Idle);
    }

    #[test]
    fn test_failure_outcome_shows_banner() {
        let mut state = UiState::new("x");
        state.input.set("test");
        state.submit_input();
        state.apply_outcome(CycleOutcome::Failed(FailureKind::Transport));

        assert_eq!(
            state.conversation.last_message().map(|m| m.content()),
            Some(APOLOGY_TEXT)
        );
        assert!(state.conversation.last_error().is_some());
    }

    #[test]
    fn test_stray_outcome_is_ignored() {
        let mut state = UiState::new("x");
        state.apply_outcome(CycleOutcome::Failed(FailureKind::Service));
        assert!(state.conversation.is_empty());
    }

    #[test]
    fn test_example_selection_wraps() {
        let mut state = UiState::new("x");
        state.select_prev_example();
        assert_eq!(state.example_index, EXAMPLE_QUESTIONS.len() - 1);
        state.select_next_example();
        assert_eq!(state.example_index, 0);
        state.use_selected_example();
        assert_eq!(state.input.text(), EXAMPLE_QUESTIONS[0]);
    }

    #[test]
    fn test_scrolling_leaves_auto_mode() {
        let mut state = UiState::new("x");
        state.scroll_down(5);
        assert_eq!(state.chat_scroll, AUTO_SCROLL);
        state.chat_top = 20;
        state.scroll_up(3);
        assert_eq!(state.chat_scroll, 17);
        state.scroll_down(2);
        assert_eq!(state.chat_scroll, 19);
        state.scroll_to_bottom();
        assert_eq!(state.chat_scroll, AUTO_SCROLL);
    }
}
