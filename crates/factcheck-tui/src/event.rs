//! Messages exchanged between the UI thread and the request thread.

use factcheck_client::CycleOutcome;

/// Events sent from the request thread to the UI thread.
#[derive(Debug)]
pub enum UiEvent {
    /// The outstanding request finished; apply it to the conversation.
    Resolved(CycleOutcome),
}

/// Commands sent from the UI thread to the request thread.
#[derive(Debug)]
pub enum BackendCommand {
    /// Fact-check an utterance the conversation store has accepted.
    Ask(String),

    /// Quit the application.
    Quit,
}
