//! Application loop and key handling.

use std::time::Duration;

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tracing::{debug, info};

use factcheck_client::{CycleOutcome, FailureKind};

use crate::event::{BackendCommand, UiEvent};
use crate::state::UiState;
use crate::ui;

const PAGE: usize = 10;

/// Main application with UI state and channel handles.
pub struct App {
    state: UiState,

    /// Receiver for resolved requests.
    ui_rx: mpsc::Receiver<UiEvent>,

    /// Sender for requests to the background thread.
    cmd_tx: mpsc::Sender<BackendCommand>,
}

impl App {
    pub fn new(
        endpoint: impl Into<String>,
        ui_rx: mpsc::Receiver<UiEvent>,
        cmd_tx: mpsc::Sender<BackendCommand>,
    ) -> Self {
        Self {
            state: UiState::new(endpoint),
            ui_rx,
            cmd_tx,
        }
    }

    /// Run the main event loop on the current thread.
    pub fn run(&mut self, mut terminal: DefaultTerminal) -> std::io::Result<()> {
        loop {
            terminal.draw(|frame| ui::render(frame, &mut self.state))?;
            self.state.tick = self.state.tick.wrapping_add(1);

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            while let Ok(event) = self.ui_rx.try_recv() {
                self.apply_event(event);
            }

            if self.state.should_quit() {
                break;
            }
        }

        let _ = self.cmd_tx.blocking_send(BackendCommand::Quit);
        info!(messages = self.state.conversation.len(), "UI loop finished");

        Ok(())
    }

    fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Resolved(outcome) => {
                debug!(success = outcome.is_success(), "Request resolved");
                self.state.apply_outcome(outcome);
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.state.quit();
            return;
        }

        match key.code {
            KeyCode::Esc => self.state.quit(),

            KeyCode::Enter => self.submit(),

            // Scrolling works in every state
            KeyCode::PageUp => self.state.scroll_up(PAGE),
            KeyCode::PageDown => self.state.scroll_down(PAGE),
            KeyCode::End if self.state.input.text().is_empty() => self.state.scroll_to_bottom(),

            // Example questions, only before the first submission
            KeyCode::Up if self.state.show_examples() => self.state.select_prev_example(),
            KeyCode::Down if self.state.show_examples() => self.state.select_next_example(),
            KeyCode::Tab if self.state.show_examples() => self.state.use_selected_example(),

            KeyCode::Up => self.state.scroll_up(1),
            KeyCode::Down => self.state.scroll_down(1),

            _ if !self.state.input_enabled() => {}

            KeyCode::Char(c) => self.state.input.insert(c),
            KeyCode::Backspace => self.state.input.backspace(),
            KeyCode::Delete => self.state.input.delete(),
            KeyCode::Left => self.state.input.move_left(),
            KeyCode::Right => self.state.input.move_right(),
            KeyCode::Home => self.state.input.move_home(),
            KeyCode::End => self.state.input.move_end(),

            _ => {}
        }
    }

    /// Hand the input to the conversation; send it only if accepted.
    fn submit(&mut self) {
        if let Some(utterance) = self.state.submit_input() {
            if self
                .cmd_tx
                .blocking_send(BackendCommand::Ask(utterance))
                .is_err()
            {
                // No request thread left to answer, resolve locally
                self.state
                    .apply_outcome(CycleOutcome::Failed(FailureKind::Transport));
            }
        }
    }
}
