//! Colors and styles.

use ratatui::style::{Color, Modifier, Style};

/// Colors for the fact checker TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Title and focused borders
    pub accent: Color,
    /// Pending request indicator
    pub pending: Color,
    /// Error banner
    pub error: Color,
    /// Disclaimer box
    pub warning: Color,
    /// Timestamps, hints, disabled input
    pub muted: Color,
    pub user: Color,
    pub assistant: Color,
    /// Citation line under answers
    pub sources: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Cyan,
            pending: Color::Yellow,
            error: Color::Red,
            warning: Color::Yellow,
            muted: Color::DarkGray,
            user: Color::Blue,
            assistant: Color::Green,
            sources: Color::Gray,
        }
    }
}

impl Theme {
    /// Style for focused/active borders.
    pub fn focused_border(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Style for unfocused borders.
    pub fn unfocused_border(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Style for the application title.
    pub fn title(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// Style for muted/secondary text.
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Style for the pending request indicator.
    pub fn pending_style(&self) -> Style {
        Style::default().fg(self.pending)
    }

    /// Style for error text and the failure banner.
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    /// Style for the disclaimer.
    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    /// Style for user message headers.
    pub fn user_style(&self) -> Style {
        Style::default().fg(self.user).add_modifier(Modifier::BOLD)
    }

    /// Style for assistant message headers.
    pub fn assistant_style(&self) -> Style {
        Style::default()
            .fg(self.assistant)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the citation line.
    pub fn sources_style(&self) -> Style {
        Style::default().fg(self.sources).add_modifier(Modifier::ITALIC)
    }
}
