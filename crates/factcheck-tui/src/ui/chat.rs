//! Chat widget for displaying the conversation.

use chrono::Local;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use factcheck_core::{DisplayEntry, Message, Role};

use super::text::wrap_text_indented;
use super::theme::Theme;
use crate::state::AUTO_SCROLL;

const SPINNER: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

pub const PENDING_TEXT: &str = "Researching and fact-checking...";

/// Conversation pane.
pub struct ChatWidget<'a> {
    entries: Vec<DisplayEntry<'a>>,
    /// Scroll offset in lines ([`AUTO_SCROLL`] = follow the latest entry).
    scroll: usize,
    spinner_frame: usize,
    theme: Theme,
}

impl<'a> ChatWidget<'a> {
    pub fn new(entries: Vec<DisplayEntry<'a>>) -> Self {
        Self {
            entries,
            scroll: AUTO_SCROLL,
            spinner_frame: 0,
            theme: Theme::default(),
        }
    }

    pub fn scroll(mut self, offset: usize) -> Self {
        self.scroll = offset;
        self
    }

    pub fn spinner_frame(mut self, frame: usize) -> Self {
        self.spinner_frame = frame;
        self
    }

    /// Build every line of the conversation for a given text width.
    pub fn lines(&self, text_width: usize) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        for entry in &self.entries {
            match entry {
                DisplayEntry::Message(msg) => self.push_message(&mut lines, msg, text_width),
                DisplayEntry::Pending => {
                    let spinner = SPINNER[self.spinner_frame % SPINNER.len()];
                    lines.push(Line::from(vec![
                        Span::styled("Assistant: ", self.theme.assistant_style()),
                        Span::styled(
                            format!("{} {}", spinner, PENDING_TEXT),
                            self.theme.pending_style(),
                        ),
                    ]));
                    lines.push(Line::from(""));
                }
            }
        }

        lines
    }

    fn push_message(&self, lines: &mut Vec<Line<'static>>, msg: &Message, text_width: usize) {
        let (prefix, style) = match msg.role() {
            Role::User => ("You: ", self.theme.user_style()),
            Role::Assistant => ("Assistant: ", self.theme.assistant_style()),
        };

        lines.push(Line::from(vec![
            Span::styled(prefix, style),
            Span::styled(
                msg.timestamp()
                    .with_timezone(&Local)
                    .format("%H:%M:%S")
                    .to_string(),
                self.theme.muted_style(),
            ),
        ]));

        for wrapped in wrap_text_indented(msg.content(), text_width, "  ") {
            lines.push(Line::from(Span::raw(wrapped)));
        }

        if let Some(sources) = msg.sources() {
            let text = format!("Sources used: {}", sources.join(", "));
            for wrapped in wrap_text_indented(&text, text_width, "  ") {
                lines.push(Line::from(Span::styled(wrapped, self.theme.sources_style())));
            }
        }

        lines.push(Line::from(""));
    }

    /// Render the widget and return the first line actually shown.
    pub fn render(self, frame: &mut Frame, area: Rect) -> usize {
        let visible_height = area.height.saturating_sub(2) as usize;
        let text_width = area.width.saturating_sub(2) as usize;

        let all_lines = self.lines(text_width);
        let total_lines = all_lines.len();

        let max_scroll = total_lines.saturating_sub(visible_height);
        let scroll_offset = if self.scroll == AUTO_SCROLL {
            max_scroll
        } else {
            self.scroll.min(max_scroll)
        };

        let lines: Vec<Line> = all_lines
            .into_iter()
            .skip(scroll_offset)
            .take(visible_height)
            .collect();

        let title = if scroll_offset < max_scroll {
            format!(
                " Conversation [{}-{}/{}] ",
                scroll_offset + 1,
                (scroll_offset + visible_height).min(total_lines),
                total_lines
            )
        } else {
            " Conversation ".to_string()
        };

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(self.theme.focused_border())
                .title(title),
        );
        frame.render_widget(paragraph, area);

        scroll_offset
    }
}
