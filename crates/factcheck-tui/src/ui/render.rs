//! Main render function for the TUI.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use super::chat::ChatWidget;
use super::text::visible_tail;
use super::theme::Theme;
use crate::state::{UiState, EXAMPLE_QUESTIONS};

const DISCLAIMER: &str = "Educational information only, not professional medical advice. \
Always consult a healthcare professional before making health-related decisions.";

/// Render the entire UI.
///
/// Records the chat pane's visible top line in the state so scrolling
/// can start from what is on screen.
pub fn render(frame: &mut Frame, state: &mut UiState) {
    let theme = Theme::default();
    let banner_height = if state.conversation.last_error().is_some() {
        3
    } else {
        0
    };

    let [header_area, body_area, banner_area, input_area, footer_area] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(banner_height),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_header(frame, header_area, &theme);

    if state.show_examples() {
        render_empty_state(frame, body_area, state, &theme);
    } else {
        state.chat_top = ChatWidget::new(state.conversation.display_entries())
            .scroll(state.chat_scroll)
            .spinner_frame(state.tick / 2)
            .render(frame, body_area);
    }

    if let Some(error) = state.conversation.last_error() {
        render_banner(frame, banner_area, error, &theme);
    }

    render_input(frame, input_area, state, &theme);
    render_footer(frame, footer_area, state, &theme);
}

/// Title, tagline and disclaimer.
fn render_header(frame: &mut Frame, area: Rect, theme: &Theme) {
    let lines = vec![
        Line::from(vec![
            Span::styled("Health Fact Checker", theme.title()),
            Span::styled(
                "  AI-powered nutritional fact verification for health products",
                theme.muted_style(),
            ),
        ]),
        Line::from(Span::styled(DISCLAIMER, theme.warning_style())),
    ];

    let header = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(theme.unfocused_border()),
        );
    frame.render_widget(header, area);
}

/// Intro text and example questions shown before the first submission.
fn render_empty_state(frame: &mut Frame, area: Rect, state: &UiState, theme: &Theme) {
    let mut lines = vec![
        Line::from(""),
        Line::from(
            "  Ask me about any health product or nutritional claim you'd like me to fact-check.",
        ),
        Line::from(""),
        Line::from(Span::styled(
            "  Try these example questions (Up/Down to choose, Tab to use):",
            theme.muted_style(),
        )),
        Line::from(""),
    ];

    for (i, question) in EXAMPLE_QUESTIONS.iter().enumerate() {
        let line = if i == state.example_index {
            Line::from(Span::styled(
                format!("  > {}", question),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(format!("    {}", question))
        };
        lines.push(line);
    }

    let body = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.focused_border())
            .title(" Conversation "),
    );
    frame.render_widget(body, area);
}

fn render_banner(frame: &mut Frame, area: Rect, error: &str, theme: &Theme) {
    let banner = Paragraph::new(Line::from(vec![
        Span::styled("! ", theme.error_style().add_modifier(Modifier::BOLD)),
        Span::styled(error.to_string(), theme.error_style()),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.error_style()),
    );
    frame.render_widget(banner, area);
}

/// Input box; shown disabled while a request is outstanding.
fn render_input(frame: &mut Frame, area: Rect, state: &UiState, theme: &Theme) {
    let inner_width = area.width.saturating_sub(2) as usize;

    if !state.input_enabled() {
        let input = Paragraph::new(Span::styled(state.input.text(), theme.muted_style())).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.unfocused_border())
                .title(" Waiting for response... "),
        );
        frame.render_widget(input, area);
        return;
    }

    let (visible, cursor_col) = visible_tail(state.input.text(), state.input.cursor(), inner_width);
    let content = if state.input.text().is_empty() {
        Span::styled(
            "Ask about a health product or nutritional claim...",
            theme.muted_style(),
        )
    } else {
        Span::raw(visible)
    };

    let input = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.focused_border())
            .title(" Question (Enter to send) "),
    );
    frame.render_widget(input, area);

    if area.width > 2 && area.height > 2 {
        let x = area.x + 1 + cursor_col as u16;
        frame.set_cursor_position((x.min(area.x + area.width - 2), area.y + 1));
    }
}

fn render_footer(frame: &mut Frame, area: Rect, state: &UiState, theme: &Theme) {
    let (status, style) = if state.conversation.is_awaiting_response() {
        ("Awaiting response", theme.pending_style())
    } else {
        ("Ready", Style::default().fg(theme.assistant))
    };

    let help = " Enter: send | PgUp/PgDn: scroll | End: latest | Esc: quit ";

    let footer = Line::from(vec![
        Span::styled(status, style),
        Span::raw(" | "),
        Span::styled(state.endpoint.as_str(), theme.muted_style()),
        Span::raw(" |"),
        Span::styled(help, theme.muted_style()),
    ]);

    frame.render_widget(Paragraph::new(footer), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_empty_state_lists_examples() {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let mut state = UiState::new("http://127.0.0.1:8000");

        terminal.draw(|frame| render(frame, &mut state)).unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains("Health Fact Checker"));
        assert!(text.contains(EXAMPLE_QUESTIONS[0]));
        assert!(text.contains("Ready"));
    }

    #[test]
    fn test_failure_banner_and_pending_states() {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        let mut state = UiState::new("http://127.0.0.1:8000");

        state.input.set("test");
        state.submit_input();
        terminal.draw(|frame| render(frame, &mut state)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Researching and fact-checking..."));
        assert!(text.contains("Waiting for response"));

        state.conversation.resolve_failure().unwrap();
        terminal.draw(|frame| render(frame, &mut state)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains(factcheck_core::FAILURE_BANNER));
        assert!(!text.contains("Researching and fact-checking..."));
    }
}
