//! Status bar widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::state::Store;

/// Status bar widget.
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let connection_status = if store.app.connected {
            Span::styled("● Online", Style::default().fg(Color::Green))
        } else {
            Span::styled("○ Offline", Style::default().fg(Color::Red))
        };

        let breadcrumb = store
            .app
            .navigation
            .routes()
            .iter()
            .map(|route| route.to_string())
            .collect::<Vec<_>>()
            .join(" › ");

        let busy = if store.is_busy() {
            Span::styled(
                " Loading... ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            Span::raw("")
        };

        let help_hint = Span::styled(" Press ? for help ", Style::default().fg(Color::Gray));

        let mut spans = vec![
            Span::styled(
                " Bistro ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            connection_status,
            Span::raw(" | "),
            Span::styled(breadcrumb, Style::default().fg(Color::Yellow)),
            busy,
        ];

        // Right-align the help hint
        let left_width = Line::from(spans.clone()).width();
        let padding = (area.width as usize).saturating_sub(left_width + help_hint.width());
        spans.push(Span::raw(" ".repeat(padding)));
        spans.push(help_hint);

        let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));

        frame.render_widget(paragraph, area);
    }
}
