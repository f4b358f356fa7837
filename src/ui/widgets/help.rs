//! Help panel widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::super::layout::centered_rect;

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("j/↓  ", "Move down"),
            ("k/↑  ", "Move up"),
            ("Home ", "Go to top"),
            ("End  ", "Go to bottom"),
            ("Enter", "Open selected"),
            ("Esc  ", "Back"),
        ],
    ),
    ("Tabs", &[("1    ", "Orders"), ("2    ", "Favorites")]),
    (
        "Actions",
        &[
            ("r    ", "Refresh / retry"),
            ("x    ", "Cancel open order"),
            ("y/n  ", "Answer confirmation"),
            ("?    ", "Toggle help"),
            ("q    ", "Quit"),
        ],
    ),
];

/// Help panel showing keybindings.
pub struct HelpPanel;

impl HelpPanel {
    /// Render the help panel.
    pub fn render(frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(50, 80, area);

        // Clear the area behind the popup
        frame.render_widget(Clear, popup_area);

        let mut help_text = Vec::new();
        for (index, (title, keys)) in SECTIONS.iter().enumerate() {
            if index > 0 {
                help_text.push(Line::from(""));
            }
            help_text.push(Line::from(vec![Span::styled(
                *title,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )]));
            for (key, description) in keys.iter() {
                help_text.push(Line::from(vec![
                    Span::styled(format!("  {}  ", key), Style::default().fg(Color::Cyan)),
                    Span::raw(*description),
                ]));
            }
        }

        let help = Paragraph::new(help_text)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .style(Style::default().fg(Color::White));

        frame.render_widget(help, popup_area);
    }
}
