//! Tab bar widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::navigation::Route;
use crate::state::Store;

/// Tab bar widget.
pub struct TabBar;

impl TabBar {
    /// Render the tab bar.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let tabs = [("1", "Orders", Route::Orders), ("2", "Favorites", Route::Favorites)];
        let active = store.current_route().tab();

        let mut spans = vec![Span::raw(" ")];

        for (key, name, tab) in tabs {
            let key_style = Style::default().fg(Color::DarkGray);
            let name_style = if active == tab {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::White)
            };

            spans.push(Span::styled(format!("[{}] ", key), key_style));
            spans.push(Span::styled(name, name_style));
            spans.push(Span::raw("  "));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
