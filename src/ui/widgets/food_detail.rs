//! Favorite dish detail widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::state::Store;

/// Food detail widget. Shows a dish from the loaded favorites.
pub struct FoodDetail;

impl FoodDetail {
    /// Render the dish with the given id.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, id: u64) {
        let block = Block::default()
            .title(format!(" Dish #{} ", id))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let lines = match store.favorites.find(id) {
            Some(food) => vec![
                Line::from(Span::styled(
                    food.name.as_str(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    food.description.as_str(),
                    Style::default().fg(Color::Gray),
                )),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Price ", Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        food.formatted_price.as_str(),
                        Style::default().fg(Color::Green),
                    ),
                ]),
            ],
            None => vec![Line::from(Span::styled(
                "Dish not found in favorites",
                Style::default().fg(Color::DarkGray),
            ))],
        };

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}
