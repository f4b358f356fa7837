//! Favorite dishes list widget.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use super::{render_indicator, truncate_string};
use crate::state::{LoadStatus, Store};

/// Favorites list widget.
pub struct FavoriteList;

impl FavoriteList {
    /// Render the favorites list.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let favorites = &store.favorites;

        let mut title = vec![Span::raw(format!(" Favorites ({}) ", favorites.favorites.len()))];
        if let Some(updated) = favorites.last_updated {
            title.push(Span::styled(
                format!("updated {} ", updated.format("%H:%M:%S")),
                Style::default().fg(Color::DarkGray),
            ));
        }

        let block = Block::default()
            .title(Line::from(title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        if favorites.favorites.is_empty() {
            let message = match favorites.status {
                LoadStatus::Loading => "",
                _ => "No favorite dishes yet",
            };
            let empty = Paragraph::new(message)
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(empty, area);
        } else {
            let header_cells = ["Dish", "Description", "Price"].iter().map(|h| {
                Cell::from(*h).style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            });
            let header = Row::new(header_cells).height(1).bottom_margin(1);

            let rows = favorites.favorites.iter().map(|food| {
                Row::new(vec![
                    Cell::from(truncate_string(&food.name, 24)),
                    Cell::from(truncate_string(&food.description, 48))
                        .style(Style::default().fg(Color::Gray)),
                    Cell::from(food.formatted_price.as_str())
                        .style(Style::default().fg(Color::Green)),
                ])
            });

            let table = Table::new(
                rows,
                [
                    Constraint::Percentage(30),
                    Constraint::Percentage(50),
                    Constraint::Length(14),
                ],
            )
            .header(header)
            .block(block)
            .row_highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

            let mut state = TableState::default();
            state.select(favorites.selected_index);

            frame.render_stateful_widget(table, area, &mut state);
        }

        if favorites.refreshing {
            render_indicator(frame, area, "⟳ Refreshing...");
        }
    }
}
