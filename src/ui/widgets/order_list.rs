//! Order list widget.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use super::{render_indicator, truncate_string};
use crate::state::{LoadStatus, Store};

/// Order list widget.
pub struct OrderList;

impl OrderList {
    /// Render the order list.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let orders = &store.orders.orders;

        let block = Block::default()
            .title(format!(" Orders ({}) ", orders.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        if orders.is_empty() {
            let message = match store.orders.status {
                LoadStatus::Loading => "",
                _ => "No orders yet",
            };
            let empty = Paragraph::new(message)
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(empty, area);
        } else {
            let header_cells = ["Dish", "Description", "Qty", "Total"].iter().map(|h| {
                Cell::from(*h).style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            });
            let header = Row::new(header_cells).height(1).bottom_margin(1);

            let rows = orders.iter().map(|order| {
                let cells = vec![
                    Cell::from(truncate_string(&order.name, 24)),
                    Cell::from(truncate_string(&order.description, 40))
                        .style(Style::default().fg(Color::Gray)),
                    Cell::from(format!("{}x", order.quantity)),
                    Cell::from(order.formatted_price.as_str())
                        .style(Style::default().fg(Color::Green)),
                ];
                Row::new(cells).height(1)
            });

            let table = Table::new(
                rows,
                [
                    Constraint::Percentage(30),
                    Constraint::Percentage(45),
                    Constraint::Length(5),
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
            state.select(store.orders.selected_index);

            frame.render_stateful_widget(table, area, &mut state);
        }

        if store.orders.status == LoadStatus::Loading {
            render_indicator(frame, area, "Loading...");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Action, OrderSummary};
    use crate::ui::widgets::testing::{contains, render_lines, store};
    use rust_decimal_macros::dec;

    fn summary(id: u64, name: &str, formatted_price: &str) -> OrderSummary {
        OrderSummary {
            id,
            name: name.to_string(),
            description: "Prato da casa".to_string(),
            price: dec!(20),
            thumbnail_url: String::new(),
            quantity: 2,
            extras: Vec::new(),
            formatted_price: formatted_price.to_string(),
        }
    }

    #[test]
    fn test_renders_orders_with_totals() {
        let mut store = store();
        store.reduce(Action::LoadOrders);
        store.reduce(Action::OrdersLoaded {
            ticket: 1,
            result: Ok(vec![
                summary(1, "Ao molho", "R$ 46,00"),
                summary(2, "Veggie", "R$ 21,00"),
            ]),
        });

        let lines = render_lines(80, 10, |frame| OrderList::render(frame, frame.area(), &store));
        assert!(contains(&lines, "Orders (2)"));
        assert!(contains(&lines, "Ao molho"));
        assert!(contains(&lines, "R$ 46,00"));
        assert!(lines.iter().any(|l| l.contains("▶") && l.contains("Ao molho")));
    }

    #[test]
    fn test_empty_and_loading_states() {
        let mut store = store();
        let lines = render_lines(60, 6, |frame| OrderList::render(frame, frame.area(), &store));
        assert!(contains(&lines, "No orders yet"));

        store.reduce(Action::LoadOrders);
        let lines = render_lines(60, 6, |frame| OrderList::render(frame, frame.area(), &store));
        assert!(contains(&lines, "Loading..."));
        assert!(!contains(&lines, "No orders yet"));
    }
}
