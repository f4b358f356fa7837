//! Order detail widget: dish, extras and cart total.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use super::render_indicator;
use crate::state::{DetailStatus, Order, Store};

/// Order detail widget.
pub struct OrderDetail;

impl OrderDetail {
    /// Render the open order.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let detail = &store.order_detail;
        let title = match detail.order_id {
            Some(id) => format!(" Order #{} ", id),
            None => " Order ".to_string(),
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let Some(order) = &detail.order else {
            let message = match detail.status {
                DetailStatus::Loading => "",
                _ => "Order unavailable",
            };
            let empty = Paragraph::new(message)
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(empty, area);
            if detail.status == DetailStatus::Loading {
                render_indicator(frame, area, "Loading...");
            }
            return;
        };

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Dish
                Constraint::Min(3),    // Extras
                Constraint::Length(2), // Total and hint
            ])
            .split(inner);

        render_dish(frame, chunks[0], order);
        render_extras(frame, chunks[1], order, detail.extras_offset);

        let total = detail.cart_total(&store.currency).unwrap_or_default();
        let footer = vec![
            Line::from(vec![
                Span::styled(
                    "Total do pedido  ",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    total,
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(
                "x cancel order · Esc back",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(Paragraph::new(footer), chunks[2]);

        match detail.status {
            DetailStatus::Loading => render_indicator(frame, area, "Loading..."),
            DetailStatus::Cancelling => render_indicator(frame, area, "Cancelling..."),
            _ => {}
        }
    }
}

fn render_dish(frame: &mut Frame, area: Rect, order: &Order) {
    let lines = vec![
        Line::from(Span::styled(
            order.name.as_str(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            order.description.as_str(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Unit price ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                order.formatted_price.as_str(),
                Style::default().fg(Color::Green),
            ),
            Span::styled("   Quantity ", Style::default().fg(Color::DarkGray)),
            Span::raw(order.quantity.to_string()),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn render_extras(frame: &mut Frame, area: Rect, order: &Order, offset: usize) {
    let block = Block::default()
        .title(" Adicionais ")
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray));

    if order.extras.is_empty() {
        let empty = Paragraph::new("No extras")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = order
        .extras
        .iter()
        .map(|extra| {
            ListItem::new(Line::from(vec![
                Span::raw(format!("{:<24}", extra.name)),
                Span::styled(
                    format!("{}x", extra.quantity),
                    Style::default().fg(Color::Cyan),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD));

    let mut state = ListState::default().with_offset(offset);
    frame.render_stateful_widget(list, area, &mut state);
}
