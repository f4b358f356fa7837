//! Notification, error banner and confirmation rendering.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::super::layout::centered_rect;
use crate::state::{Failure, FailureKind, Notification, NotificationLevel};

/// Render a notification popup.
pub fn render_notification(frame: &mut Frame, area: Rect, notification: &Notification) {
    frame.render_widget(Clear, area);

    let (border_color, icon) = match notification.level {
        NotificationLevel::Success => (Color::Green, "✓"),
        NotificationLevel::Error => (Color::Red, "✗"),
    };

    let content = Line::from(vec![
        Span::styled(format!("{} ", icon), Style::default().fg(border_color)),
        Span::raw(&notification.message),
    ]);

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
}

/// Render the error banner of the active screen.
pub fn render_error_banner(frame: &mut Frame, area: Rect, failure: &Failure) {
    let label = match failure.kind {
        FailureKind::Network => "Connection problem: ",
        FailureKind::Server => "Server error: ",
        FailureKind::Malformed => "Unexpected response: ",
        FailureKind::MissingParameter => "Missing parameter: ",
        FailureKind::Other => "Error: ",
    };

    let mut spans = vec![
        Span::styled(
            format!("✗ {}", label),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::raw(failure.message.as_str()),
    ];
    if failure.is_recoverable() {
        spans.push(Span::styled(
            "  (press r to retry)",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

/// Render the yes/no prompt for cancelling an order.
pub fn render_confirmation(frame: &mut Frame, area: Rect, order_id: u64) {
    let popup_area = centered_rect(50, 20, area);
    let popup_area = Rect {
        height: popup_area.height.max(5),
        ..popup_area
    }
    .intersection(area);

    frame.render_widget(Clear, popup_area);

    let content = vec![
        Line::from(format!("Cancel order #{}?", order_id)),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "[y] ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw("Yes, cancel   "),
            Span::styled(
                "[n] ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Keep it"),
        ]),
    ];

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .title(" Confirm ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );

    frame.render_widget(paragraph, popup_area);
}
