//! TUI widgets.

mod favorite_list;
mod food_detail;
mod help;
mod notifications;
mod order_detail;
mod order_list;
mod status_bar;
mod tab_bar;

pub use favorite_list::FavoriteList;
pub use food_detail::FoodDetail;
pub use help::HelpPanel;
pub use notifications::{render_confirmation, render_error_banner, render_notification};
pub use order_detail::OrderDetail;
pub use order_list::OrderList;
pub use status_bar::StatusBar;
pub use tab_bar::TabBar;

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Shorten `s` to `max_len` characters, ending with an ellipsis.
fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

/// Draw `label` in the bottom-right corner inside a bordered `area`.
fn render_indicator(frame: &mut Frame, area: Rect, label: &str) {
    let width = (label.chars().count() as u16 + 1).min(area.width.saturating_sub(2));
    if width == 0 || area.height < 3 {
        return;
    }

    let indicator = Line::from(vec![Span::styled(
        label.to_string(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::ITALIC),
    )]);

    let indicator_area = Rect {
        x: area.x + area.width.saturating_sub(width + 1),
        y: area.y + area.height.saturating_sub(2),
        width,
        height: 1,
    };

    frame.render_widget(Paragraph::new(indicator), indicator_area);
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Ao molho", 20), "Ao molho");
        assert_eq!(truncate_string("Macarrão ao molho", 6), "Macar…");
    }
}
