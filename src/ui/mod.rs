//! UI rendering using ratatui.
//!
//! This module contains all TUI components and rendering logic.

mod layout;
mod widgets;

pub use layout::Layout;
pub use widgets::{
    FavoriteList, FoodDetail, HelpPanel, OrderDetail, OrderList, StatusBar, TabBar,
};

use crate::navigation::Route;
use crate::state::{DetailStatus, Store};
use ratatui::Frame;

/// Main UI renderer.
pub struct Ui;

impl Ui {
    /// Render the entire UI.
    pub fn render(frame: &mut Frame, store: &Store) {
        let error = store.current_error();
        let layout = Layout::new(frame.area(), error.is_some());

        // Render status bar
        StatusBar::render(frame, layout.status_area, store);

        // Render tab bar
        TabBar::render(frame, layout.tab_area, store);

        if let Some(failure) = error {
            widgets::render_error_banner(frame, layout.banner_area, failure);
        }

        // Render main content based on current route
        match store.current_route() {
            Route::Orders => OrderList::render(frame, layout.main_area, store),
            Route::Order { id } => {
                OrderDetail::render(frame, layout.main_area, store);
                if store.order_detail.status == DetailStatus::Confirming {
                    widgets::render_confirmation(frame, layout.main_area, id);
                }
            }
            Route::Favorites => FavoriteList::render(frame, layout.main_area, store),
            Route::FoodDetails { id } => FoodDetail::render(frame, layout.main_area, store, id),
        }

        // Render help panel if visible
        if store.app.show_help {
            HelpPanel::render(frame, frame.area());
        }

        // Render notification if present
        if let Some(notification) = &store.app.notification {
            widgets::render_notification(frame, layout.notification_area, notification);
        }
    }
}
