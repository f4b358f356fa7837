//! Application-level state.

use super::Notification;
use crate::navigation::NavigationStack;

/// Global application state.
#[derive(Debug)]
pub struct AppState {
    /// Visited routes; the last one is on screen.
    pub navigation: NavigationStack,
    /// Whether to show help overlay.
    pub show_help: bool,
    /// Current notification.
    pub notification: Option<Notification>,
    /// Whether the last request reached the API server.
    pub connected: bool,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            navigation: NavigationStack::default(),
            show_help: false,
            notification: None,
            connected: true,
            should_quit: false,
        }
    }
}
