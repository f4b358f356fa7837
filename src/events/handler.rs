//! Event handler for processing input events.

use super::KeyBinding;
use crate::config::{KeyBindings, UiConfig};
use crate::error::Result;
use crate::navigation::Route;
use crate::state::{Action, DetailStatus, Store};
use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind,
};
use std::time::Duration;

/// Key bindings, parsed once.
#[derive(Debug, Clone)]
struct Keymap {
    quit: KeyBinding,
    help: KeyBinding,
    up: KeyBinding,
    down: KeyBinding,
    select: KeyBinding,
    back: KeyBinding,
    refresh: KeyBinding,
    orders: KeyBinding,
    favorites: KeyBinding,
    cancel_order: KeyBinding,
    confirm: KeyBinding,
    decline: KeyBinding,
}

impl Keymap {
    fn parse(bindings: &KeyBindings) -> Result<Self> {
        Ok(Self {
            quit: bindings.quit.parse()?,
            help: bindings.help.parse()?,
            up: bindings.up.parse()?,
            down: bindings.down.parse()?,
            select: bindings.select.parse()?,
            back: bindings.back.parse()?,
            refresh: bindings.refresh.parse()?,
            orders: bindings.orders.parse()?,
            favorites: bindings.favorites.parse()?,
            cancel_order: bindings.cancel_order.parse()?,
            confirm: bindings.confirm.parse()?,
            decline: bindings.decline.parse()?,
        })
    }
}

/// Snapshot of relevant store state for event handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StoreSnapshot {
    route: Route,
    detail_status: DetailStatus,
    show_help: bool,
}

/// Handles input events and produces actions.
pub struct EventHandler {
    keymap: Keymap,
    poll_timeout: Duration,
    mouse_support: bool,
    store_snapshot: Option<StoreSnapshot>,
}

impl EventHandler {
    /// Create a new event handler. Fails on an unparsable key binding.
    pub fn new(bindings: &KeyBindings, ui: &UiConfig) -> Result<Self> {
        Ok(Self {
            keymap: Keymap::parse(bindings)?,
            poll_timeout: Duration::from_millis(ui.tick_rate_ms.max(10)),
            mouse_support: ui.mouse_support,
            store_snapshot: None,
        })
    }

    /// Update the store snapshot for state-aware event handling.
    pub fn update_store_snapshot(&mut self, store: &Store) {
        self.store_snapshot = Some(StoreSnapshot {
            route: store.current_route(),
            detail_status: store.order_detail.status,
            show_help: store.app.show_help,
        });
    }

    /// Get the next action from user input. Returns `None` when the tick
    /// elapses without input.
    pub async fn next(&mut self) -> Result<Option<Action>> {
        // Blocking poll, bounded by the tick rate. Network work runs on
        // other workers of the multi-thread runtime.
        if event::poll(self.poll_timeout)? {
            match event::read()? {
                CrosstermEvent::Key(key) => return Ok(self.handle_key(key)),
                CrosstermEvent::Mouse(mouse) if self.mouse_support => {
                    return Ok(self.handle_mouse(mouse));
                }
                _ => {}
            }
        }
        Ok(None)
    }

    /// Handle a key event and return an optional action.
    fn handle_key(&self, key: KeyEvent) -> Option<Action> {
        // Only process key press events
        if key.kind != KeyEventKind::Press {
            return None;
        }

        let snapshot = self.store_snapshot?;

        if snapshot.detail_status == DetailStatus::Confirming {
            return self.handle_confirmation(key);
        }

        if snapshot.show_help {
            return (self.keymap.help.matches(&key)
                || self.keymap.back.matches(&key)
                || self.keymap.quit.matches(&key))
            .then_some(Action::ToggleHelp);
        }

        self.handle_normal_mode(key, snapshot)
    }

    /// Handle a mouse event and return an optional action.
    fn handle_mouse(&self, mouse: MouseEvent) -> Option<Action> {
        match mouse.kind {
            MouseEventKind::ScrollUp => Some(Action::ScrollUp),
            MouseEventKind::ScrollDown => Some(Action::ScrollDown),
            _ => None,
        }
    }

    fn handle_confirmation(&self, key: KeyEvent) -> Option<Action> {
        if self.keymap.confirm.matches(&key) {
            Some(Action::ConfirmCancel)
        } else if self.keymap.decline.matches(&key) || self.keymap.back.matches(&key) {
            Some(Action::DeclineCancel)
        } else {
            None
        }
    }

    fn handle_normal_mode(&self, key: KeyEvent, snapshot: StoreSnapshot) -> Option<Action> {
        let keys = &self.keymap;

        // Global shortcuts
        if keys.quit.matches(&key) {
            return Some(Action::Quit);
        }
        if keys.help.matches(&key) {
            return Some(Action::ToggleHelp);
        }
        if keys.refresh.matches(&key) {
            return Some(Action::Refresh);
        }

        // Tabs
        if keys.orders.matches(&key) {
            return Some(Action::SwitchTab(Route::Orders));
        }
        if keys.favorites.matches(&key) {
            return Some(Action::SwitchTab(Route::Favorites));
        }

        // Navigation
        if keys.up.matches(&key) || key.code == KeyCode::Up {
            return Some(Action::ScrollUp);
        }
        if keys.down.matches(&key) || key.code == KeyCode::Down {
            return Some(Action::ScrollDown);
        }
        if keys.select.matches(&key) {
            return Some(Action::Select);
        }
        if keys.back.matches(&key) || key.code == KeyCode::Backspace {
            return Some(Action::Back);
        }

        match key.code {
            KeyCode::PageUp => return Some(Action::PageUp),
            KeyCode::PageDown => return Some(Action::PageDown),
            KeyCode::Home => return Some(Action::GoToTop),
            KeyCode::End => return Some(Action::GoToBottom),
            _ => {}
        }

        // Screen-specific actions
        match snapshot.route {
            Route::Order { .. } if keys.cancel_order.matches(&key) => Some(Action::RequestCancel),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::CurrencyFormat;
    use crossterm::event::KeyModifiers;

    fn handler_for(store: &Store) -> EventHandler {
        let mut handler = EventHandler::new(&KeyBindings::default(), &UiConfig::default()).unwrap();
        handler.update_store_snapshot(store);
        handler
    }

    fn store() -> Store {
        Store::new(CurrencyFormat::default())
    }

    fn press(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn test_global_keys() {
        let store = store();
        let handler = handler_for(&store);
        assert!(matches!(handler.handle_key(press('q')), Some(Action::Quit)));
        assert!(matches!(handler.handle_key(press('r')), Some(Action::Refresh)));
        assert!(matches!(
            handler.handle_key(press('2')),
            Some(Action::SwitchTab(Route::Favorites))
        ));
        assert!(matches!(
            handler.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
            Some(Action::Select)
        ));
    }

    #[test]
    fn test_cancel_key_only_on_order_route() {
        let mut store = store();
        let handler = handler_for(&store);
        assert!(handler.handle_key(press('x')).is_none());

        store.app.navigation = crate::navigation::NavigationStack::new(Route::Order { id: 1 });
        let handler = handler_for(&store);
        assert!(matches!(
            handler.handle_key(press('x')),
            Some(Action::RequestCancel)
        ));
    }

    #[test]
    fn test_confirmation_prompt_captures_keys() {
        let mut store = store();
        store.order_detail.status = DetailStatus::Confirming;
        let handler = handler_for(&store);
        assert!(matches!(handler.handle_key(press('y')), Some(Action::ConfirmCancel)));
        assert!(matches!(handler.handle_key(press('n')), Some(Action::DeclineCancel)));
        assert!(handler.handle_key(press('q')).is_none());
    }

    #[test]
    fn test_help_overlay_closes_on_back() {
        let mut store = store();
        store.app.show_help = true;
        let handler = handler_for(&store);
        assert!(matches!(
            handler.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
            Some(Action::ToggleHelp)
        ));
        assert!(handler.handle_key(press('j')).is_none());
    }

    #[test]
    fn test_invalid_binding_is_rejected() {
        let bindings = KeyBindings {
            quit: "Hyper+".to_string(),
            ..KeyBindings::default()
        };
        assert!(EventHandler::new(&bindings, &UiConfig::default()).is_err());
    }
}
