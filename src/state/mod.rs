//! State management for Bistro.
//!
//! This module provides centralized state management with a unidirectional
//! data flow pattern inspired by Redux/Elm architecture. Network results
//! come back as actions and are folded into the store by [`Store::reduce`].

mod app_state;
mod favorites_state;
mod order_state;

pub use app_state::AppState;
pub use favorites_state::{FavoritesState, Food};
pub use order_state::{
    DetailStatus, Extra, Order, OrderDetailState, OrderSummary, OrdersState,
};

use crate::error::Error;
use crate::navigation::{Navigator, Route};
use crate::pricing::CurrencyFormat;
use crate::tasks::Ticket;
use chrono::{DateTime, Utc};

/// Screens that own a data loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Favorites,
    Orders,
    OrderDetail,
}

impl Screen {
    /// The screen shown for a route, if that route loads anything.
    pub fn for_route(route: Route) -> Option<Self> {
        match route {
            Route::Favorites => Some(Self::Favorites),
            Route::Orders => Some(Self::Orders),
            Route::Order { .. } => Some(Self::OrderDetail),
            Route::FoodDetails { .. } => None,
        }
    }

    /// The action that (re)loads this screen.
    pub fn load_action(self) -> Action {
        match self {
            Self::Favorites => Action::LoadFavorites,
            Self::Orders => Action::LoadOrders,
            Self::OrderDetail => Action::LoadOrder,
        }
    }
}

/// Progress of a list screen's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
}

/// Category of a failed request, as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Server,
    Malformed,
    MissingParameter,
    Other,
}

/// A failed request, in a form the store can keep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl Failure {
    /// Whether retrying can help.
    pub fn is_recoverable(&self) -> bool {
        matches!(self.kind, FailureKind::Network | FailureKind::Server)
    }
}

impl From<&Error> for Failure {
    fn from(err: &Error) -> Self {
        let kind = match err {
            Error::Network(_) => FailureKind::Network,
            Error::Http { .. } => FailureKind::Server,
            Error::MalformedResponse(_) | Error::Serialization(_) => FailureKind::Malformed,
            Error::MissingParameter(_) => FailureKind::MissingParameter,
            _ => FailureKind::Other,
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

impl From<Error> for Failure {
    fn from(err: Error) -> Self {
        Self::from(&err)
    }
}

/// Actions that can be dispatched to modify state.
#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    Select,
    Back,
    SwitchTab(Route),

    // Favorites
    LoadFavorites,
    FavoritesLoaded {
        ticket: Ticket,
        result: std::result::Result<Vec<Food>, Failure>,
    },

    // Orders
    LoadOrders,
    OrdersLoaded {
        ticket: Ticket,
        result: std::result::Result<Vec<OrderSummary>, Failure>,
    },

    // Order detail
    LoadOrder,
    OrderLoaded {
        ticket: Ticket,
        result: std::result::Result<Order, Failure>,
    },
    RequestCancel,
    ConfirmCancel,
    DeclineCancel,
    OrderCancelled {
        ticket: Ticket,
        result: std::result::Result<u64, Failure>,
    },

    // UI actions
    Refresh,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    GoToTop,
    GoToBottom,
    ToggleHelp,

    // Quit
    Quit,
}

impl Action {
    /// The screen and ticket of a task result, if this action is one.
    pub fn task_result(&self) -> Option<(Screen, Ticket)> {
        match self {
            Self::FavoritesLoaded { ticket, .. } => Some((Screen::Favorites, *ticket)),
            Self::OrdersLoaded { ticket, .. } => Some((Screen::Orders, *ticket)),
            Self::OrderLoaded { ticket, .. } | Self::OrderCancelled { ticket, .. } => {
                Some((Screen::OrderDetail, *ticket))
            }
            _ => None,
        }
    }
}

/// A notification to display to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub duration_secs: u64,
    pub created_at: DateTime<Utc>,
}

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

impl Notification {
    fn new(message: impl Into<String>, level: NotificationLevel, duration_secs: u64) -> Self {
        Self {
            message: message.into(),
            level,
            duration_secs,
            created_at: Utc::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Success, 3)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Error, 10)
    }

    /// Whether the notification has been shown long enough.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.created_at).num_seconds() >= self.duration_secs as i64
    }
}

/// Keep a list selection inside `len` items.
pub(crate) fn clamp_selection(selected: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        None
    } else {
        Some(selected.unwrap_or(0).min(len - 1))
    }
}

/// Move a list selection by `delta`, staying inside `len` items.
pub(crate) fn move_selection(selected: Option<usize>, delta: i32, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let current = selected.unwrap_or(0) as i64;
    let max_index = len as i64 - 1;
    Some((current + delta as i64).clamp(0, max_index) as usize)
}

/// The global state store.
#[derive(Debug)]
pub struct Store {
    /// Application state.
    pub app: AppState,
    /// Favorites screen.
    pub favorites: FavoritesState,
    /// Orders list screen.
    pub orders: OrdersState,
    /// Order detail screen.
    pub order_detail: OrderDetailState,
    /// Currency rules for derived prices.
    pub currency: CurrencyFormat,
}

impl Store {
    /// Create a new store that formats prices with `currency`.
    pub fn new(currency: CurrencyFormat) -> Self {
        Self {
            app: AppState::default(),
            favorites: FavoritesState::default(),
            orders: OrdersState::default(),
            order_detail: OrderDetailState::default(),
            currency,
        }
    }

    /// The active route.
    pub fn current_route(&self) -> Route {
        self.app.navigation.current()
    }

    /// The screen behind the active route.
    pub fn current_screen(&self) -> Option<Screen> {
        Screen::for_route(self.current_route())
    }

    /// Whether the active screen is waiting on the network.
    pub fn is_busy(&self) -> bool {
        match self.current_screen() {
            Some(Screen::Favorites) => self.favorites.refreshing,
            Some(Screen::Orders) => self.orders.status == LoadStatus::Loading,
            Some(Screen::OrderDetail) => matches!(
                self.order_detail.status,
                DetailStatus::Loading | DetailStatus::Cancelling
            ),
            None => false,
        }
    }

    /// The error banner of the active screen.
    pub fn current_error(&self) -> Option<&Failure> {
        match self.current_screen() {
            Some(Screen::Favorites) => self.favorites.error.as_ref(),
            Some(Screen::Orders) => self.orders.error.as_ref(),
            Some(Screen::OrderDetail) => self.order_detail.error.as_ref(),
            None => None,
        }
    }

    /// Navigation is frozen while a cancellation is in flight.
    fn navigation_locked(&self) -> bool {
        self.order_detail.status == DetailStatus::Cancelling
    }

    /// Apply an action to update state.
    pub fn reduce(&mut self, action: Action) {
        match action {
            // Navigation
            Action::Select => match self.current_route() {
                Route::Favorites => {
                    self.favorites.open_selected(&mut self.app.navigation);
                }
                Route::Orders => {
                    self.orders.open_selected(&mut self.app.navigation);
                }
                _ => {}
            },
            Action::Back => {
                if self.app.show_help {
                    self.app.show_help = false;
                } else if self.order_detail.status == DetailStatus::Confirming {
                    self.order_detail.decline_cancel();
                } else if !self.navigation_locked() {
                    self.app.navigation.back();
                }
            }
            Action::SwitchTab(route) => {
                if !self.navigation_locked() && self.current_route() != route.tab() {
                    self.app.navigation.reset_to(route.tab());
                }
            }

            // Favorites
            Action::LoadFavorites => self.favorites.begin_refresh(),
            Action::FavoritesLoaded { result, .. } => {
                self.track_connection(result.as_ref().err());
                self.favorites.finish_refresh(result);
            }

            // Orders
            Action::LoadOrders => self.orders.begin_load(),
            Action::OrdersLoaded { result, .. } => {
                self.track_connection(result.as_ref().err());
                self.orders.finish_load(result);
            }

            // Order detail
            Action::LoadOrder
                if matches!(
                    self.order_detail.status,
                    DetailStatus::Confirming | DetailStatus::Cancelling
                ) => {}
            Action::LoadOrder => {
                let route = self.current_route();
                if let Err(failure) = self.order_detail.begin_load(route) {
                    tracing::warn!(route = %route, error = %failure.message, "Order detail cannot load");
                }
            }
            Action::OrderLoaded { result, .. } => {
                self.track_connection(result.as_ref().err());
                self.order_detail.finish_load(result);
            }
            Action::RequestCancel => {
                self.order_detail.request_cancel();
            }
            Action::ConfirmCancel => {
                self.order_detail.confirm_cancel();
            }
            Action::DeclineCancel => self.order_detail.decline_cancel(),
            Action::OrderCancelled { result, .. } => {
                self.track_connection(result.as_ref().err());
                self.app.notification = Some(match &result {
                    Ok(id) => Notification::success(format!("Order #{} cancelled", id)),
                    Err(failure) => Notification::error(format!(
                        "Could not cancel order: {}",
                        failure.message
                    )),
                });
                self.order_detail
                    .finish_cancel(result, &mut self.app.navigation);
            }

            // UI actions
            Action::Refresh => {
                // Resolved into a load action by the app.
            }
            Action::ScrollUp => self.scroll(-1),
            Action::ScrollDown => self.scroll(1),
            Action::PageUp => self.scroll(-10),
            Action::PageDown => self.scroll(10),
            Action::GoToTop => self.scroll(i32::MIN / 2),
            Action::GoToBottom => self.scroll(i32::MAX / 2),
            Action::ToggleHelp => self.app.show_help = !self.app.show_help,

            // Quit
            Action::Quit => {
                self.app.should_quit = true;
            }
        }
    }

    /// Resolve loading flags of a screen whose task was aborted. Data is
    /// discarded when the screen's route left the history entirely.
    pub fn suspend(&mut self, screen: Screen, still_in_history: bool) {
        match screen {
            Screen::Favorites => {
                self.favorites.suspend();
                if !still_in_history {
                    self.favorites = FavoritesState::default();
                }
            }
            Screen::Orders => {
                self.orders.suspend();
                if !still_in_history {
                    self.orders = OrdersState::default();
                }
            }
            Screen::OrderDetail => {
                self.order_detail = OrderDetailState::default();
            }
        }
    }

    /// Drop the notification once it has been shown long enough.
    pub fn expire_notification(&mut self, now: DateTime<Utc>) {
        if self
            .app
            .notification
            .as_ref()
            .is_some_and(|n| n.is_expired(now))
        {
            self.app.notification = None;
        }
    }

    fn track_connection(&mut self, failure: Option<&Failure>) {
        self.app.connected = !matches!(failure, Some(f) if f.kind == FailureKind::Network);
    }

    fn scroll(&mut self, delta: i32) {
        match self.current_screen() {
            Some(Screen::Favorites) => {
                self.favorites.selected_index = move_selection(
                    self.favorites.selected_index,
                    delta,
                    self.favorites.favorites.len(),
                );
            }
            Some(Screen::Orders) => {
                self.orders.selected_index =
                    move_selection(self.orders.selected_index, delta, self.orders.orders.len());
            }
            Some(Screen::OrderDetail) => self.order_detail.scroll_extras(delta),
            None => {}
        }
    }
}
