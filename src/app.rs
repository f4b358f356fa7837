//! Main application module.
//!
//! This module contains the main `App` struct that coordinates
//! the event loop, state management, screen lifecycles and rendering.

use crate::api::{self, ApiClientBuilder, FoodApi};
use crate::config::Config;
use crate::error::Result;
use crate::events::EventHandler;
use crate::navigation::Route;
use crate::state::{Action, DetailStatus, Failure, Screen, Store};
use crate::tasks::ScreenTasks;
use crate::ui::Ui;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Store, tasks and screen lifecycle, independent of the terminal.
pub struct Controller {
    /// Application store.
    pub store: Store,
    /// Remote API.
    api: Arc<dyn FoodApi>,
    /// Running loads, one per screen.
    tasks: ScreenTasks,
    /// Sender handed to spawned tasks.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Route whose screen is currently mounted.
    mounted: Option<Route>,
}

impl Controller {
    /// Create a controller; returns the receiver for actions produced by
    /// background tasks.
    pub fn new(
        api: Arc<dyn FoodApi>,
        config: &Config,
    ) -> (Self, mpsc::UnboundedReceiver<Action>) {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let store = Store::new(config.currency.clone());

        let controller = Self {
            store,
            api,
            tasks: ScreenTasks::new(),
            action_tx,
            mounted: None,
        };
        (controller, action_rx)
    }

    /// Handle an action, then mount/unmount screens if the route changed.
    pub fn handle_action(&mut self, action: Action) -> Result<()> {
        if let Some((screen, ticket)) = action.task_result() {
            if !self.tasks.settle(screen, ticket) {
                tracing::debug!(?screen, ticket, "Dropping stale task result");
                return Ok(());
            }
        }

        match action {
            Action::Refresh => {
                if let Some(screen) = self.store.current_screen() {
                    self.start_load(screen);
                }
            }
            Action::LoadFavorites | Action::LoadOrders | Action::LoadOrder => {
                let screen = match action {
                    Action::LoadFavorites => Screen::Favorites,
                    Action::LoadOrders => Screen::Orders,
                    _ => Screen::OrderDetail,
                };
                if self.store.current_screen() == Some(screen) {
                    self.start_load(screen);
                } else {
                    tracing::debug!(?screen, "Ignoring load of a screen that is not mounted");
                }
            }
            Action::ConfirmCancel => {
                self.store.reduce(Action::ConfirmCancel);
                if self.store.order_detail.status == DetailStatus::Cancelling {
                    if let Some(id) = self.store.order_detail.order_id {
                        self.spawn_cancel(id);
                    }
                }
            }
            action => self.store.reduce(action),
        }

        self.sync_mounted();
        Ok(())
    }

    /// Mount the screen of the active route, unmounting the previous one.
    /// The new screen starts loading right away.
    pub fn sync_mounted(&mut self) {
        let current = self.store.current_route();
        if self.mounted == Some(current) {
            return;
        }

        if let Some(previous) = self.mounted.take() {
            if let Some(screen) = Screen::for_route(previous) {
                let still_in_history = self.store.app.navigation.routes().contains(&previous);
                if self.tasks.cancel(screen) {
                    tracing::debug!(?screen, "Cancelled load of unmounted screen");
                }
                self.store.suspend(screen, still_in_history);
            }
        }

        tracing::info!(route = %current, "Mounting screen");
        self.mounted = Some(current);
        if let Some(screen) = Screen::for_route(current) {
            self.start_load(screen);
        }
    }

    /// Reduce the load action of `screen` and spawn its request.
    fn start_load(&mut self, screen: Screen) {
        self.store.reduce(screen.load_action());
        match screen {
            Screen::Favorites => self.spawn_favorites(),
            Screen::Orders => self.spawn_orders(),
            Screen::OrderDetail => {
                if self.store.order_detail.status == DetailStatus::Loading {
                    if let Some(id) = self.store.order_detail.order_id {
                        self.spawn_order(id);
                    }
                }
            }
        }
    }

    /// Abort every background task.
    pub fn shutdown(&mut self) {
        self.tasks.cancel_all();
    }

    fn spawn_favorites(&mut self) {
        let api = Arc::clone(&self.api);
        let tx = self.action_tx.clone();
        let currency = self.store.currency.clone();

        self.tasks.spawn(Screen::Favorites, move |ticket| async move {
            let result = api::load_favorites(api.as_ref(), &currency)
                .await
                .map_err(Failure::from);
            let _ = tx.send(Action::FavoritesLoaded { ticket, result });
        });
    }

    fn spawn_orders(&mut self) {
        let api = Arc::clone(&self.api);
        let tx = self.action_tx.clone();
        let currency = self.store.currency.clone();

        self.tasks.spawn(Screen::Orders, move |ticket| async move {
            let result = api::load_orders(api.as_ref(), &currency)
                .await
                .map_err(Failure::from);
            let _ = tx.send(Action::OrdersLoaded { ticket, result });
        });
    }

    fn spawn_order(&mut self, id: u64) {
        let api = Arc::clone(&self.api);
        let tx = self.action_tx.clone();
        let currency = self.store.currency.clone();

        self.tasks.spawn(Screen::OrderDetail, move |ticket| async move {
            let result = api::load_order(api.as_ref(), id, &currency)
                .await
                .map_err(Failure::from);
            let _ = tx.send(Action::OrderLoaded { ticket, result });
        });
    }

    fn spawn_cancel(&mut self, id: u64) {
        let api = Arc::clone(&self.api);
        let tx = self.action_tx.clone();

        self.tasks.spawn(Screen::OrderDetail, move |ticket| async move {
            let result = api::cancel_order(api.as_ref(), id)
                .await
                .map_err(Failure::from);
            let _ = tx.send(Action::OrderCancelled { ticket, result });
        });
    }
}

/// The main application.
pub struct App {
    /// Terminal.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Store and screen lifecycle.
    controller: Controller,
    /// Event handler.
    event_handler: EventHandler,
    /// Action receiver.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Whether mouse capture was enabled.
    mouse_capture: bool,
}

impl App {
    /// Create a new application.
    pub fn new(config: Config) -> Result<Self> {
        let event_handler = EventHandler::new(&config.keybindings, &config.ui)?;

        let client = ApiClientBuilder::new().config(config.api.clone()).build()?;
        tracing::info!(base_url = client.base_url(), "API client ready");
        let (controller, action_rx) = Controller::new(Arc::new(client), &config);

        // Set up terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        let mouse_capture = config.ui.mouse_support;
        if mouse_capture {
            execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        } else {
            execute!(stdout, EnterAlternateScreen)?;
        }
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            controller,
            event_handler,
            action_rx,
            mouse_capture,
        })
    }

    /// Run the application event loop.
    pub async fn run(&mut self) -> Result<()> {
        // Mount the initial screen
        self.controller.sync_mounted();

        // Main event loop
        loop {
            let store = &mut self.controller.store;
            store.expire_notification(chrono::Utc::now());

            // Update event handler with current state
            self.event_handler.update_store_snapshot(store);

            // Render UI
            self.terminal.draw(|frame| {
                Ui::render(frame, store);
            })?;

            // Handle events and actions
            tokio::select! {
                // Handle terminal events
                result = self.event_handler.next() => {
                    if let Some(action) = result? {
                        self.controller.handle_action(action)?;
                    }
                }

                // Handle actions from the channel
                Some(action) = self.action_rx.recv() => {
                    self.controller.handle_action(action)?;
                }
            }

            // Check if we should quit
            if self.controller.store.app.should_quit {
                break;
            }
        }

        self.controller.shutdown();
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = disable_raw_mode();
        if self.mouse_capture {
            let _ = execute!(
                self.terminal.backend_mut(),
                LeaveAlternateScreen,
                DisableMouseCapture
            );
        } else {
            let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        }
        let _ = self.terminal.show_cursor();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{FoodDto, MockFoodApi, OrderDto};
    use crate::error::Error;
    use crate::state::LoadStatus;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn order_dto(id: u64) -> OrderDto {
        OrderDto {
            id,
            name: "Ao molho".to_string(),
            description: String::new(),
            price: dec!(20),
            thumbnail_url: String::new(),
            image_url: String::new(),
            quantity: 1,
            extras: Vec::new(),
        }
    }

    fn controller(api: MockFoodApi) -> (Controller, mpsc::UnboundedReceiver<Action>) {
        Controller::new(Arc::new(api), &Config::default())
    }

    /// Feed every queued action back into the controller until idle.
    async fn drain(controller: &mut Controller, rx: &mut mpsc::UnboundedReceiver<Action>, count: usize) {
        for _ in 0..count {
            let action = rx.recv().await.unwrap();
            controller.handle_action(action).unwrap();
        }
    }

    #[tokio::test]
    async fn test_mount_loads_orders() {
        let mut api = MockFoodApi::new();
        api.expect_orders()
            .times(1)
            .returning(|| Ok(vec![order_dto(1), order_dto(2)]));
        let (mut controller, mut rx) = controller(api);

        controller.sync_mounted();
        assert_eq!(controller.store.orders.status, LoadStatus::Loading);
        drain(&mut controller, &mut rx, 1).await;

        assert_eq!(controller.store.orders.status, LoadStatus::Loaded);
        assert_eq!(controller.store.orders.orders.len(), 2);
    }

    #[tokio::test]
    async fn test_refresh_failure_clears_refreshing() {
        let mut api = MockFoodApi::new();
        api.expect_orders().returning(|| Ok(Vec::new()));
        api.expect_favorites()
            .returning(|| Err(Error::network("connection refused")));
        let (mut controller, mut rx) = controller(api);

        controller.sync_mounted();
        drain(&mut controller, &mut rx, 1).await;

        controller
            .handle_action(Action::SwitchTab(Route::Favorites))
            .unwrap();
        assert!(controller.store.favorites.refreshing);
        drain(&mut controller, &mut rx, 1).await;

        assert!(!controller.store.favorites.refreshing);
        assert!(controller.store.favorites.error.is_some());
    }

    #[tokio::test]
    async fn test_favorites_refresh_succeeds() {
        let mut api = MockFoodApi::new();
        api.expect_favorites().returning(|| {
            Ok(vec![FoodDto {
                id: 1,
                name: "Veggie".to_string(),
                description: String::new(),
                price: dec!(10.0),
                thumbnail_url: String::new(),
            }])
        });
        let (mut controller, mut rx) = controller(api);
        controller.store.app.navigation = crate::navigation::NavigationStack::new(Route::Favorites);

        controller.sync_mounted();
        drain(&mut controller, &mut rx, 1).await;
        controller.handle_action(Action::Refresh).unwrap();
        assert!(controller.store.favorites.refreshing);
        drain(&mut controller, &mut rx, 1).await;

        assert!(!controller.store.favorites.refreshing);
        assert_eq!(controller.store.favorites.favorites[0].formatted_price, "R$ 10,00");
    }

    #[tokio::test]
    async fn test_open_and_cancel_order() {
        let mut api = MockFoodApi::new();
        api.expect_orders().returning(|| Ok(vec![order_dto(4)]));
        api.expect_order().returning(|id| Ok(order_dto(id)));
        api.expect_cancel_order().times(1).returning(|_| Ok(()));
        let (mut controller, mut rx) = controller(api);

        controller.sync_mounted();
        drain(&mut controller, &mut rx, 1).await;

        controller.handle_action(Action::Select).unwrap();
        assert_eq!(controller.store.current_route(), Route::Order { id: 4 });
        drain(&mut controller, &mut rx, 1).await;
        assert_eq!(controller.store.order_detail.status, DetailStatus::Loaded);

        controller.handle_action(Action::RequestCancel).unwrap();
        controller.handle_action(Action::ConfirmCancel).unwrap();
        assert_eq!(controller.store.order_detail.status, DetailStatus::Cancelling);
        drain(&mut controller, &mut rx, 1).await;

        assert_eq!(controller.store.app.navigation.routes(), &[Route::Orders]);
        // Orders screen is mounted again and reloads
        drain(&mut controller, &mut rx, 1).await;
        assert_eq!(controller.store.orders.status, LoadStatus::Loaded);
    }

    #[tokio::test]
    async fn test_failed_cancel_stays_on_order() {
        let mut api = MockFoodApi::new();
        api.expect_orders().returning(|| Ok(vec![order_dto(4)]));
        api.expect_order().returning(|id| Ok(order_dto(id)));
        api.expect_cancel_order()
            .returning(|_| Err(Error::Http { status: 500 }));
        let (mut controller, mut rx) = controller(api);

        controller.sync_mounted();
        drain(&mut controller, &mut rx, 1).await;
        controller.handle_action(Action::Select).unwrap();
        drain(&mut controller, &mut rx, 1).await;
        let before = controller.store.app.navigation.clone();

        controller.handle_action(Action::RequestCancel).unwrap();
        controller.handle_action(Action::ConfirmCancel).unwrap();
        drain(&mut controller, &mut rx, 1).await;

        assert_eq!(controller.store.app.navigation, before);
        assert_eq!(controller.store.order_detail.status, DetailStatus::Loaded);
        assert!(controller.store.order_detail.order.is_some());
        assert!(controller.store.order_detail.error.is_some());
    }

    #[tokio::test]
    async fn test_switching_tab_before_first_load_settles() {
        let mut api = MockFoodApi::new();
        api.expect_orders().returning(|| Ok(vec![order_dto(4)]));
        api.expect_favorites().returning(|| Ok(Vec::new()));
        let (mut controller, mut rx) = controller(api);

        controller.sync_mounted();
        controller
            .handle_action(Action::SwitchTab(Route::Favorites))
            .unwrap();

        // A stale OrdersLoaded may arrive before FavoritesLoaded.
        while controller.store.favorites.status != LoadStatus::Loaded {
            let action = rx.recv().await.unwrap();
            controller.handle_action(action).unwrap();
        }

        assert_eq!(controller.store.current_route(), Route::Favorites);
        assert_eq!(controller.store.orders.status, LoadStatus::Idle);
        assert!(controller.store.orders.orders.is_empty());
    }

    #[tokio::test]
    async fn test_load_for_unmounted_screen_is_ignored() {
        let mut api = MockFoodApi::new();
        api.expect_orders().times(1).returning(|| Ok(Vec::new()));
        api.expect_order().never();
        let (mut controller, mut rx) = controller(api);

        controller.sync_mounted();
        drain(&mut controller, &mut rx, 1).await;

        controller.handle_action(Action::LoadOrder).unwrap();
        controller.handle_action(Action::LoadFavorites).unwrap();

        assert!(controller.store.order_detail.error.is_none());
        assert_eq!(controller.store.order_detail.status, DetailStatus::Idle);
        assert!(!controller.store.favorites.refreshing);
        assert!(rx.try_recv().is_err());
    }
}
