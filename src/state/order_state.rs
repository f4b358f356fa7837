//! Order-related state: the orders list and the order detail screen.

use super::{Failure, LoadStatus, clamp_selection, move_selection};
use crate::error::Error;
use crate::navigation::{Navigator, Route};
use crate::pricing::{self, CurrencyFormat};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An add-on attached to an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extra {
    pub id: u64,
    pub name: String,
    /// Unit value.
    pub value: Decimal,
    pub quantity: u32,
}

/// An order as shown in the orders list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub thumbnail_url: String,
    pub quantity: u32,
    pub extras: Vec<Extra>,
    /// Line total `(price + extras) * quantity`, formatted.
    pub formatted_price: String,
}

impl OrderSummary {
    /// Unformatted line total.
    pub fn total(&self) -> Decimal {
        pricing::line_total(self.price, self.quantity, &self.extras)
    }
}

/// A single order with its extras.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: String,
    pub quantity: u32,
    pub extras: Vec<Extra>,
    /// Unit price, formatted.
    pub formatted_price: String,
}

impl Order {
    /// Unformatted cart total.
    pub fn total(&self) -> Decimal {
        pricing::line_total(self.price, self.quantity, &self.extras)
    }

    /// Cart total, formatted. Derived from the current fields on every call.
    pub fn cart_total(&self, currency: &CurrencyFormat) -> String {
        currency.format(self.total())
    }
}

/// State for the orders list.
#[derive(Debug, Default)]
pub struct OrdersState {
    /// All orders.
    pub orders: Vec<OrderSummary>,
    /// Currently selected order index.
    pub selected_index: Option<usize>,
    /// Load progress.
    pub status: LoadStatus,
    /// Error of the last load, if it failed.
    pub error: Option<Failure>,
    /// Last update timestamp.
    pub last_updated: Option<DateTime<Utc>>,
}

impl OrdersState {
    /// Mark a (re)load as started.
    pub fn begin_load(&mut self) {
        self.status = LoadStatus::Loading;
        self.error = None;
    }

    /// Apply the outcome of a load.
    pub fn finish_load(&mut self, result: Result<Vec<OrderSummary>, Failure>) {
        match result {
            Ok(orders) => {
                self.selected_index = clamp_selection(self.selected_index, orders.len());
                self.orders = orders;
                self.status = LoadStatus::Loaded;
                self.error = None;
                self.last_updated = Some(Utc::now());
            }
            Err(failure) => {
                tracing::warn!(error = %failure.message, "Failed to load orders");
                self.status = LoadStatus::Idle;
                self.error = Some(failure);
            }
        }
    }

    /// The load was aborted before it settled.
    pub fn suspend(&mut self) {
        if self.status == LoadStatus::Loading {
            self.status = LoadStatus::Idle;
        }
    }

    /// Open the detail screen of the order at `index`.
    pub fn open(&self, index: usize, navigator: &mut dyn Navigator) -> Option<u64> {
        let order = self.orders.get(index)?;
        navigator.navigate_to(Route::Order { id: order.id });
        Some(order.id)
    }

    /// Open the detail screen of the selected order.
    pub fn open_selected(&self, navigator: &mut dyn Navigator) -> Option<u64> {
        self.open(self.selected_index?, navigator)
    }
}

/// Order detail lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    /// Waiting for the user to confirm cancellation.
    Confirming,
    /// Delete request in flight.
    Cancelling,
    /// Order cancelled and the history reset to the orders list.
    Navigated,
}

/// State for the order detail screen.
#[derive(Debug, Default)]
pub struct OrderDetailState {
    /// Id taken from the route.
    pub order_id: Option<u64>,
    /// Loaded order.
    pub order: Option<Order>,
    /// Lifecycle.
    pub status: DetailStatus,
    /// Error of the last request, if it failed.
    pub error: Option<Failure>,
    /// First visible extra.
    pub extras_offset: usize,
}

impl OrderDetailState {
    /// Start loading the order named by `route`.
    pub fn begin_load(&mut self, route: Route) -> Result<u64, Failure> {
        let Some(id) = route.order_id() else {
            let failure = Failure::from(Error::missing_parameter("id"));
            self.status = DetailStatus::Idle;
            self.error = Some(failure.clone());
            return Err(failure);
        };

        if self.order_id != Some(id) {
            self.order = None;
            self.extras_offset = 0;
        }
        self.order_id = Some(id);
        self.status = DetailStatus::Loading;
        self.error = None;
        Ok(id)
    }

    /// Apply the outcome of a load.
    pub fn finish_load(&mut self, result: Result<Order, Failure>) {
        match result {
            Ok(order) => {
                self.order = Some(order);
                self.status = DetailStatus::Loaded;
                self.error = None;
            }
            Err(failure) => {
                tracing::warn!(order_id = ?self.order_id, error = %failure.message, "Failed to load order");
                self.status = if self.order.is_some() {
                    DetailStatus::Loaded
                } else {
                    DetailStatus::Idle
                };
                self.error = Some(failure);
            }
        }
    }

    /// Ask for confirmation. Only a loaded order can be cancelled.
    pub fn request_cancel(&mut self) -> bool {
        if self.status == DetailStatus::Loaded && self.order.is_some() {
            self.status = DetailStatus::Confirming;
            true
        } else {
            false
        }
    }

    /// The user declined the confirmation.
    pub fn decline_cancel(&mut self) {
        if self.status == DetailStatus::Confirming {
            self.status = DetailStatus::Loaded;
        }
    }

    /// The user confirmed; returns the id to delete.
    pub fn confirm_cancel(&mut self) -> Option<u64> {
        if self.status != DetailStatus::Confirming {
            return None;
        }
        let id = self.order.as_ref()?.id;
        self.status = DetailStatus::Cancelling;
        self.error = None;
        Some(id)
    }

    /// Apply the outcome of the delete request. Only a successful delete
    /// touches navigation, and it does so with a single reset.
    pub fn finish_cancel(&mut self, result: Result<u64, Failure>, navigator: &mut dyn Navigator) {
        match result {
            Ok(_) => {
                navigator.reset_to(Route::Orders);
                self.status = DetailStatus::Navigated;
            }
            Err(failure) => {
                tracing::warn!(order_id = ?self.order_id, error = %failure.message, "Failed to cancel order");
                self.status = DetailStatus::Loaded;
                self.error = Some(failure);
            }
        }
    }

    /// Extras of the loaded order.
    pub fn extras(&self) -> &[Extra] {
        self.order.as_ref().map(|o| o.extras.as_slice()).unwrap_or(&[])
    }

    /// Formatted cart total of the loaded order.
    pub fn cart_total(&self, currency: &CurrencyFormat) -> Option<String> {
        self.order.as_ref().map(|o| o.cart_total(currency))
    }

    /// Scroll the extras list.
    pub fn scroll_extras(&mut self, delta: i32) {
        self.extras_offset =
            move_selection(Some(self.extras_offset), delta, self.extras().len()).unwrap_or(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::{MockNavigator, NavigationStack};
    use crate::pricing::format_value;
    use crate::state::FailureKind;
    use mockall::predicate::eq;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn extra(id: u64, value: Decimal, quantity: u32) -> Extra {
        Extra {
            id,
            name: format!("Extra {}", id),
            value,
            quantity,
        }
    }

    fn order(id: u64) -> Order {
        Order {
            id,
            name: "Veggie".to_string(),
            description: "Macarrão com pimentão".to_string(),
            price: dec!(20),
            image_url: String::new(),
            quantity: 2,
            extras: vec![extra(1, dec!(1.5), 2)],
            formatted_price: format_value(dec!(20)),
        }
    }

    fn summary(id: u64) -> OrderSummary {
        OrderSummary {
            id,
            name: "Veggie".to_string(),
            description: String::new(),
            price: dec!(20),
            thumbnail_url: String::new(),
            quantity: 1,
            extras: Vec::new(),
            formatted_price: format_value(dec!(20)),
        }
    }

    fn loaded_detail(id: u64) -> OrderDetailState {
        let mut state = OrderDetailState::default();
        state.begin_load(Route::Order { id }).unwrap();
        state.finish_load(Ok(order(id)));
        state
    }

    fn server_failure() -> Failure {
        Failure {
            kind: FailureKind::Server,
            message: "Server responded with status 500".to_string(),
        }
    }

    #[test]
    fn test_cart_total() {
        // (20 + 1.5 * 2) * 2 = 46
        let state = loaded_detail(1);
        assert_eq!(
            state.cart_total(&CurrencyFormat::default()),
            Some(format_value(dec!(46)))
        );
    }

    #[test]
    fn test_cart_total_follows_extras() {
        let mut state = loaded_detail(1);
        if let Some(order) = state.order.as_mut() {
            order.extras.push(extra(2, dec!(2), 1));
        }
        // (20 + 3 + 2) * 2 = 50
        assert_eq!(
            state.cart_total(&CurrencyFormat::default()),
            Some("R$ 50,00".to_string())
        );
    }

    #[test]
    fn test_every_order_opens_its_own_detail() {
        let mut state = OrdersState::default();
        state.finish_load(Ok(vec![summary(3), summary(11), summary(27)]));
        for (index, order) in state.orders.iter().enumerate() {
            let mut navigator = MockNavigator::new();
            navigator
                .expect_navigate_to()
                .with(eq(Route::Order { id: order.id }))
                .times(1)
                .return_const(());
            assert_eq!(state.open(index, &mut navigator), Some(order.id));
        }
    }

    #[test]
    fn test_orders_failure_keeps_list() {
        let mut state = OrdersState::default();
        state.finish_load(Ok(vec![summary(1)]));
        state.begin_load();
        state.finish_load(Err(server_failure()));
        assert_eq!(state.status, LoadStatus::Idle);
        assert_eq!(state.orders.len(), 1);
        assert_eq!(state.selected_index, Some(0));
    }

    #[test]
    fn test_cancel_flow_resets_once() {
        let mut state = loaded_detail(7);
        assert!(state.request_cancel());
        assert_eq!(state.confirm_cancel(), Some(7));

        let mut navigator = MockNavigator::new();
        navigator
            .expect_reset_to()
            .with(eq(Route::Orders))
            .times(1)
            .return_const(());
        navigator.expect_navigate_to().never();

        state.finish_cancel(Ok(7), &mut navigator);
        assert_eq!(state.status, DetailStatus::Navigated);
    }

    #[test]
    fn test_failed_cancel_does_not_navigate() {
        let mut state = loaded_detail(7);
        state.request_cancel();
        state.confirm_cancel();

        let mut stack = NavigationStack::default();
        stack.navigate_to(Route::Order { id: 7 });
        let before = stack.clone();

        state.finish_cancel(Err(server_failure()), &mut stack);
        assert_eq!(stack, before);
        assert_eq!(state.status, DetailStatus::Loaded);
        assert_eq!(state.order.as_ref().map(|o| o.id), Some(7));
    }

    #[test]
    fn test_confirm_requires_request() {
        let mut state = loaded_detail(7);
        assert_eq!(state.confirm_cancel(), None);
        assert_eq!(state.status, DetailStatus::Loaded);
    }

    #[test]
    fn test_cancel_requires_loaded_order() {
        let mut state = OrderDetailState::default();
        assert!(!state.request_cancel());
        state.begin_load(Route::Order { id: 2 }).unwrap();
        assert!(!state.request_cancel());
    }

    #[test]
    fn test_decline_returns_to_loaded() {
        let mut state = loaded_detail(7);
        state.request_cancel();
        state.decline_cancel();
        assert_eq!(state.status, DetailStatus::Loaded);
    }

    #[test]
    fn test_reload_of_other_order_drops_stale_data() {
        let mut state = loaded_detail(1);
        state.begin_load(Route::Order { id: 2 }).unwrap();
        assert!(state.order.is_none());
        assert_eq!(state.order_id, Some(2));
    }

    #[test]
    fn test_failed_reload_keeps_order_on_screen() {
        let mut state = loaded_detail(1);
        state.begin_load(Route::Order { id: 1 }).unwrap();
        state.finish_load(Err(server_failure()));
        assert_eq!(state.status, DetailStatus::Loaded);
        assert!(state.order.is_some());
        assert!(state.error.is_some());
    }

    #[test]
    fn test_begin_load_without_id() {
        let mut state = OrderDetailState::default();
        let failure = state.begin_load(Route::Favorites).unwrap_err();
        assert_eq!(failure.kind, FailureKind::MissingParameter);
        assert_eq!(state.status, DetailStatus::Idle);
    }
}
