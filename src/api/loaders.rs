//! Screen data loaders: one request, then conversion into display models.

use super::{DataConverter, FoodApi};
use crate::error::Result;
use crate::pricing::CurrencyFormat;
use crate::state::{Food, Order, OrderSummary};

/// Load the favorites list.
pub async fn load_favorites(api: &dyn FoodApi, currency: &CurrencyFormat) -> Result<Vec<Food>> {
    let favorites = api.favorites().await?;
    tracing::debug!(count = favorites.len(), "Favorites loaded");

    Ok(favorites
        .into_iter()
        .map(|food| DataConverter::convert_food(food, currency))
        .collect())
}

/// Load the orders list.
pub async fn load_orders(
    api: &dyn FoodApi,
    currency: &CurrencyFormat,
) -> Result<Vec<OrderSummary>> {
    let orders = api.orders().await?;
    tracing::debug!(count = orders.len(), "Orders loaded");

    Ok(orders
        .into_iter()
        .map(|order| DataConverter::convert_order_summary(order, currency))
        .collect())
}

/// Load one order with its extras.
pub async fn load_order(api: &dyn FoodApi, id: u64, currency: &CurrencyFormat) -> Result<Order> {
    let order = api.order(id).await?;
    tracing::debug!(order_id = id, extras = order.extras.len(), "Order loaded");

    Ok(DataConverter::convert_order(order, currency))
}

/// Cancel an order. Returns the cancelled id.
pub async fn cancel_order(api: &dyn FoodApi, id: u64) -> Result<u64> {
    api.cancel_order(id).await?;
    tracing::info!(order_id = id, "Order cancelled");
    Ok(id)
}
