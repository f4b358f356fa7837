//! GoRestaurant API integration.
//!
//! [`FoodApi`] is the raw capability the screens depend on; [`ApiClient`]
//! implements it over HTTP. The loader functions turn raw responses into the
//! display models held by the store.

mod client;
mod converter;
mod loaders;

pub use client::{ApiClient, ApiClientBuilder};
pub use converter::{DataConverter, ExtraDto, FoodDto, OrderDto};
pub use loaders::{cancel_order, load_favorites, load_order, load_orders};

use crate::error::Result;
use async_trait::async_trait;

/// Remote endpoints consumed by the screens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FoodApi: Send + Sync {
    /// `GET /favorites`
    async fn favorites(&self) -> Result<Vec<FoodDto>>;

    /// `GET /orders`
    async fn orders(&self) -> Result<Vec<OrderDto>>;

    /// `GET /orders/{id}`
    async fn order(&self, id: u64) -> Result<OrderDto>;

    /// `DELETE /orders/{id}`
    async fn cancel_order(&self, id: u64) -> Result<()>;
}
