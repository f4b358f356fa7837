//! Wire types and their conversion into display models.

use crate::pricing::CurrencyFormat;
use crate::state::{Extra, Food, Order, OrderSummary};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Food as returned by `GET /favorites`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodDto {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub thumbnail_url: String,
}

/// Order as returned by `GET /orders` and `GET /orders/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDto {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub extras: Vec<ExtraDto>,
}

/// Extra nested inside an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraDto {
    pub id: u64,
    pub name: String,
    pub value: Decimal,
    #[serde(default)]
    pub quantity: u32,
}

/// Converts API responses to internal state types.
pub struct DataConverter;

impl DataConverter {
    /// Favorite food, priced at its unit price.
    pub fn convert_food(food: FoodDto, currency: &CurrencyFormat) -> Food {
        Food {
            formatted_price: currency.format(food.price),
            id: food.id,
            name: food.name,
            description: food.description,
            price: food.price,
            thumbnail_url: food.thumbnail_url,
        }
    }

    /// Order list entry, priced at its line total.
    pub fn convert_order_summary(order: OrderDto, currency: &CurrencyFormat) -> OrderSummary {
        let thumbnail_url = if order.thumbnail_url.is_empty() {
            order.image_url
        } else {
            order.thumbnail_url
        };

        let mut summary = OrderSummary {
            id: order.id,
            name: order.name,
            description: order.description,
            price: order.price,
            thumbnail_url,
            quantity: order.quantity,
            extras: order.extras.into_iter().map(Self::convert_extra).collect(),
            formatted_price: String::new(),
        };
        summary.formatted_price = currency.format(summary.total());
        summary
    }

    /// Order detail, priced at its unit price.
    pub fn convert_order(order: OrderDto, currency: &CurrencyFormat) -> Order {
        let image_url = if order.image_url.is_empty() {
            order.thumbnail_url
        } else {
            order.image_url
        };

        Order {
            formatted_price: currency.format(order.price),
            id: order.id,
            name: order.name,
            description: order.description,
            price: order.price,
            image_url,
            quantity: order.quantity,
            extras: order.extras.into_iter().map(Self::convert_extra).collect(),
        }
    }

    pub fn convert_extra(extra: ExtraDto) -> Extra {
        Extra {
            id: extra.id,
            name: extra.name,
            value: extra.value,
            quantity: extra.quantity,
        }
    }
}
