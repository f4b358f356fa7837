//! # Bistro - GoRestaurant TUI
//!
//! A terminal client for the GoRestaurant food-ordering API: browse your
//! orders and favorite dishes, inspect an order's extras and total, and
//! cancel orders. Built with ratatui and reqwest.
//!
//! ## Architecture
//!
//! - **App**: Terminal lifecycle, event loop and screen mounting
//! - **UI**: Layout and rendering logic
//! - **API**: GoRestaurant REST client and screen loaders
//! - **State**: Centralized state management
//! - **Navigation**: Route stack shared by all screens
//! - **Tasks**: Cancellable per-screen network work
//! - **Events**: Input handling and event processing
//! - **Config**: Configuration management
//! - **Pricing**: Money arithmetic and currency formatting

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod navigation;
pub mod pricing;
pub mod state;
pub mod tasks;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use error::{Error, Result};
