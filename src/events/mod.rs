//! Event handling for Bistro.
//!
//! Terminal input is turned into [`Action`](crate::state::Action)s here;
//! nothing in this module touches the store directly.

mod handler;
mod input;

pub use handler::EventHandler;
pub use input::KeyBinding;
