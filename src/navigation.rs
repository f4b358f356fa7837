//! Screen navigation.
//!
//! Screens never reach for a global router. They receive a [`Navigator`]
//! and call it when the user selects something, so tests can hand them a
//! double instead of the real [`NavigationStack`].

use std::fmt;

/// A screen plus the parameters it was opened with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// List of all orders.
    Orders,
    /// Detail of one order.
    Order { id: u64 },
    /// List of favorite foods.
    Favorites,
    /// Detail of one food.
    FoodDetails { id: u64 },
}

impl Route {
    /// The order id carried by this route, if any.
    pub fn order_id(&self) -> Option<u64> {
        match self {
            Self::Order { id } => Some(*id),
            _ => None,
        }
    }

    /// The tab this route belongs to.
    pub fn tab(&self) -> Route {
        match self {
            Self::Orders | Self::Order { .. } => Self::Orders,
            Self::Favorites | Self::FoodDetails { .. } => Self::Favorites,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Orders => write!(f, "Orders"),
            Self::Order { id } => write!(f, "Order #{}", id),
            Self::Favorites => write!(f, "Favorites"),
            Self::FoodDetails { id } => write!(f, "Food #{}", id),
        }
    }
}

/// Navigation capability handed to screens.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator {
    /// Open `route` on top of the current one.
    fn navigate_to(&mut self, route: Route);

    /// Clear the history so that `route` is the only entry.
    fn reset_to(&mut self, route: Route);
}

/// History of visited routes. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationStack {
    routes: Vec<Route>,
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self::new(Route::Orders)
    }
}

impl NavigationStack {
    /// Create a stack with a single root route.
    pub fn new(root: Route) -> Self {
        Self { routes: vec![root] }
    }

    /// The active route.
    pub fn current(&self) -> Route {
        // `routes` always holds at least the root
        self.routes.last().copied().unwrap_or(Route::Orders)
    }

    /// All routes, root first.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Pop the active route. Returns false when already at the root.
    pub fn back(&mut self) -> bool {
        if self.routes.len() > 1 {
            self.routes.pop();
            true
        } else {
            false
        }
    }
}

impl Navigator for NavigationStack {
    /// Routes already in the history are returned to instead of pushed
    /// twice.
    fn navigate_to(&mut self, route: Route) {
        if let Some(pos) = self.routes.iter().position(|r| *r == route) {
            self.routes.truncate(pos + 1);
        } else {
            self.routes.push(route);
        }
        tracing::debug!(route = %route, depth = self.routes.len(), "Navigated");
    }

    fn reset_to(&mut self, route: Route) {
        self.routes.clear();
        self.routes.push(route);
        tracing::debug!(route = %route, "Navigation reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_navigate_pushes() {
        let mut stack = NavigationStack::default();
        stack.navigate_to(Route::Order { id: 3 });
        assert_eq!(stack.current(), Route::Order { id: 3 });
        assert_eq!(stack.routes(), &[Route::Orders, Route::Order { id: 3 }]);
    }

    #[test]
    fn test_navigate_to_existing_route_truncates() {
        let mut stack = NavigationStack::default();
        stack.navigate_to(Route::Order { id: 3 });
        stack.navigate_to(Route::Orders);
        assert_eq!(stack.routes(), &[Route::Orders]);
    }

    #[test]
    fn test_reset_leaves_single_entry() {
        let mut stack = NavigationStack::default();
        stack.navigate_to(Route::Order { id: 1 });
        stack.navigate_to(Route::Favorites);
        stack.reset_to(Route::Orders);
        assert_eq!(stack.routes(), &[Route::Orders]);
    }

    #[test]
    fn test_back_never_pops_root() {
        let mut stack = NavigationStack::new(Route::Favorites);
        stack.navigate_to(Route::FoodDetails { id: 7 });
        assert!(stack.back());
        assert!(!stack.back());
        assert_eq!(stack.current(), Route::Favorites);
    }

    #[test]
    fn test_route_helpers() {
        assert_eq!(Route::Order { id: 9 }.order_id(), Some(9));
        assert_eq!(Route::Orders.order_id(), None);
        assert_eq!(Route::FoodDetails { id: 2 }.tab(), Route::Favorites);
        assert_eq!(Route::Order { id: 2 }.to_string(), "Order #2");
    }
}
