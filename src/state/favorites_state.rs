//! Favorites screen state.

use super::{Failure, LoadStatus, clamp_selection};
use crate::navigation::{Navigator, Route};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A food marked as favorite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub thumbnail_url: String,
    /// Derived from `price` when loaded.
    pub formatted_price: String,
}

/// State for the favorites list.
#[derive(Debug, Default)]
pub struct FavoritesState {
    /// Loaded favorites.
    pub favorites: Vec<Food>,
    /// Currently selected index.
    pub selected_index: Option<usize>,
    /// Load progress.
    pub status: LoadStatus,
    /// Pull-to-refresh indicator.
    pub refreshing: bool,
    /// Error of the last load, if it failed.
    pub error: Option<Failure>,
    /// Last successful load.
    pub last_updated: Option<DateTime<Utc>>,
}

impl FavoritesState {
    /// Mark a (re)load as started.
    pub fn begin_refresh(&mut self) {
        self.refreshing = true;
        self.status = LoadStatus::Loading;
        self.error = None;
    }

    /// Apply the outcome of a load. The refresh indicator is cleared either
    /// way; a failure leaves the current list untouched.
    pub fn finish_refresh(&mut self, result: Result<Vec<Food>, Failure>) {
        match result {
            Ok(favorites) => {
                self.selected_index = clamp_selection(self.selected_index, favorites.len());
                self.favorites = favorites;
                self.status = LoadStatus::Loaded;
                self.error = None;
                self.last_updated = Some(Utc::now());
            }
            Err(failure) => {
                tracing::warn!(error = %failure.message, "Failed to load favorites");
                self.status = LoadStatus::Idle;
                self.error = Some(failure);
            }
        }
        self.refreshing = false;
    }

    /// The load was aborted before it settled.
    pub fn suspend(&mut self) {
        self.refreshing = false;
        if self.status == LoadStatus::Loading {
            self.status = LoadStatus::Idle;
        }
    }

    /// Find a loaded food by id.
    pub fn find(&self, id: u64) -> Option<&Food> {
        self.favorites.iter().find(|f| f.id == id)
    }

    /// Open the detail screen of the food at `index`.
    pub fn open(&self, index: usize, navigator: &mut dyn Navigator) -> Option<u64> {
        let food = self.favorites.get(index)?;
        navigator.navigate_to(Route::FoodDetails { id: food.id });
        Some(food.id)
    }

    /// Open the detail screen of the selected food.
    pub fn open_selected(&self, navigator: &mut dyn Navigator) -> Option<u64> {
        self.open(self.selected_index?, navigator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::MockNavigator;
    use crate::state::FailureKind;
    use mockall::predicate::eq;
    use rust_decimal_macros::dec;

    fn food(id: u64) -> Food {
        Food {
            id,
            name: format!("Food {}", id),
            description: String::new(),
            price: dec!(10),
            thumbnail_url: String::new(),
            formatted_price: "R$ 10,00".to_string(),
        }
    }

    fn loaded(ids: &[u64]) -> FavoritesState {
        let mut state = FavoritesState::default();
        state.finish_refresh(Ok(ids.iter().copied().map(food).collect()));
        state
    }

    #[test]
    fn test_every_item_opens_its_own_details() {
        let state = loaded(&[4, 15, 42]);
        for (index, food) in state.favorites.iter().enumerate() {
            let mut navigator = MockNavigator::new();
            navigator
                .expect_navigate_to()
                .with(eq(Route::FoodDetails { id: food.id }))
                .times(1)
                .return_const(());
            assert_eq!(state.open(index, &mut navigator), Some(food.id));
        }
    }

    #[test]
    fn test_open_out_of_range_does_not_navigate() {
        let state = loaded(&[1]);
        let mut navigator = MockNavigator::new();
        navigator.expect_navigate_to().never();
        assert_eq!(state.open(3, &mut navigator), None);
    }

    #[test]
    fn test_failed_refresh_keeps_previous_list() {
        let mut state = loaded(&[1, 2]);
        state.begin_refresh();
        state.finish_refresh(Err(Failure {
            kind: FailureKind::Network,
            message: "timed out".to_string(),
        }));
        assert!(!state.refreshing);
        assert_eq!(state.status, LoadStatus::Idle);
        assert_eq!(state.favorites.len(), 2);
        assert!(state.error.is_some());
    }

    #[test]
    fn test_successful_refresh_replaces_list_and_clears_error() {
        let mut state = loaded(&[1, 2, 3]);
        state.selected_index = Some(2);
        state.error = Some(Failure {
            kind: FailureKind::Server,
            message: "500".to_string(),
        });
        state.finish_refresh(Ok(vec![food(9)]));
        assert_eq!(state.selected_index, Some(0));
        assert_eq!(state.find(9).map(|f| f.id), Some(9));
        assert!(state.error.is_none());
        assert!(state.last_updated.is_some());
    }
}
