use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{KeyValueStorage, PersistedStore, StoreError};

pub const RECIPE_STATE_KEY: &str = "planner-recipes-storage";
pub const RECENTLY_VIEWED_LIMIT: usize = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RecipeState {
    favorite_recipes: Vec<String>,
    recently_viewed: Vec<String>,
}

/// Favourites and recently viewed recipes, by id.
pub struct RecipeStateStore {
    inner: PersistedStore<RecipeState>,
}

impl RecipeStateStore {
    pub fn load(storage: Arc<dyn KeyValueStorage>) -> Result<Self, StoreError> {
        Ok(Self {
            inner: PersistedStore::load(storage, RECIPE_STATE_KEY)?,
        })
    }

    pub fn favorites(&self) -> &[String] {
        &self.inner.state().favorite_recipes
    }

    pub fn recently_viewed(&self) -> &[String] {
        &self.inner.state().recently_viewed
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites().iter().any(|fav| fav == id)
    }

    pub fn add_favorite(&mut self, id: &str) -> Result<(), StoreError> {
        if self.is_favorite(id) {
            return Ok(());
        }
        self.inner
            .mutate(|state| state.favorite_recipes.push(id.to_string()))
    }

    pub fn remove_favorite(&mut self, id: &str) -> Result<(), StoreError> {
        self.inner
            .mutate(|state| state.favorite_recipes.retain(|fav| fav != id))
    }

    /// Returns the new favourite flag.
    pub fn toggle_favorite(&mut self, id: &str) -> Result<bool, StoreError> {
        if self.is_favorite(id) {
            self.remove_favorite(id)?;
            Ok(false)
        } else {
            self.add_favorite(id)?;
            Ok(true)
        }
    }

    /// Moves `id` to the front, most recent first, keeping at most ten.
    pub fn add_recently_viewed(&mut self, id: &str) -> Result<(), StoreError> {
        self.inner.mutate(|state| {
            state.recently_viewed.retain(|seen| seen != id);
            state.recently_viewed.insert(0, id.to_string());
            state.recently_viewed.truncate(RECENTLY_VIEWED_LIMIT);
        })
    }

    pub fn clear_recently_viewed(&mut self) -> Result<(), StoreError> {
        self.inner.mutate(|state| state.recently_viewed.clear())
    }
}
