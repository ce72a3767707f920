//! # Persisted stores
//!
//! Each store keeps its whole state in memory and writes it back as a
//! single JSON blob after every mutation. The blob lives under a namespaced
//! key in a [`KeyValueStorage`]:
//!
//! ```text
//! planner-user-storage          -> {"state": {"preferences": {...}}, "version": 0}
//! planner-ingredients-storage   -> {"state": {"ingredients": [...]}, "version": 0}
//! planner-recipes-storage       -> {"state": {"favoriteRecipes": [...], "recentlyViewed": [...]}, "version": 0}
//! planner-meal-plan-storage     -> {"state": {"mealPlan": [...]}, "version": 0}
//! planner-shopping-list-storage -> {"state": {"items": [...]}, "version": 0}
//! ```
//!
//! A blob that cannot be parsed is replaced by the default state.

pub mod inventory;
pub mod meal_plan;
pub mod preferences;
pub mod recipe_state;
pub mod shopping_list;
pub mod storage;

pub use inventory::InventoryStore;
pub use meal_plan::MealPlanStore;
pub use preferences::PreferenceStore;
pub use recipe_state::RecipeStateStore;
pub use shopping_list::ShoppingListStore;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

const STATE_VERSION: u32 = 0;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage I/O failed for {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize state for '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Storage lock poisoned")]
    Poisoned,
}

#[derive(Serialize)]
struct BlobRef<'a, S> {
    state: &'a S,
    version: u32,
}

#[derive(Deserialize)]
struct Blob<S> {
    state: S,
    #[serde(default)]
    #[allow(dead_code)]
    version: u32,
}

/// Whole-state persistence shared by every store.
pub struct PersistedStore<S> {
    storage: Arc<dyn KeyValueStorage>,
    key: &'static str,
    state: S,
}

impl<S> PersistedStore<S>
where
    S: Serialize + DeserializeOwned + Default + Clone,
{
    pub fn load(storage: Arc<dyn KeyValueStorage>, key: &'static str) -> Result<Self, StoreError> {
        let state = match storage.get(key)? {
            Some(raw) => match serde_json::from_str::<Blob<S>>(&raw) {
                Ok(blob) => {
                    debug!("Loaded '{}' from storage", key);
                    blob.state
                }
                Err(e) => {
                    warn!("Stored state for '{}' is unreadable ({}); starting from defaults", key, e);
                    S::default()
                }
            },
            None => S::default(),
        };
        Ok(Self { storage, key, state })
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// Applies `change` to a copy of the state, persists the copy, then
    /// swaps it in. A failed write leaves the in-memory state untouched.
    pub fn mutate<R>(&mut self, change: impl FnOnce(&mut S) -> R) -> Result<R, StoreError> {
        let mut next = self.state.clone();
        let result = change(&mut next);
        self.write(&next)?;
        self.state = next;
        Ok(result)
    }

    fn write(&self, state: &S) -> Result<(), StoreError> {
        let blob = BlobRef {
            state,
            version: STATE_VERSION,
        };
        let raw = serde_json::to_string(&blob).map_err(|source| StoreError::Serialize {
            key: self.key.to_string(),
            source,
        })?;
        self.storage.set(self.key, &raw)?;
        debug!("Persisted '{}' ({} bytes)", self.key, raw.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Counter {
        count: u32,
    }

    #[test]
    fn test_missing_blob_loads_default() -> Result<()> {
        let storage: Arc<dyn KeyValueStorage> = Arc::new(MemoryStorage::new());
        let store = PersistedStore::<Counter>::load(storage, "counter")?;
        assert_eq!(store.state(), &Counter::default());
        Ok(())
    }

    #[test]
    fn test_mutation_persists_envelope() -> Result<()> {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = PersistedStore::<Counter>::load(storage.clone(), "counter")?;
        store.mutate(|s| s.count += 2)?;

        let raw = storage.get("counter")?.unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw)?;
        assert_eq!(value["state"]["count"], 2);
        assert_eq!(value["version"], 0);

        let reloaded = PersistedStore::<Counter>::load(storage, "counter")?;
        assert_eq!(reloaded.state().count, 2);
        Ok(())
    }

    #[test]
    fn test_corrupt_blob_resets_to_default() -> Result<()> {
        let storage = Arc::new(MemoryStorage::new());
        storage.set("counter", "{not json")?;
        let store = PersistedStore::<Counter>::load(storage.clone(), "counter")?;
        assert_eq!(store.state().count, 0);

        storage.set("counter", r#"{"state": {"count": "seven"}}"#)?;
        let store = PersistedStore::<Counter>::load(storage, "counter")?;
        assert_eq!(store.state().count, 0);
        Ok(())
    }
}
