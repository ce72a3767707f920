use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{KeyValueStorage, PersistedStore, StoreError};
use crate::pantry::{IngredientUpdate, InventoryIngredient};

pub const INVENTORY_KEY: &str = "planner-ingredients-storage";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct InventoryState {
    ingredients: Vec<InventoryIngredient>,
}

/// The user's available ingredients. Nothing expires on its own; items
/// leave only through `remove` or `clear`.
pub struct InventoryStore {
    inner: PersistedStore<InventoryState>,
}

impl InventoryStore {
    pub fn load(storage: Arc<dyn KeyValueStorage>) -> Result<Self, StoreError> {
        Ok(Self {
            inner: PersistedStore::load(storage, INVENTORY_KEY)?,
        })
    }

    pub fn ingredients(&self) -> &[InventoryIngredient] {
        &self.inner.state().ingredients
    }

    pub fn add(&mut self, ingredient: InventoryIngredient) -> Result<(), StoreError> {
        self.inner.mutate(|state| state.ingredients.push(ingredient))
    }

    /// Returns whether an ingredient was removed.
    pub fn remove(&mut self, id: &str) -> Result<bool, StoreError> {
        self.inner.mutate(|state| {
            let before = state.ingredients.len();
            state.ingredients.retain(|i| i.id != id);
            state.ingredients.len() != before
        })
    }

    pub fn update(&mut self, id: &str, update: &IngredientUpdate) -> Result<(), StoreError> {
        self.inner.mutate(|state| {
            state
                .ingredients
                .iter_mut()
                .filter(|i| i.id == id)
                .for_each(|i| update.apply_to(i));
        })
    }

    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.inner.mutate(|state| state.ingredients.clear())
    }

    /// Appends the ingredients whose id is not already present. Returns the
    /// number added.
    pub fn add_multiple(&mut self, ingredients: Vec<InventoryIngredient>) -> Result<usize, StoreError> {
        self.inner.mutate(|state| {
            let fresh: Vec<InventoryIngredient> = ingredients
                .into_iter()
                .filter(|new| !state.ingredients.iter().any(|owned| owned.id == new.id))
                .collect();
            let added = fresh.len();
            state.ingredients.extend(fresh);
            added
        })
    }

    /// Name or category contains `query`, case-insensitively.
    pub fn search(&self, query: &str) -> Vec<&InventoryIngredient> {
        let query = query.to_lowercase();
        self.ingredients()
            .iter()
            .filter(|i| {
                i.name.to_lowercase().contains(&query) || i.category.to_lowercase().contains(&query)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStorage;
    use anyhow::Result;

    fn store() -> Result<InventoryStore> {
        Ok(InventoryStore::load(Arc::new(MemoryStorage::new()))?)
    }

    #[test]
    fn test_add_multiple_skips_known_ids() -> Result<()> {
        let mut inventory = store()?;
        inventory.add(InventoryIngredient::new("5", "Eggs", "Protein"))?;
        let added = inventory.add_multiple(vec![
            InventoryIngredient::new("5", "Eggs", "Protein"),
            InventoryIngredient::new("9", "Milk", "Dairy"),
        ])?;
        assert_eq!(added, 1);
        let names: Vec<&str> = inventory.ingredients().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Eggs", "Milk"]);
        Ok(())
    }

    #[test]
    fn test_remove_update_and_search() -> Result<()> {
        let mut inventory = store()?;
        inventory.add(InventoryIngredient::new("1", "Chicken Breast", "Protein"))?;
        inventory.add(InventoryIngredient::new("9", "Milk", "Dairy"))?;

        inventory.update(
            "9",
            &IngredientUpdate {
                quantity: Some(2.0),
                unit: Some("l".into()),
                ..Default::default()
            },
        )?;
        assert_eq!(inventory.ingredients()[1].quantity, Some(2.0));
        assert_eq!(inventory.search("dairy").len(), 1);
        assert_eq!(inventory.search("CHICK")[0].id, "1");

        assert!(inventory.remove("1")?);
        assert!(!inventory.remove("1")?);
        inventory.clear()?;
        assert!(inventory.ingredients().is_empty());
        Ok(())
    }
}
