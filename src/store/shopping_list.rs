use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{KeyValueStorage, PersistedStore, StoreError};
use crate::shopping::{merge_items, ShoppingItem, ShoppingItemUpdate};

pub const SHOPPING_LIST_KEY: &str = "planner-shopping-list-storage";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct ShoppingListState {
    items: Vec<ShoppingItem>,
}

pub struct ShoppingListStore {
    inner: PersistedStore<ShoppingListState>,
}

impl ShoppingListStore {
    pub fn load(storage: Arc<dyn KeyValueStorage>) -> Result<Self, StoreError> {
        Ok(Self {
            inner: PersistedStore::load(storage, SHOPPING_LIST_KEY)?,
        })
    }

    pub fn items(&self) -> &[ShoppingItem] {
        &self.inner.state().items
    }

    /// Plain append, no merging.
    pub fn add_item(&mut self, item: ShoppingItem) -> Result<(), StoreError> {
        self.inner.mutate(|state| state.items.push(item))
    }

    pub fn remove_item(&mut self, id: &str) -> Result<bool, StoreError> {
        self.inner.mutate(|state| {
            let before = state.items.len();
            state.items.retain(|item| item.id != id);
            state.items.len() != before
        })
    }

    pub fn update_item(&mut self, id: &str, update: &ShoppingItemUpdate) -> Result<(), StoreError> {
        self.inner.mutate(|state| {
            state
                .items
                .iter_mut()
                .filter(|item| item.id == id)
                .for_each(|item| update.apply_to(item));
        })
    }

    pub fn toggle_checked(&mut self, id: &str) -> Result<(), StoreError> {
        self.inner.mutate(|state| {
            state
                .items
                .iter_mut()
                .filter(|item| item.id == id)
                .for_each(|item| item.checked = !item.checked);
        })
    }

    /// Returns how many items were removed.
    pub fn clear_checked(&mut self) -> Result<usize, StoreError> {
        self.inner.mutate(|state| {
            let before = state.items.len();
            state.items.retain(|item| !item.checked);
            before - state.items.len()
        })
    }

    pub fn clear_all(&mut self) -> Result<(), StoreError> {
        self.inner.mutate(|state| state.items.clear())
    }

    /// Consolidates `items` into the list (see `merge_items`).
    pub fn add_multiple(&mut self, items: Vec<ShoppingItem>) -> Result<(), StoreError> {
        self.inner
            .mutate(|state| state.items = merge_items(&state.items, items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shopping::item;
    use crate::store::MemoryStorage;
    use anyhow::Result;

    #[test]
    fn test_add_multiple_merges_and_persists() -> Result<()> {
        let storage: Arc<dyn KeyValueStorage> = Arc::new(MemoryStorage::new());
        let mut list = ShoppingListStore::load(storage.clone())?;
        list.add_item(item("1", "Eggs", Some(2.0)))?;
        list.add_multiple(vec![item("2", "eggs", Some(3.0)), item("3", "Milk", None)])?;

        let reloaded = ShoppingListStore::load(storage)?;
        assert_eq!(
            reloaded.items(),
            &[item("1", "Eggs", Some(5.0)), item("3", "Milk", None)]
        );
        Ok(())
    }

    #[test]
    fn test_check_and_clear_checked() -> Result<()> {
        let mut list = ShoppingListStore::load(Arc::new(MemoryStorage::new()))?;
        list.add_item(item("1", "Eggs", None))?;
        list.add_item(item("2", "Milk", None))?;
        list.toggle_checked("1")?;
        assert!(list.items()[0].checked);

        assert_eq!(list.clear_checked()?, 1);
        assert_eq!(list.items().len(), 1);
        assert_eq!(list.items()[0].id, "2");

        list.update_item(
            "2",
            &ShoppingItemUpdate {
                quantity: Some(2.0),
                ..Default::default()
            },
        )?;
        assert_eq!(list.items()[0].quantity, Some(2.0));
        assert!(list.remove_item("2")?);
        list.add_item(item("4", "Tea", None))?;
        list.clear_all()?;
        assert!(list.items().is_empty());
        Ok(())
    }
}
