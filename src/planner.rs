//! Application state: the read-only catalog and ingredient library plus the
//! five persisted stores, all sharing one storage backend.

use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::catalog::{Catalog, Recipe, RecipeIngredient};
use crate::pantry::{IngredientLibrary, InventoryIngredient};
use crate::recommend::{filter_recipes, ingredient_availability, missing_ingredients, recommended_recipes, FilterOptions};
use crate::shopping::{items_for_ingredients, weekly_shopping_items};
use crate::store::{
    InventoryStore, KeyValueStorage, MealPlanStore, PreferenceStore, RecipeStateStore, ShoppingListStore,
    StoreError,
};

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Recipe not found: {0}")]
    RecipeNotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A recipe as shown on its detail screen.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeView {
    pub recipe: Recipe,
    pub is_favorite: bool,
    pub ingredients: Vec<IngredientStatus>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IngredientStatus {
    pub ingredient: RecipeIngredient,
    pub available: bool,
}

impl RecipeView {
    pub fn missing(&self) -> impl Iterator<Item = &RecipeIngredient> {
        self.ingredients
            .iter()
            .filter(|status| !status.available)
            .map(|status| &status.ingredient)
    }
}

pub struct Planner {
    pub catalog: Catalog,
    pub library: IngredientLibrary,
    pub preferences: PreferenceStore,
    pub inventory: InventoryStore,
    pub recipe_state: RecipeStateStore,
    pub meal_plan: MealPlanStore,
    pub shopping_list: ShoppingListStore,
}

impl Planner {
    pub fn open(
        storage: Arc<dyn KeyValueStorage>,
        catalog: Catalog,
        library: IngredientLibrary,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            catalog,
            library,
            preferences: PreferenceStore::load(storage.clone())?,
            inventory: InventoryStore::load(storage.clone())?,
            recipe_state: RecipeStateStore::load(storage.clone())?,
            meal_plan: MealPlanStore::load(storage.clone())?,
            shopping_list: ShoppingListStore::load(storage)?,
        })
    }

    /// Search with the user's filters over the whole catalog.
    pub fn search_recipes(&self, query: &str, options: &FilterOptions) -> Vec<&Recipe> {
        filter_recipes(self.catalog.recipes(), query, options, self.inventory.ingredients())
    }

    pub fn recommended_recipes(&self) -> Vec<&Recipe> {
        recommended_recipes(self.catalog.recipes(), self.preferences.preferences())
    }

    /// Opens a recipe. Only a recipe that exists is recorded as recently viewed.
    pub fn view_recipe(&mut self, id: &str) -> Result<Option<RecipeView>, StoreError> {
        let Some(recipe) = self.catalog.get(id) else {
            return Ok(None);
        };
        let ingredients = ingredient_availability(recipe, self.inventory.ingredients())
            .into_iter()
            .map(|entry| IngredientStatus {
                ingredient: entry.ingredient.clone(),
                available: entry.available,
            })
            .collect();
        let view = RecipeView {
            recipe: recipe.clone(),
            is_favorite: self.recipe_state.is_favorite(id),
            ingredients,
        };
        self.recipe_state.add_recently_viewed(id)?;
        Ok(Some(view))
    }

    /// Puts the recipe's unavailable ingredients on the shopping list.
    /// Returns how many items were generated.
    pub fn add_missing_to_shopping_list(&mut self, id: &str) -> Result<usize, PlannerError> {
        let recipe = self
            .catalog
            .get(id)
            .ok_or_else(|| PlannerError::RecipeNotFound(id.to_string()))?;
        let items = items_for_ingredients(recipe, missing_ingredients(recipe, self.inventory.ingredients()));
        let added = items.len();
        self.shopping_list.add_multiple(items)?;
        info!("Added {} missing ingredients of '{}' to the shopping list", added, recipe.name);
        Ok(added)
    }

    /// Adds every ingredient of the recipes planned that week, regardless of
    /// inventory. Returns how many items were generated before merging.
    pub fn generate_weekly_shopping_list(&mut self, week_start: NaiveDate) -> Result<usize, StoreError> {
        let items = weekly_shopping_items(&self.catalog, self.meal_plan.days(), week_start);
        let generated = items.len();
        self.shopping_list.add_multiple(items)?;
        info!("Generated {} shopping items for the week of {}", generated, week_start);
        Ok(generated)
    }

    pub fn recently_viewed_recipes(&self) -> Vec<&Recipe> {
        self.catalog.resolve(self.recipe_state.recently_viewed())
    }

    pub fn favorite_recipes(&self) -> Vec<&Recipe> {
        self.catalog.resolve(self.recipe_state.favorites())
    }

    /// Keeps the scanned ingredients the user confirmed. Returns the number new
    /// to the inventory.
    pub fn confirm_scan(&mut self, detected: Vec<InventoryIngredient>) -> Result<usize, StoreError> {
        self.inventory.add_multiple(detected)
    }
}
