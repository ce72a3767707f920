//! Approximate ingredient-name matching shared by the recipe filter and the
//! missing-ingredient lookup.
//!
//! Two names match when either one, lowercased, contains the other. There is
//! no tokenisation, stemming or unit handling, so "Lime" also matches
//! "Limestone" and an empty name matches everything.

use crate::pantry::InventoryIngredient;

pub fn ingredient_names_match(recipe_ingredient: &str, inventory_item: &str) -> bool {
    let a = recipe_ingredient.to_lowercase();
    let b = inventory_item.to_lowercase();
    a.contains(&b) || b.contains(&a)
}

/// Lowercased inventory names, built once per filter pass.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityIndex {
    names: Vec<String>,
}

impl AvailabilityIndex {
    pub fn new(inventory: &[InventoryIngredient]) -> Self {
        Self {
            names: inventory.iter().map(|i| i.name.to_lowercase()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn is_available(&self, ingredient_name: &str) -> bool {
        let wanted = ingredient_name.to_lowercase();
        self.names
            .iter()
            .any(|have| wanted.contains(have.as_str()) || have.contains(wanted.as_str()))
    }
}

pub fn is_available(ingredient_name: &str, inventory: &[InventoryIngredient]) -> bool {
    inventory
        .iter()
        .any(|item| ingredient_names_match(ingredient_name, &item.name))
}
