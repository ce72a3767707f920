use crate::catalog::{Recipe, RecipeIngredient};
use crate::matching::AvailabilityIndex;
use crate::pantry::InventoryIngredient;

#[derive(Debug, Clone, PartialEq)]
pub struct IngredientAvailability<'a> {
    pub ingredient: &'a RecipeIngredient,
    pub available: bool,
}

/// Marks each recipe ingredient as in stock or not. With an empty
/// inventory nothing is available.
pub fn ingredient_availability<'a>(
    recipe: &'a Recipe,
    inventory: &[InventoryIngredient],
) -> Vec<IngredientAvailability<'a>> {
    let index = AvailabilityIndex::new(inventory);
    recipe
        .ingredients
        .iter()
        .map(|ingredient| IngredientAvailability {
            ingredient,
            available: index.is_available(&ingredient.name),
        })
        .collect()
}

pub fn missing_ingredients<'a>(
    recipe: &'a Recipe,
    inventory: &[InventoryIngredient],
) -> Vec<&'a RecipeIngredient> {
    ingredient_availability(recipe, inventory)
        .into_iter()
        .filter(|entry| !entry.available)
        .map(|entry| entry.ingredient)
        .collect()
}
