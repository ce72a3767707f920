use serde::{Deserialize, Serialize};

use crate::catalog::{Difficulty, MealType, Recipe};
use crate::matching::AvailabilityIndex;
use crate::pantry::InventoryIngredient;
use crate::preferences::UserPreferences;

/// Share of a recipe's ingredients the user must have for
/// "use available ingredients" to keep it.
pub const AVAILABLE_INGREDIENT_THRESHOLD: f64 = 0.7;

/// Explicit filters chosen on the recipe browser.
///
/// Empty sets and zero limits mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterOptions {
    pub meal_types: Vec<MealType>,
    pub difficulties: Vec<Difficulty>,
    /// Every listed restriction must be satisfied.
    pub dietary_restrictions: Vec<String>,
    /// Prep + cook minutes; 0 disables the limit.
    pub max_time: u32,
    /// 0 disables the limit.
    pub max_calories: u32,
    pub use_available_ingredients: bool,
}

impl FilterOptions {
    /// Starting (and "reset") filters: the user's dietary restrictions, nothing else.
    pub fn seeded_from(preferences: &UserPreferences) -> Self {
        Self {
            dietary_restrictions: preferences.dietary_restrictions.clone(),
            ..Default::default()
        }
    }

    pub fn active_count(&self) -> usize {
        [
            !self.meal_types.is_empty(),
            !self.difficulties.is_empty(),
            !self.dietary_restrictions.is_empty(),
            self.max_time > 0,
            self.max_calories > 0,
            self.use_available_ingredients,
        ]
        .iter()
        .filter(|active| **active)
        .count()
    }
}

/// Applies the search query and every active filter, keeping catalog order.
pub fn filter_recipes<'a>(
    recipes: &'a [Recipe],
    query: &str,
    options: &FilterOptions,
    inventory: &[InventoryIngredient],
) -> Vec<&'a Recipe> {
    let query = query.to_lowercase();
    let index = AvailabilityIndex::new(inventory);
    let check_availability = options.use_available_ingredients && !index.is_empty();

    recipes
        .iter()
        .filter(|recipe| query.is_empty() || matches_query(recipe, &query))
        .filter(|recipe| {
            options.meal_types.is_empty()
                || recipe.meal_type.iter().any(|t| options.meal_types.contains(t))
        })
        .filter(|recipe| {
            options.difficulties.is_empty() || options.difficulties.contains(&recipe.difficulty)
        })
        .filter(|recipe| recipe.satisfies_all(&options.dietary_restrictions))
        .filter(|recipe| options.max_time == 0 || recipe.total_time() <= options.max_time)
        .filter(|recipe| options.max_calories == 0 || recipe.calories <= options.max_calories)
        .filter(|recipe| {
            !check_availability
                || available_fraction(recipe, &index)
                    .map_or(true, |fraction| fraction >= AVAILABLE_INGREDIENT_THRESHOLD)
        })
        .collect()
}

fn matches_query(recipe: &Recipe, lowercase_query: &str) -> bool {
    recipe.name.to_lowercase().contains(lowercase_query)
        || recipe
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(lowercase_query))
}

/// Fraction of the recipe's ingredients found in the inventory.
/// `None` when the recipe lists no ingredients; callers treat that as a pass.
pub fn available_fraction(recipe: &Recipe, index: &AvailabilityIndex) -> Option<f64> {
    if recipe.ingredients.is_empty() {
        return None;
    }
    let have = recipe
        .ingredients
        .iter()
        .filter(|ingredient| index.is_available(&ingredient.name))
        .count();
    Some(have as f64 / recipe.ingredients.len() as f64)
}
