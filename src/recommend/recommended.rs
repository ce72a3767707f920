use crate::catalog::Recipe;
use crate::preferences::UserPreferences;

pub const RECOMMENDATION_LIMIT: usize = 5;

/// Home-screen picks: recipes meeting every dietary restriction and the
/// cooking-time budget, first five in catalog order. No scoring.
pub fn recommended_recipes<'a>(recipes: &'a [Recipe], preferences: &UserPreferences) -> Vec<&'a Recipe> {
    let budget = preferences.cooking_time.and_then(|time| time.time_budget());
    recipes
        .iter()
        .filter(|recipe| recipe.satisfies_all(&preferences.dietary_restrictions))
        .filter(|recipe| budget.map_or(true, |minutes| recipe.total_time() <= minutes))
        .take(RECOMMENDATION_LIMIT)
        .collect()
}
