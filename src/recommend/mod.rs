pub mod availability;
pub mod filter;
pub mod recommended;

pub use availability::{ingredient_availability, missing_ingredients, IngredientAvailability};
pub use filter::{available_fraction, filter_recipes, FilterOptions, AVAILABLE_INGREDIENT_THRESHOLD};
pub use recommended::{recommended_recipes, RECOMMENDATION_LIMIT};
