use chrono::{Datelike, Duration, NaiveDate};

use super::consolidate::items_for_ingredients;
use super::ShoppingItem;
use crate::catalog::Catalog;
use crate::meal_plan::{day_for, MealPlanDay};

/// The Sunday on or before `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

pub fn week_dates(week_start: NaiveDate) -> Vec<NaiveDate> {
    (0..7).map(|offset| week_start + Duration::days(offset)).collect()
}

/// Every recipe id planned in the week starting at `week_start`,
/// de-duplicated in first-seen order.
pub fn weekly_recipe_ids(plan: &[MealPlanDay], week_start: NaiveDate) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for date in week_dates(week_start) {
        let day = day_for(plan, date);
        for id in day.recipe_ids() {
            if !ids.iter().any(|seen| seen == id) {
                ids.push(id.to_string());
            }
        }
    }
    ids
}

/// All ingredients of all recipes planned that week, one item each. No
/// inventory check is made; unknown recipe ids are skipped. Feed the result
/// through `merge_items` to consolidate.
pub fn weekly_shopping_items(catalog: &Catalog, plan: &[MealPlanDay], week_start: NaiveDate) -> Vec<ShoppingItem> {
    catalog
        .resolve(weekly_recipe_ids(plan, week_start))
        .into_iter()
        .flat_map(|recipe| items_for_ingredients(recipe, &recipe.ingredients))
        .collect()
}
