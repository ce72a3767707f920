use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

/// Meals assigned to one calendar date. Recipes are referenced by id only;
/// an id may no longer exist in the catalog.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MealPlanDay {
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub breakfast: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub lunch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub dinner: Option<String>,
    #[serde(default)]
    pub snacks: Vec<String>,
}

impl MealPlanDay {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            breakfast: None,
            lunch: None,
            dinner: None,
            snacks: Vec::new(),
        }
    }

    pub fn slot(&self, slot: MealSlot) -> Option<&str> {
        match slot {
            MealSlot::Breakfast => self.breakfast.as_deref(),
            MealSlot::Lunch => self.lunch.as_deref(),
            MealSlot::Dinner => self.dinner.as_deref(),
        }
    }

    pub fn set_slot(&mut self, slot: MealSlot, recipe_id: Option<String>) {
        match slot {
            MealSlot::Breakfast => self.breakfast = recipe_id,
            MealSlot::Lunch => self.lunch = recipe_id,
            MealSlot::Dinner => self.dinner = recipe_id,
        }
    }

    /// Breakfast, lunch, dinner then snacks, skipping unset and blank ids.
    pub fn recipe_ids(&self) -> impl Iterator<Item = &str> {
        [&self.breakfast, &self.lunch, &self.dinner]
            .into_iter()
            .filter_map(|id| id.as_deref())
            .chain(self.snacks.iter().map(String::as_str))
            .filter(|id| !id.is_empty())
    }
}

/// The stored day for `date`, or an empty one.
pub fn day_for(plan: &[MealPlanDay], date: NaiveDate) -> MealPlanDay {
    plan.iter()
        .find(|day| day.date == date)
        .cloned()
        .unwrap_or_else(|| MealPlanDay::empty(date))
}
