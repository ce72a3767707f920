pub mod consolidate;
pub mod weekly;

pub use consolidate::{items_for_ingredients, merge_items, unit_from_amount};
pub use weekly::{start_of_week, week_dates, weekly_recipe_ids, weekly_shopping_items};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Category shown for items that carry none.
pub const DEFAULT_CATEGORY: &str = "Other";
/// Category given to items generated from recipes.
pub const GENERATED_CATEGORY: &str = "grocery";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItem {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub category: Option<String>,
    #[serde(default)]
    pub checked: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub recipe_id: Option<String>,
}

impl ShoppingItem {
    /// A hand-entered item: name only, id from the current time.
    pub fn manual(name: &str) -> Self {
        Self {
            id: chrono::Utc::now().timestamp_millis().to_string(),
            name: name.trim().to_string(),
            quantity: None,
            unit: None,
            category: None,
            checked: false,
            recipe_id: None,
        }
    }

    pub fn category_or_default(&self) -> &str {
        self.category.as_deref().unwrap_or(DEFAULT_CATEGORY)
    }
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ShoppingItemUpdate {
    pub name: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub category: Option<String>,
    pub checked: Option<bool>,
}

impl ShoppingItemUpdate {
    pub fn apply_to(&self, item: &mut ShoppingItem) {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(quantity) = self.quantity {
            item.quantity = Some(quantity);
        }
        if let Some(unit) = &self.unit {
            item.unit = Some(unit.clone());
        }
        if let Some(category) = &self.category {
            item.category = Some(category.clone());
        }
        if let Some(checked) = self.checked {
            item.checked = checked;
        }
    }
}

/// Items whose name contains `search` (case-insensitive), grouped by
/// category with categories in sorted order.
pub fn group_by_category<'a>(items: &'a [ShoppingItem], search: &str) -> BTreeMap<String, Vec<&'a ShoppingItem>> {
    let search = search.to_lowercase();
    let mut groups: BTreeMap<String, Vec<&ShoppingItem>> = BTreeMap::new();
    for item in items
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&search))
    {
        groups
            .entry(item.category_or_default().to_string())
            .or_default()
            .push(item);
    }
    groups
}

#[cfg(test)]
pub(crate) fn item(id: &str, name: &str, quantity: Option<f64>) -> ShoppingItem {
    ShoppingItem {
        id: id.to_string(),
        name: name.to_string(),
        quantity,
        unit: None,
        category: None,
        checked: false,
        recipe_id: None,
    }
}
