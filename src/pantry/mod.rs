pub mod library;
pub mod scanner;

pub use library::{IngredientLibrary, LibraryIngredient};
pub use scanner::IngredientScanner;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An ingredient the user reports having on hand.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryIngredient {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub scanned: bool,
}

impl InventoryIngredient {
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            quantity: None,
            unit: None,
            expiry_date: None,
            image_url: None,
            scanned: false,
        }
    }
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct IngredientUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub expiry_date: Option<NaiveDate>,
}

impl IngredientUpdate {
    pub fn apply_to(&self, ingredient: &mut InventoryIngredient) {
        if let Some(name) = &self.name {
            ingredient.name = name.clone();
        }
        if let Some(category) = &self.category {
            ingredient.category = category.clone();
        }
        if let Some(quantity) = self.quantity {
            ingredient.quantity = Some(quantity);
        }
        if let Some(unit) = &self.unit {
            ingredient.unit = Some(unit.clone());
        }
        if let Some(expiry) = self.expiry_date {
            ingredient.expiry_date = Some(expiry);
        }
    }
}
