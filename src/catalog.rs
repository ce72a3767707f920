use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

const BUILTIN_CATALOG: &str = include_str!("../data/recipes.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Dessert,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RecipeIngredient {
    pub id: String,
    pub name: String,
    /// Free-text quantity and unit, e.g. "2 cups". Never parsed into a number.
    pub amount: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub prep_time: u32,
    pub cook_time: u32,
    pub servings: u32,
    pub calories: u32,
    pub protein: f32,
    pub carbs: f32,
    pub fat: f32,
    pub ingredients: Vec<RecipeIngredient>,
    pub instructions: Vec<String>,
    pub tags: Vec<String>,
    pub difficulty: Difficulty,
    pub meal_type: Vec<MealType>,
    pub dietary_restrictions: Vec<String>,
}

impl Recipe {
    /// Prep plus cook time, in minutes.
    pub fn total_time(&self) -> u32 {
        self.prep_time + self.cook_time
    }

    pub fn satisfies_all(&self, restrictions: &[String]) -> bool {
        restrictions
            .iter()
            .all(|restriction| self.dietary_restrictions.contains(restriction))
    }

    pub fn share_message(&self) -> String {
        format!(
            "Check out this recipe for {}! It takes {} minutes to make and has {} calories.",
            self.name,
            self.total_time(),
            self.calories
        )
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Catalog is not valid recipe JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Duplicate recipe id in catalog: {0}")]
    DuplicateId(String),
}

/// The read-only universe of recipes, kept in catalog order.
#[derive(Debug, Clone)]
pub struct Catalog {
    recipes: Vec<Recipe>,
}

impl Catalog {
    pub fn new(recipes: Vec<Recipe>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for recipe in &recipes {
            if !seen.insert(recipe.id.as_str()) {
                return Err(CatalogError::DuplicateId(recipe.id.clone()));
            }
        }
        Ok(Self { recipes })
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let recipes: Vec<Recipe> = serde_json::from_str(json)?;
        Self::new(recipes)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.id == id)
    }

    /// Looks up each id in order. Ids with no recipe are dropped.
    pub fn resolve<'a, I, S>(&'a self, ids: I) -> Vec<&'a Recipe>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ids.into_iter()
            .filter_map(|id| self.get(id.as_ref()))
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn recipe(id: &str, name: &str, ingredients: &[&str]) -> Recipe {
        Recipe {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            image_url: String::new(),
            prep_time: 10,
            cook_time: 10,
            servings: 2,
            calories: 400,
            protein: 20.0,
            carbs: 40.0,
            fat: 10.0,
            ingredients: ingredients
                .iter()
                .enumerate()
                .map(|(idx, name)| RecipeIngredient {
                    id: (idx + 1).to_string(),
                    name: name.to_string(),
                    amount: "1 cup".to_string(),
                })
                .collect(),
            instructions: vec![],
            tags: vec![],
            difficulty: Difficulty::Easy,
            meal_type: vec![MealType::Dinner],
            dietary_restrictions: vec![],
        }
    }
}
