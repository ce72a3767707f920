use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::io::Read;

use super::InventoryIngredient;

const BUILTIN_LIBRARY: &str = include_str!("../../data/ingredients.csv");

const ID_COL: &str = "id";
const NAME_COL: &str = "name";
const CATEGORY_COL: &str = "category";

pub const SEARCH_RESULT_LIMIT: usize = 10;
pub const SUGGESTION_LIMIT: usize = 5;
/// Suggestions need a query longer than this many characters.
const SUGGESTION_MIN_QUERY: usize = 1;

/// One entry of the known-ingredient reference list.
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryIngredient {
    pub id: String,
    pub name: String,
    pub category: String,
}

impl LibraryIngredient {
    pub fn to_inventory(&self, scanned: bool) -> InventoryIngredient {
        InventoryIngredient {
            scanned,
            ..InventoryIngredient::new(&self.id, &self.name, &self.category)
        }
    }
}

/// Reference list used for scan detection and add-ingredient suggestions.
#[derive(Debug, Clone)]
pub struct IngredientLibrary {
    items: Vec<LibraryIngredient>,
}

impl IngredientLibrary {
    pub fn builtin() -> Result<Self> {
        Self::from_csv_reader(BUILTIN_LIBRARY.as_bytes())
            .context("Failed to load the bundled ingredient library")
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
        let headers = rdr.headers()?.clone();

        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| anyhow::anyhow!("Column '{}' not found", name))
        };
        let id_idx = column(ID_COL)?;
        let name_idx = column(NAME_COL)?;
        let category_idx = column(CATEGORY_COL)?;

        let mut items = Vec::new();
        for (row_index, result) in rdr.records().enumerate() {
            let record =
                result.with_context(|| format!("Failed to read record at row index {}", row_index))?;
            let name = record.get(name_idx).unwrap_or_default().trim().to_string();
            if name.is_empty() {
                continue;
            }
            items.push(LibraryIngredient {
                id: record.get(id_idx).unwrap_or_default().trim().to_string(),
                name,
                category: record.get(category_idx).unwrap_or_default().trim().to_string(),
            });
        }

        if items.is_empty() {
            return Err(anyhow::anyhow!("No ingredients loaded from library CSV"));
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[LibraryIngredient] {
        &self.items
    }

    pub fn find_by_name(&self, name: &str) -> Option<&LibraryIngredient> {
        self.items
            .iter()
            .find(|item| item.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Name search used while confirming a scan. Empty query yields nothing.
    pub fn search(&self, query: &str) -> Vec<&LibraryIngredient> {
        if query.is_empty() {
            return Vec::new();
        }
        let query = query.to_lowercase();
        self.items
            .iter()
            .filter(|item| item.name.to_lowercase().contains(&query))
            .take(SEARCH_RESULT_LIMIT)
            .collect()
    }

    /// Up to five name or category matches that are not already in the
    /// inventory. One-character queries yield nothing.
    pub fn suggestions(&self, query: &str, inventory: &[InventoryIngredient]) -> Vec<&LibraryIngredient> {
        if query.chars().count() <= SUGGESTION_MIN_QUERY {
            return Vec::new();
        }
        let query = query.to_lowercase();
        self.items
            .iter()
            .filter(|item| !inventory.iter().any(|owned| owned.id == item.id))
            .filter(|item| {
                item.name.to_lowercase().contains(&query)
                    || item.category.to_lowercase().contains(&query)
            })
            .take(SUGGESTION_LIMIT)
            .collect()
    }
}
