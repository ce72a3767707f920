//! Shopping-list consolidation: merge by case-insensitive name, summing quantities.

use std::collections::HashMap;

use super::{ShoppingItem, GENERATED_CATEGORY};
use crate::catalog::{Recipe, RecipeIngredient};

/// Merges `incoming` into `existing`.
///
/// An incoming item whose lowercased name matches an existing item adds its
/// quantity (missing or zero counts as 1) to that item; the existing item's other
/// fields are kept and the incoming item's are dropped. Unmatched items are
/// appended unchanged. Only names already in `existing` are matched, so two
/// new items with the same name both get appended.
pub fn merge_items(existing: &[ShoppingItem], incoming: Vec<ShoppingItem>) -> Vec<ShoppingItem> {
    let mut merged = existing.to_vec();

    let mut by_name: HashMap<String, usize> = HashMap::new();
    for (idx, item) in existing.iter().enumerate() {
        by_name.entry(item.name.to_lowercase()).or_insert(idx);
    }

    for item in incoming {
        match by_name.get(&item.name.to_lowercase()) {
            Some(&idx) => {
                let target = &mut merged[idx];
                target.quantity = Some(target.quantity.unwrap_or(0.0) + incoming_quantity(&item));
            }
            None => merged.push(item),
        }
    }
    merged
}

fn incoming_quantity(item: &ShoppingItem) -> f64 {
    match item.quantity {
        Some(quantity) if quantity != 0.0 && !quantity.is_nan() => quantity,
        _ => 1.0,
    }
}

/// Last whitespace-separated token of a free-text amount ("2 cups" -> "cups").
pub fn unit_from_amount(amount: &str) -> Option<String> {
    amount.split_whitespace().last().map(str::to_string)
}

/// Shopping entries for some of a recipe's ingredients. Quantity is always 1;
/// the textual amount only contributes its unit label.
pub fn items_for_ingredients<'a, I>(recipe: &Recipe, ingredients: I) -> Vec<ShoppingItem>
where
    I: IntoIterator<Item = &'a RecipeIngredient>,
{
    ingredients
        .into_iter()
        .map(|ingredient| ShoppingItem {
            id: format!("{}-{}", recipe.id, ingredient.id),
            name: ingredient.name.clone(),
            quantity: Some(1.0),
            unit: unit_from_amount(&ingredient.amount),
            category: Some(GENERATED_CATEGORY.to_string()),
            checked: false,
            recipe_id: Some(recipe.id.clone()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::recipe;
    use crate::shopping::item;

    #[test]
    fn test_case_insensitive_merge_keeps_display_name() {
        let existing = vec![item("1", "Eggs", Some(2.0))];
        let merged = merge_items(&existing, vec![item("2", "eggs", Some(3.0))]);
        assert_eq!(merged, vec![item("1", "Eggs", Some(5.0))]);
    }

    #[test]
    fn test_missing_quantities_default() {
        let existing = vec![item("1", "Milk", None)];
        let merged = merge_items(&existing, vec![item("2", "MILK", None)]);
        assert_eq!(merged[0].quantity, Some(1.0));
    }

    #[test]
    fn test_zero_incoming_quantity_counts_as_one() {
        let existing = vec![item("1", "Eggs", Some(2.0))];
        let merged = merge_items(&existing, vec![item("2", "eggs", Some(0.0))]);
        assert_eq!(merged[0].quantity, Some(3.0));
    }

    #[test]
    fn test_existing_metadata_wins() {
        let mut existing = item("1", "Rice", Some(1.0));
        existing.category = Some("Pantry".into());
        existing.unit = Some("bag".into());
        existing.checked = true;
        let mut incoming = item("r-1", "rice", Some(1.0));
        incoming.category = Some("grocery".into());
        incoming.unit = Some("cups".into());
        incoming.recipe_id = Some("r".into());

        let merged = merge_items(&[existing.clone()], vec![incoming]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].id, "1");
        assert_eq!(merged[0].category.as_deref(), Some("Pantry"));
        assert_eq!(merged[0].unit.as_deref(), Some("bag"));
        assert!(merged[0].checked);
        assert_eq!(merged[0].recipe_id, None);
        assert_eq!(merged[0].quantity, Some(2.0));
    }

    fn with_metadata(mut shopping_item: ShoppingItem, unit: &str, category: &str, recipe_id: &str) -> ShoppingItem {
        shopping_item.unit = Some(unit.into());
        shopping_item.category = Some(category.into());
        shopping_item.recipe_id = Some(recipe_id.into());
        shopping_item
    }

    #[test]
    fn test_totals_and_metadata_independent_of_incoming_order() {
        let eggs = with_metadata(item("1", "Eggs", Some(1.0)), "dozen", "Dairy", "2");
        let oats = item("2", "Oats", None);
        let existing = vec![eggs.clone(), oats.clone()];
        let incoming = vec![
            with_metadata(item("a", "eggs", Some(2.0)), "large", "grocery", "9"),
            with_metadata(item("b", "OATS", Some(4.0)), "cups", "Grains", "10"),
            with_metadata(item("c", "Eggs", None), "whole", "Protein", "3"),
        ];
        let mut reversed = incoming.clone();
        reversed.reverse();

        let forward = merge_items(&existing, incoming);
        let backward = merge_items(&existing, reversed);
        assert_eq!(forward, backward);
        assert_eq!(forward.len(), 2);
        assert_eq!(forward[0], ShoppingItem { quantity: Some(4.0), ..eggs });
        assert_eq!(forward[1], ShoppingItem { quantity: Some(4.0), ..oats });
    }

    #[test]
    fn test_unmatched_items_appended_without_self_merge() {
        let merged = merge_items(
            &[],
            vec![item("a", "Olive Oil", Some(1.0)), item("b", "olive oil", Some(1.0))],
        );
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[1].id, "b");
    }

    #[test]
    fn test_first_existing_match_receives_quantity() {
        let existing = vec![item("1", "Salt", Some(1.0)), item("2", "salt", Some(1.0))];
        let merged = merge_items(&existing, vec![item("3", "SALT", Some(2.0))]);
        assert_eq!(merged[0].quantity, Some(3.0));
        assert_eq!(merged[1].quantity, Some(1.0));
    }

    #[test]
    fn test_unit_is_last_token() {
        assert_eq!(unit_from_amount("2 cups").as_deref(), Some("cups"));
        assert_eq!(unit_from_amount("1/2 whole").as_deref(), Some("whole"));
        assert_eq!(unit_from_amount("3").as_deref(), Some("3"));
        assert_eq!(unit_from_amount("  "), None);
    }

    #[test]
    fn test_items_for_ingredients_shape() {
        let r = recipe("7", "Chili", &["Beans", "Tomatoes"]);
        let items = items_for_ingredients(&r, &r.ingredients);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "7-1");
        assert_eq!(items[0].quantity, Some(1.0));
        assert_eq!(items[0].unit.as_deref(), Some("cup"));
        assert_eq!(items[0].category.as_deref(), Some("grocery"));
        assert_eq!(items[1].recipe_id.as_deref(), Some("7"));
    }
}
