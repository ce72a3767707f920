use anyhow::Result;
use chrono::NaiveDate;
use std::sync::Arc;
use tempfile::TempDir;

use recipe_planner::assistant::{AssistantClient, Conversation, Role, FALLBACK_MESSAGE};
use recipe_planner::catalog::Catalog;
use recipe_planner::meal_plan::MealSlot;
use recipe_planner::onboarding::OnboardingAnswers;
use recipe_planner::pantry::{IngredientLibrary, IngredientScanner, InventoryIngredient};
use recipe_planner::planner::Planner;
use recipe_planner::preferences::{CookingTime, Goal};
use recipe_planner::recommend::FilterOptions;
use recipe_planner::shopping::start_of_week;
use recipe_planner::store::{FileStorage, KeyValueStorage};

fn open(dir: &TempDir) -> Result<Planner> {
    let storage: Arc<dyn KeyValueStorage> = Arc::new(FileStorage::new(dir.path()));
    Ok(Planner::open(storage, Catalog::builtin()?, IngredientLibrary::builtin()?)?)
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[tokio::test]
async fn test_state_survives_reopen() -> Result<()> {
    let dir = TempDir::new()?;
    {
        let mut planner = open(&dir)?;
        let update = OnboardingAnswers {
            goal: Some(Goal::HealthyEating),
            dietary_restrictions: vec!["vegetarian".into(), "none".into()],
            cooking_time: Some(CookingTime::Medium),
            flavor_preferences: vec![],
        }
        .complete()?;
        planner.preferences.update(&update)?;
        planner.inventory.add(InventoryIngredient::new("5", "Eggs", "Protein"))?;
        planner.recipe_state.add_favorite("2")?;
        planner.meal_plan.set_meal(date("2024-05-01"), MealSlot::Dinner, Some("8".into()))?;
        planner.add_missing_to_shopping_list("2")?;
    }

    let planner = open(&dir)?;
    let prefs = planner.preferences.preferences();
    assert!(prefs.onboarding_completed);
    assert_eq!(prefs.dietary_restrictions, vec!["vegetarian".to_string()]);
    assert_eq!(planner.inventory.ingredients().len(), 1);
    assert!(planner.recipe_state.is_favorite("2"));
    assert_eq!(planner.meal_plan.day(date("2024-05-01")).slot(MealSlot::Dinner), Some("8"));
    assert!(!planner.shopping_list.items().is_empty());
    assert!(planner.shopping_list.items().iter().all(|i| i.recipe_id.as_deref() == Some("2")));
    assert!(dir.path().join("planner-user-storage.json").exists());
    Ok(())
}

#[tokio::test]
async fn test_recently_viewed_ordering() -> Result<()> {
    let dir = TempDir::new()?;
    let mut planner = open(&dir)?;
    planner.view_recipe("1")?;
    planner.view_recipe("2")?;
    planner.view_recipe("1")?;
    planner.view_recipe("ghost")?;
    assert_eq!(planner.recipe_state.recently_viewed(), &["1".to_string(), "2".to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_week_plan_to_shopping_list() -> Result<()> {
    let dir = TempDir::new()?;
    let mut planner = open(&dir)?;
    let wednesday = date("2024-05-01");
    planner.meal_plan.set_meal(wednesday, MealSlot::Breakfast, Some("6".into()))?;
    planner.meal_plan.add_snack(wednesday, "10")?;
    planner.meal_plan.set_meal(date("2024-05-05"), MealSlot::Dinner, Some("7".into()))?;

    let week_start = start_of_week(wednesday);
    let generated = planner.generate_weekly_shopping_list(week_start)?;
    let catalog = &planner.catalog;
    let expected = catalog.get("6").map_or(0, |r| r.ingredients.len()) + catalog.get("10").map_or(0, |r| r.ingredients.len());
    assert_eq!(generated, expected);
    assert!(planner
        .shopping_list
        .items()
        .iter()
        .all(|i| i.recipe_id.as_deref() != Some("7")));
    Ok(())
}

#[tokio::test]
async fn test_scan_then_filter_by_available_ingredients() -> Result<()> {
    let dir = TempDir::new()?;
    let mut planner = open(&dir)?;
    let detected = IngredientScanner::new(&planner.library)
        .with_delay(std::time::Duration::from_millis(1))
        .scan()
        .await;
    let detected_count = detected.len();
    assert_eq!(planner.confirm_scan(detected)?, detected_count);

    let options = FilterOptions {
        use_available_ingredients: true,
        ..Default::default()
    };
    let inventory = planner.inventory.ingredients();
    for recipe in planner.search_recipes("", &options) {
        let have = recipe
            .ingredients
            .iter()
            .filter(|ing| recipe_planner::matching::is_available(&ing.name, inventory))
            .count();
        assert!(have as f64 / recipe.ingredients.len() as f64 >= 0.7);
    }
    Ok(())
}

#[tokio::test]
async fn test_assistant_falls_back_when_unreachable() -> Result<()> {
    let dir = TempDir::new()?;
    let planner = open(&dir)?;
    let client = AssistantClient::new("http://127.0.0.1:9/");
    let mut conversation = Conversation::new();

    let reply = conversation
        .send(&client, planner.preferences.preferences(), "Any quick breakfast ideas?")
        .await
        .map(|m| (m.role, m.content.clone()));
    assert_eq!(reply, Some((Role::Assistant, FALLBACK_MESSAGE.to_string())));
    assert_eq!(conversation.messages().len(), 3);
    Ok(())
}
