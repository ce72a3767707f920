use anyhow::{Context, Result};
use chrono::{Local, Timelike, Utc};
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use recipe_planner::assistant::{AssistantClient, Conversation};
use recipe_planner::catalog::{Catalog, Recipe};
use recipe_planner::cli::{
    parse_args, Cli, Command, FilterArgs, PantryCommand, PlanCommand, PreferenceArgs, PrefsCommand,
    RecipesCommand, ShoppingCommand,
};
use recipe_planner::config::PlannerConfig;
use recipe_planner::home::{goal_message, greeting_for_hour};
use recipe_planner::meal_plan::MealSlot;
use recipe_planner::onboarding::OnboardingAnswers;
use recipe_planner::pantry::{IngredientScanner, InventoryIngredient};
use recipe_planner::planner::Planner;
use recipe_planner::preferences::PreferencesUpdate;
use recipe_planner::recommend::FilterOptions;
use recipe_planner::shopping::{group_by_category, start_of_week, ShoppingItem};
use recipe_planner::store::FileStorage;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

/// Destructive commands only run with `--yes`.
fn confirmed(yes: bool, action: &str) -> bool {
    if !yes {
        println!("This will {}. Re-run with --yes to confirm.", action);
    }
    yes
}

fn print_recipe_line(recipe: &Recipe) {
    println!(
        "  [{}] {} ({} min, {} cal, {:?})",
        recipe.id,
        recipe.name,
        recipe.total_time(),
        recipe.calories,
        recipe.difficulty
    );
}

fn print_recipes(title: &str, recipes: &[&Recipe]) {
    println!("{}:", title);
    if recipes.is_empty() {
        println!("  (none)");
    }
    for recipe in recipes {
        print_recipe_line(recipe);
    }
}

fn open_planner(cli: &Cli) -> Result<(Planner, PlannerConfig)> {
    let mut config = PlannerConfig::from_env()?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(path) = &cli.catalog {
        config.catalog_path = Some(path.clone());
    }
    if let Some(url) = &cli.assistant_url {
        config.assistant_url = url.clone();
    }

    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_json_file(path)
            .with_context(|| format!("Failed to load recipe catalog from '{}'", path.display()))?,
        None => Catalog::builtin().context("Failed to load the bundled recipe catalog")?,
    };
    let library = recipe_planner::pantry::IngredientLibrary::builtin()?;
    let storage = Arc::new(FileStorage::new(&config.data_dir));
    let planner = Planner::open(storage, catalog, library)
        .with_context(|| format!("Failed to open planner data in '{}'", config.data_dir.display()))?;
    Ok((planner, config))
}

fn preference_update(args: PreferenceArgs) -> PreferencesUpdate {
    PreferencesUpdate {
        goal: args.goal,
        dietary_restrictions: (!args.dietary_restrictions.is_empty()).then_some(args.dietary_restrictions),
        cooking_time: args.cooking_time,
        flavor_preferences: (!args.flavor_preferences.is_empty()).then_some(args.flavor_preferences),
        onboarding_completed: None,
    }
}

fn show_preferences(planner: &Planner) {
    let prefs = planner.preferences.preferences();
    println!("Goal:                {}", prefs.goal.map_or("not set", |g| g.label()));
    println!("Dietary restrictions: {}", list_or(&prefs.dietary_restrictions, "none"));
    println!("Cooking time:        {}", prefs.cooking_time.map_or("not set", |t| t.label()));
    println!("Flavor preferences:  {}", list_or(&prefs.flavor_preferences, "none"));
    println!("Onboarding complete: {}", prefs.onboarding_completed);
}

fn list_or(values: &[String], empty: &str) -> String {
    if values.is_empty() {
        empty.to_string()
    } else {
        values.join(", ")
    }
}

fn run_home(planner: &Planner) {
    let prefs = planner.preferences.preferences();
    if !prefs.onboarding_completed {
        println!("Welcome! Run `onboard` to tell us about your goals first.");
        return;
    }
    println!("{}!", greeting_for_hour(Local::now().hour()));
    println!("{}", goal_message(prefs.goal));
    println!();
    print_recipes("Recommended for you", &planner.recommended_recipes());
    let recent = planner.recently_viewed_recipes();
    if !recent.is_empty() {
        println!();
        print_recipes("Recently viewed", &recent);
    }
}

fn filter_options(planner: &Planner, filters: FilterArgs) -> FilterOptions {
    let mut options = if filters.no_preferences {
        FilterOptions::default()
    } else {
        FilterOptions::seeded_from(planner.preferences.preferences())
    };
    options.meal_types = filters.meal_types;
    options.difficulties = filters.difficulties;
    for restriction in filters.dietary_restrictions {
        if !options.dietary_restrictions.contains(&restriction) {
            options.dietary_restrictions.push(restriction);
        }
    }
    options.max_time = filters.max_time.unwrap_or_default();
    options.max_calories = filters.max_calories.unwrap_or_default();
    options.use_available_ingredients = filters.use_available;
    options
}

fn print_ingredient(ingredient: &InventoryIngredient) {
    let mut line = format!("  [{}] {} ({})", ingredient.id, ingredient.name, ingredient.category);
    if let Some(quantity) = ingredient.quantity {
        line.push_str(&format!(" {} {}", quantity, ingredient.unit.as_deref().unwrap_or("")));
    }
    if let Some(expiry) = ingredient.expiry_date {
        line.push_str(&format!(" expires {}", expiry));
    }
    if ingredient.scanned {
        line.push_str(" *scanned");
    }
    println!("{}", line.trim_end());
}

async fn run_pantry(planner: &mut Planner, config: &PlannerConfig, command: PantryCommand) -> Result<()> {
    match command {
        PantryCommand::List { search } => {
            let items: Vec<&InventoryIngredient> = match &search {
                Some(query) => planner.inventory.search(query),
                None => planner.inventory.ingredients().iter().collect(),
            };
            if items.is_empty() {
                println!("Your pantry is empty. Try `pantry scan` or `pantry add`.");
            }
            items.into_iter().for_each(print_ingredient);
        }
        PantryCommand::Add { name, category, quantity, unit, expires } => {
            let known = planner.library.find_by_name(&name);
            let mut ingredient = match known {
                Some(item) => item.to_inventory(false),
                None => InventoryIngredient::new(
                    Utc::now().timestamp_millis().to_string(),
                    name.trim(),
                    category.clone().unwrap_or_else(|| "Other".to_string()),
                ),
            };
            if let Some(category) = category {
                ingredient.category = category;
            }
            ingredient.quantity = quantity;
            ingredient.unit = unit;
            ingredient.expiry_date = expires;
            print_ingredient(&ingredient);
            planner.inventory.add(ingredient)?;
        }
        PantryCommand::Remove { id, yes } => {
            if confirmed(yes, &format!("remove ingredient {}", id)) {
                if planner.inventory.remove(&id)? {
                    println!("Removed {}", id);
                } else {
                    println!("No ingredient with id {}", id);
                }
            }
        }
        PantryCommand::Clear { yes } => {
            if confirmed(yes, "remove every ingredient from your pantry") {
                planner.inventory.clear()?;
                println!("Pantry cleared");
            }
        }
        PantryCommand::Scan { keep, additions } => {
            println!("Scanning...");
            let mut detected = IngredientScanner::new(&planner.library)
                .with_delay(config.scan_delay)
                .scan()
                .await;
            for query in &additions {
                match planner.library.search(query).first() {
                    Some(item) => detected.push(item.to_inventory(false)),
                    None => println!("No known ingredient matches '{}'", query),
                }
            }
            println!("Detected {} ingredients:", detected.len());
            detected.iter().for_each(print_ingredient);
            if keep {
                let added = planner.confirm_scan(detected)?;
                println!("Added {} new ingredients to your pantry", added);
            }
        }
        PantryCommand::Search { query } => {
            let suggestions = planner.library.suggestions(&query, planner.inventory.ingredients());
            if suggestions.is_empty() {
                println!("No suggestions for '{}'", query);
            }
            for item in suggestions {
                println!("  {} ({})", item.name, item.category);
            }
        }
    }
    Ok(())
}

fn run_recipes(planner: &mut Planner, command: RecipesCommand) -> Result<()> {
    match command {
        RecipesCommand::Search { query, filters } => {
            let options = filter_options(planner, filters);
            let found = planner.search_recipes(&query, &options);
            print_recipes(
                &format!("{} recipes ({} filters active)", found.len(), options.active_count()),
                &found,
            );
        }
        RecipesCommand::Recommended => print_recipes("Recommended", &planner.recommended_recipes()),
        RecipesCommand::Show { id, share } => match planner.view_recipe(&id)? {
            None => println!("Recipe not found"),
            Some(view) => {
                let recipe = &view.recipe;
                println!("{}{}", recipe.name, if view.is_favorite { " (favorite)" } else { "" });
                println!("{}", recipe.description);
                println!(
                    "Prep {} min, cook {} min, serves {}, {:?}",
                    recipe.prep_time, recipe.cook_time, recipe.servings, recipe.difficulty
                );
                println!(
                    "{} cal, protein {}g, carbs {}g, fat {}g",
                    recipe.calories, recipe.protein, recipe.carbs, recipe.fat
                );
                println!("Ingredients:");
                for status in &view.ingredients {
                    let mark = if status.available { "x" } else { " " };
                    println!("  [{}] {} {}", mark, status.ingredient.amount, status.ingredient.name);
                }
                println!("Instructions:");
                for (step, instruction) in recipe.instructions.iter().enumerate() {
                    println!("  {}. {}", step + 1, instruction);
                }
                if share {
                    println!();
                    println!("{}", recipe.share_message());
                }
            }
        },
        RecipesCommand::Favorite { id } => {
            if planner.catalog.get(&id).is_none() {
                println!("Recipe not found");
            } else if planner.recipe_state.toggle_favorite(&id)? {
                println!("Added {} to favorites", id);
            } else {
                println!("Removed {} from favorites", id);
            }
        }
        RecipesCommand::Favorites => print_recipes("Favorites", &planner.favorite_recipes()),
        RecipesCommand::Recent { clear } => {
            if clear {
                planner.recipe_state.clear_recently_viewed()?;
                println!("Recently viewed list cleared");
            } else {
                print_recipes("Recently viewed", &planner.recently_viewed_recipes());
            }
        }
    }
    Ok(())
}

fn run_plan(planner: &mut Planner, command: PlanCommand) -> Result<()> {
    match command {
        PlanCommand::Show { date } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let day = planner.meal_plan.day(date);
            println!("{}", date.format("%A, %B %-d"));
            for slot in [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner] {
                let name = match day.slot(slot) {
                    Some(id) => planner.catalog.get(id).map_or("(recipe missing)", |r| r.name.as_str()),
                    None => "-",
                };
                println!("  {:<10} {}", format!("{:?}", slot), name);
            }
            let snacks: Vec<&str> = planner
                .catalog
                .resolve(&day.snacks)
                .into_iter()
                .map(|r| r.name.as_str())
                .collect();
            println!("  {:<10} {}", "Snacks", if snacks.is_empty() { "-".to_string() } else { snacks.join(", ") });
        }
        PlanCommand::Set { date, slot, recipe_id } => {
            planner.meal_plan.set_meal(date, slot, recipe_id)?;
        }
        PlanCommand::Snack { date, recipe_id } => planner.meal_plan.add_snack(date, &recipe_id)?,
        PlanCommand::Unsnack { date, recipe_id } => planner.meal_plan.remove_snack(date, &recipe_id)?,
        PlanCommand::Clear { yes } => {
            if confirmed(yes, "clear the whole meal plan") {
                planner.meal_plan.clear()?;
            }
        }
    }
    Ok(())
}

fn run_shopping(planner: &mut Planner, command: ShoppingCommand) -> Result<()> {
    match command {
        ShoppingCommand::List { search } => {
            let groups = group_by_category(planner.shopping_list.items(), search.as_deref().unwrap_or(""));
            if groups.is_empty() {
                println!("Your shopping list is empty");
            }
            for (category, items) in groups {
                println!("{}:", category);
                for item in items {
                    let mark = if item.checked { "x" } else { " " };
                    let amount = match (item.quantity, &item.unit) {
                        (Some(q), Some(unit)) => format!(" ({} {})", q, unit),
                        (Some(q), None) => format!(" ({})", q),
                        _ => String::new(),
                    };
                    println!("  [{}] {}{}  #{}", mark, item.name, amount, item.id);
                }
            }
        }
        ShoppingCommand::Add { name, quantity, unit, category } => {
            if name.trim().is_empty() {
                println!("Item name cannot be empty");
                return Ok(());
            }
            let item = ShoppingItem {
                quantity,
                unit,
                category,
                ..ShoppingItem::manual(&name)
            };
            planner.shopping_list.add_item(item)?;
        }
        ShoppingCommand::Check { id } => planner.shopping_list.toggle_checked(&id)?,
        ShoppingCommand::Remove { id } => {
            planner.shopping_list.remove_item(&id)?;
        }
        ShoppingCommand::ClearChecked { yes } => {
            if confirmed(yes, "remove all checked items") {
                let removed = planner.shopping_list.clear_checked()?;
                println!("Removed {} checked items", removed);
            }
        }
        ShoppingCommand::Clear { yes } => {
            if confirmed(yes, "remove every item from your shopping list") {
                planner.shopping_list.clear_all()?;
            }
        }
        ShoppingCommand::AddMissing { recipe_id } => {
            let added = planner.add_missing_to_shopping_list(&recipe_id)?;
            println!("Added {} items to your shopping list", added);
        }
        ShoppingCommand::Generate { week_of } => {
            let week_start = start_of_week(week_of.unwrap_or_else(|| Local::now().date_naive()));
            let generated = planner.generate_weekly_shopping_list(week_start)?;
            println!("Added {} items for the week of {}", generated, week_start);
        }
    }
    Ok(())
}

async fn run_chat(planner: &Planner, config: &PlannerConfig, message: Option<String>) -> Result<()> {
    let client = AssistantClient::new(&config.assistant_url);
    let mut conversation = Conversation::new();
    let preferences = planner.preferences.preferences();

    if let Some(message) = message {
        if let Some(reply) = conversation.send(&client, preferences, &message).await {
            println!("{}", reply.content);
        }
        return Ok(());
    }

    println!("{}", conversation.messages()[0].content);
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line == "exit" || line == "quit" {
            break;
        }
        if let Some(reply) = conversation.send(&client, preferences, line).await {
            println!("{}", reply.content);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = parse_args();
    let (mut planner, config) = open_planner(&cli)?;

    match cli.command {
        Command::Onboard(args) => {
            let answers = OnboardingAnswers {
                goal: args.goal,
                dietary_restrictions: args.dietary_restrictions,
                cooking_time: args.cooking_time,
                flavor_preferences: args.flavor_preferences,
            };
            let update = answers.complete()?;
            planner.preferences.update(&update)?;
            println!("You're all set.");
            run_home(&planner);
        }
        Command::Home => run_home(&planner),
        Command::Prefs(PrefsCommand::Show) => show_preferences(&planner),
        Command::Prefs(PrefsCommand::Set(args)) => {
            planner.preferences.update(&preference_update(args))?;
            show_preferences(&planner);
        }
        Command::Prefs(PrefsCommand::Reset { yes }) => {
            if confirmed(yes, "reset all preferences") {
                planner.preferences.reset()?;
                println!("Preferences reset. Run `onboard` to set them up again.");
            }
        }
        Command::Pantry(command) => run_pantry(&mut planner, &config, command).await?,
        Command::Recipes(command) => run_recipes(&mut planner, command)?,
        Command::Plan(command) => run_plan(&mut planner, command)?,
        Command::Shopping(command) => run_shopping(&mut planner, command)?,
        Command::Chat { message } => run_chat(&planner, &config, message).await?,
    }
    Ok(())
}
