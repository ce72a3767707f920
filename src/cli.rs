use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::catalog::{Difficulty, MealType};
use crate::meal_plan::MealSlot;
use crate::preferences::{CookingTime, Goal};

#[derive(Parser, Debug)]
#[command(author, version, about = "Plan meals, track your pantry and build shopping lists", long_about = None)]
pub struct Cli {
    /// Directory holding the persisted stores (overrides PLANNER_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Recipe catalog JSON file (overrides PLANNER_CATALOG)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Chat endpoint (overrides PLANNER_ASSISTANT_URL)
    #[arg(long, global = true)]
    pub assistant_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Answer the first-run questions
    Onboard(PreferenceArgs),
    /// Greeting, goal banner and recommendations
    Home,
    #[command(subcommand)]
    Prefs(PrefsCommand),
    #[command(subcommand)]
    Pantry(PantryCommand),
    #[command(subcommand)]
    Recipes(RecipesCommand),
    #[command(subcommand)]
    Plan(PlanCommand),
    #[command(subcommand)]
    Shopping(ShoppingCommand),
    /// Ask the meal planning assistant; without a message, starts a session on stdin
    Chat { message: Option<String> },
}

#[derive(Args, Debug, Default)]
pub struct PreferenceArgs {
    #[arg(long, value_enum)]
    pub goal: Option<Goal>,
    /// Dietary restriction, repeatable ("none" for no restrictions)
    #[arg(long = "diet")]
    pub dietary_restrictions: Vec<String>,
    #[arg(long, value_enum)]
    pub cooking_time: Option<CookingTime>,
    /// Flavor preference, repeatable
    #[arg(long = "flavor")]
    pub flavor_preferences: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum PrefsCommand {
    Show,
    /// Change only the given preferences
    Set(PreferenceArgs),
    /// Forget all preferences and re-run onboarding
    Reset {
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum PantryCommand {
    List {
        #[arg(long)]
        search: Option<String>,
    },
    Add {
        name: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        quantity: Option<f64>,
        #[arg(long)]
        unit: Option<String>,
        /// Expiry date, YYYY-MM-DD
        #[arg(long)]
        expires: Option<NaiveDate>,
    },
    Remove {
        id: String,
        #[arg(long)]
        yes: bool,
    },
    Clear {
        #[arg(long)]
        yes: bool,
    },
    /// Simulated photo scan
    Scan {
        /// Add the detected ingredients to the pantry
        #[arg(long)]
        keep: bool,
        /// Also include the first known ingredient whose name matches, repeatable
        #[arg(long = "add")]
        additions: Vec<String>,
    },
    /// Suggestions from the known-ingredient list
    Search { query: String },
}

#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    #[arg(long = "meal-type", value_enum)]
    pub meal_types: Vec<MealType>,
    #[arg(long = "difficulty", value_enum)]
    pub difficulties: Vec<Difficulty>,
    /// Extra dietary restriction on top of your preferences, repeatable
    #[arg(long = "diet")]
    pub dietary_restrictions: Vec<String>,
    /// Maximum prep + cook minutes
    #[arg(long)]
    pub max_time: Option<u32>,
    #[arg(long)]
    pub max_calories: Option<u32>,
    /// Only recipes you have most ingredients for
    #[arg(long)]
    pub use_available: bool,
    /// Ignore the dietary restrictions from your preferences
    #[arg(long)]
    pub no_preferences: bool,
}

#[derive(Subcommand, Debug)]
pub enum RecipesCommand {
    Search {
        #[arg(default_value = "")]
        query: String,
        #[command(flatten)]
        filters: FilterArgs,
    },
    Recommended,
    Show {
        id: String,
        /// Print the share message too
        #[arg(long)]
        share: bool,
    },
    /// Toggle a favourite
    Favorite { id: String },
    Favorites,
    Recent {
        /// Forget the recently viewed list
        #[arg(long)]
        clear: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum PlanCommand {
    /// Meals for one day, default today
    Show {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Assign a recipe to a slot; omit the recipe to clear the slot
    Set {
        date: NaiveDate,
        #[arg(value_enum)]
        slot: MealSlot,
        recipe_id: Option<String>,
    },
    Snack { date: NaiveDate, recipe_id: String },
    Unsnack { date: NaiveDate, recipe_id: String },
    Clear {
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ShoppingCommand {
    List {
        #[arg(long)]
        search: Option<String>,
    },
    Add {
        name: String,
        #[arg(long)]
        quantity: Option<f64>,
        #[arg(long)]
        unit: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Toggle the checked flag
    Check { id: String },
    Remove { id: String },
    ClearChecked {
        #[arg(long)]
        yes: bool,
    },
    Clear {
        #[arg(long)]
        yes: bool,
    },
    /// Add a recipe's missing ingredients
    AddMissing { recipe_id: String },
    /// Add everything planned for a week
    Generate {
        /// Any date in the week, default today
        #[arg(long)]
        week_of: Option<NaiveDate>,
    },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_parses_nested_subcommands() -> Result<()> {
        let cli = Cli::try_parse_from([
            "recipe_planner",
            "--data-dir",
            "/tmp/p",
            "plan",
            "set",
            "2024-05-01",
            "dinner",
            "4",
        ])?;
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/p")));
        match cli.command {
            Command::Plan(PlanCommand::Set { date, slot, recipe_id }) => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
                assert_eq!(slot, MealSlot::Dinner);
                assert_eq!(recipe_id.as_deref(), Some("4"));
            }
            other => panic!("unexpected command {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_repeatable_filters() -> Result<()> {
        let cli = Cli::try_parse_from([
            "recipe_planner",
            "recipes",
            "search",
            "bowl",
            "--meal-type",
            "lunch",
            "--meal-type",
            "dinner",
            "--max-time",
            "30",
        ])?;
        match cli.command {
            Command::Recipes(RecipesCommand::Search { query, filters }) => {
                assert_eq!(query, "bowl");
                assert_eq!(filters.meal_types, vec![MealType::Lunch, MealType::Dinner]);
                assert_eq!(filters.max_time, Some(30));
            }
            other => panic!("unexpected command {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_scan_manual_additions() -> Result<()> {
        let cli = Cli::try_parse_from(["recipe_planner", "pantry", "scan", "--keep", "--add", "oats", "--add", "milk"])?;
        match cli.command {
            Command::Pantry(PantryCommand::Scan { keep, additions }) => {
                assert!(keep);
                assert_eq!(additions, vec!["oats".to_string(), "milk".to_string()]);
            }
            other => panic!("unexpected command {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_goal_values_are_kebab_case() -> Result<()> {
        let cli = Cli::try_parse_from(["recipe_planner", "onboard", "--goal", "muscle-gain", "--cooking-time", "quick"])?;
        match cli.command {
            Command::Onboard(args) => {
                assert_eq!(args.goal, Some(Goal::MuscleGain));
                assert_eq!(args.cooking_time, Some(CookingTime::Quick));
            }
            other => panic!("unexpected command {:?}", other),
        }
        Ok(())
    }
}
