pub mod assistant;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod home;
pub mod matching;
pub mod meal_plan;
pub mod onboarding;
pub mod pantry;
pub mod planner;
pub mod preferences;
pub mod recommend;
pub mod shopping;
pub mod store;
