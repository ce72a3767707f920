//! Text shown on the home screen.

use crate::preferences::Goal;

pub fn greeting_for_hour(hour: u32) -> &'static str {
    if hour < 12 {
        "Good morning"
    } else if hour < 18 {
        "Good afternoon"
    } else {
        "Good evening"
    }
}

pub fn goal_message(goal: Option<Goal>) -> &'static str {
    match goal {
        Some(Goal::WeightLoss) => "Focus on low-calorie, nutrient-dense meals today",
        Some(Goal::MuscleGain) => "Aim for protein-rich meals to support your muscle growth",
        Some(Goal::Maintenance) => "Balanced nutrition keeps you on track",
        Some(Goal::HealthyEating) => "Fresh, whole foods make for the best meals",
        Some(Goal::UseIngredients) => "Let's make the most of what you have",
        None => "What would you like to cook today?",
    }
}
