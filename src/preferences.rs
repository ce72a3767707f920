use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Goal {
    WeightLoss,
    MuscleGain,
    Maintenance,
    HealthyEating,
    UseIngredients,
}

impl Goal {
    pub fn label(&self) -> &'static str {
        match self {
            Goal::WeightLoss => "weight-loss",
            Goal::MuscleGain => "muscle-gain",
            Goal::Maintenance => "maintenance",
            Goal::HealthyEating => "healthy-eating",
            Goal::UseIngredients => "use-ingredients",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CookingTime {
    Quick,
    Medium,
    Long,
}

impl CookingTime {
    /// Upper bound on prep + cook minutes for recommendations; `None` is unlimited.
    pub fn time_budget(&self) -> Option<u32> {
        match self {
            CookingTime::Quick => Some(15),
            CookingTime::Medium => Some(30),
            CookingTime::Long => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CookingTime::Quick => "quick",
            CookingTime::Medium => "medium",
            CookingTime::Long => "long",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    pub goal: Option<Goal>,
    pub dietary_restrictions: Vec<String>,
    pub cooking_time: Option<CookingTime>,
    pub flavor_preferences: Vec<String>,
    pub onboarding_completed: bool,
}

/// Partial preference change merged over the stored record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreferencesUpdate {
    pub goal: Option<Goal>,
    pub dietary_restrictions: Option<Vec<String>>,
    pub cooking_time: Option<CookingTime>,
    pub flavor_preferences: Option<Vec<String>>,
    pub onboarding_completed: Option<bool>,
}

impl PreferencesUpdate {
    pub fn apply_to(&self, preferences: &mut UserPreferences) {
        if let Some(goal) = self.goal {
            preferences.goal = Some(goal);
        }
        if let Some(restrictions) = &self.dietary_restrictions {
            preferences.dietary_restrictions = restrictions.clone();
        }
        if let Some(cooking_time) = self.cooking_time {
            preferences.cooking_time = Some(cooking_time);
        }
        if let Some(flavors) = &self.flavor_preferences {
            preferences.flavor_preferences = flavors.clone();
        }
        if let Some(completed) = self.onboarding_completed {
            preferences.onboarding_completed = completed;
        }
    }
}
