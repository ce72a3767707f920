use thiserror::Error;

use crate::preferences::{CookingTime, Goal, PreferencesUpdate};

/// The "No restrictions" choice. It is a UI option, not a dietary tag.
pub const NO_RESTRICTIONS: &str = "none";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OnboardingError {
    #[error("Pick a goal before continuing")]
    MissingGoal,
    #[error("Pick a cooking time before continuing")]
    MissingCookingTime,
}

#[derive(Debug, Clone, Default)]
pub struct OnboardingAnswers {
    pub goal: Option<Goal>,
    pub dietary_restrictions: Vec<String>,
    pub cooking_time: Option<CookingTime>,
    pub flavor_preferences: Vec<String>,
}

impl OnboardingAnswers {
    pub fn complete(self) -> Result<PreferencesUpdate, OnboardingError> {
        let goal = self.goal.ok_or(OnboardingError::MissingGoal)?;
        let cooking_time = self.cooking_time.ok_or(OnboardingError::MissingCookingTime)?;
        let mut restrictions: Vec<String> = Vec::new();
        for restriction in self.dietary_restrictions {
            if restriction != NO_RESTRICTIONS && !restrictions.contains(&restriction) {
                restrictions.push(restriction);
            }
        }

        Ok(PreferencesUpdate {
            goal: Some(goal),
            dietary_restrictions: Some(restrictions),
            cooking_time: Some(cooking_time),
            flavor_preferences: Some(self.flavor_preferences),
            onboarding_completed: Some(true),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_and_cooking_time_required() {
        let answers = OnboardingAnswers {
            cooking_time: Some(CookingTime::Quick),
            ..Default::default()
        };
        assert_eq!(answers.complete(), Err(OnboardingError::MissingGoal));

        let answers = OnboardingAnswers {
            goal: Some(Goal::MuscleGain),
            ..Default::default()
        };
        assert_eq!(answers.complete(), Err(OnboardingError::MissingCookingTime));
    }

    #[test]
    fn test_none_option_dropped() {
        let answers = OnboardingAnswers {
            goal: Some(Goal::HealthyEating),
            dietary_restrictions: vec!["none".into(), "vegan".into(), "vegan".into()],
            cooking_time: Some(CookingTime::Medium),
            flavor_preferences: vec!["savory".into()],
        };
        let update = answers.complete().unwrap();
        assert_eq!(update.dietary_restrictions, Some(vec!["vegan".to_string()]));
        assert_eq!(update.onboarding_completed, Some(true));
    }
}
