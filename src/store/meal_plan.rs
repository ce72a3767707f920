use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{KeyValueStorage, PersistedStore, StoreError};
use crate::meal_plan::{day_for, MealPlanDay, MealSlot};

pub const MEAL_PLAN_KEY: &str = "planner-meal-plan-storage";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct MealPlanState {
    meal_plan: Vec<MealPlanDay>,
}

/// Meal assignments keyed by date. Days are created on first assignment and
/// only disappear through `clear`.
pub struct MealPlanStore {
    inner: PersistedStore<MealPlanState>,
}

impl MealPlanStore {
    pub fn load(storage: Arc<dyn KeyValueStorage>) -> Result<Self, StoreError> {
        Ok(Self {
            inner: PersistedStore::load(storage, MEAL_PLAN_KEY)?,
        })
    }

    pub fn days(&self) -> &[MealPlanDay] {
        &self.inner.state().meal_plan
    }

    pub fn day(&self, date: NaiveDate) -> MealPlanDay {
        day_for(self.days(), date)
    }

    /// Assigns (or with `None`, unassigns) a recipe for one slot.
    pub fn set_meal(&mut self, date: NaiveDate, slot: MealSlot, recipe_id: Option<String>) -> Result<(), StoreError> {
        self.inner
            .mutate(|state| day_entry(&mut state.meal_plan, date).set_slot(slot, recipe_id))
    }

    pub fn add_snack(&mut self, date: NaiveDate, recipe_id: &str) -> Result<(), StoreError> {
        self.inner.mutate(|state| {
            day_entry(&mut state.meal_plan, date)
                .snacks
                .push(recipe_id.to_string())
        })
    }

    /// Drops every occurrence of `recipe_id` from that day's snacks.
    pub fn remove_snack(&mut self, date: NaiveDate, recipe_id: &str) -> Result<(), StoreError> {
        if !self.days().iter().any(|day| day.date == date) {
            return Ok(());
        }
        self.inner.mutate(|state| {
            if let Some(day) = state.meal_plan.iter_mut().find(|day| day.date == date) {
                day.snacks.retain(|id| id != recipe_id);
            }
        })
    }

    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.inner.mutate(|state| state.meal_plan.clear())
    }
}

fn day_entry(plan: &mut Vec<MealPlanDay>, date: NaiveDate) -> &mut MealPlanDay {
    let idx = match plan.iter().position(|day| day.date == date) {
        Some(idx) => idx,
        None => {
            plan.push(MealPlanDay::empty(date));
            plan.len() - 1
        }
    };
    &mut plan[idx]
}
