use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{KeyValueStorage, PersistedStore, StoreError};
use crate::preferences::{PreferencesUpdate, UserPreferences};

pub const PREFERENCES_KEY: &str = "planner-user-storage";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct PreferencesState {
    preferences: UserPreferences,
}

pub struct PreferenceStore {
    inner: PersistedStore<PreferencesState>,
}

impl PreferenceStore {
    pub fn load(storage: Arc<dyn KeyValueStorage>) -> Result<Self, StoreError> {
        Ok(Self {
            inner: PersistedStore::load(storage, PREFERENCES_KEY)?,
        })
    }

    pub fn preferences(&self) -> &UserPreferences {
        &self.inner.state().preferences
    }

    pub fn update(&mut self, update: &PreferencesUpdate) -> Result<(), StoreError> {
        self.inner.mutate(|state| update.apply_to(&mut state.preferences))
    }

    /// Back to defaults, which also re-arms onboarding.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.inner
            .mutate(|state| state.preferences = UserPreferences::default())
    }
}
