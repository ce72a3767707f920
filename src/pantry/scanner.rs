use rand::seq::SliceRandom;
use rand::Rng;
use std::time::Duration;
use tracing::debug;

use super::{IngredientLibrary, InventoryIngredient};

pub const DEFAULT_SCAN_DELAY: Duration = Duration::from_millis(2000);
const MIN_DETECTED: usize = 3;
const MAX_DETECTED: usize = 7;

/// Simulated photo scan: there is no image analysis, it picks a random
/// handful of known ingredients after a short delay.
pub struct IngredientScanner<'a> {
    library: &'a IngredientLibrary,
    delay: Duration,
}

impl<'a> IngredientScanner<'a> {
    pub fn new(library: &'a IngredientLibrary) -> Self {
        Self {
            library,
            delay: DEFAULT_SCAN_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub async fn scan(&self) -> Vec<InventoryIngredient> {
        debug!("Simulating ingredient scan ({:?})", self.delay);
        tokio::time::sleep(self.delay).await;
        self.detect_with(&mut rand::thread_rng())
    }

    /// Picks between 3 and 7 distinct library ingredients, flagged as scanned.
    pub fn detect_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<InventoryIngredient> {
        let count = rng.gen_range(MIN_DETECTED..=MAX_DETECTED);
        let detected: Vec<InventoryIngredient> = self
            .library
            .items()
            .choose_multiple(rng, count)
            .map(|item| item.to_inventory(true))
            .collect();
        debug!("Detected {} ingredients", detected.len());
        detected
    }
}
