use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::assistant::DEFAULT_ENDPOINT;
use crate::pantry::scanner::DEFAULT_SCAN_DELAY;

pub const DATA_DIR_ENV_VAR: &str = "PLANNER_DATA_DIR";
pub const ASSISTANT_URL_ENV_VAR: &str = "PLANNER_ASSISTANT_URL";
pub const SCAN_DELAY_ENV_VAR: &str = "PLANNER_SCAN_DELAY_MS";
pub const CATALOG_ENV_VAR: &str = "PLANNER_CATALOG";

const DEFAULT_DATA_DIR: &str = "./planner-data";

#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    pub data_dir: PathBuf,
    pub assistant_url: String,
    pub scan_delay: Duration,
    /// Recipe catalog JSON to use instead of the bundled one.
    pub catalog_path: Option<PathBuf>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            assistant_url: DEFAULT_ENDPOINT.to_string(),
            scan_delay: DEFAULT_SCAN_DELAY,
            catalog_path: None,
        }
    }
}

impl PlannerConfig {
    /// Reads `.env` (if any) and then the process environment.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(dir) = lookup(DATA_DIR_ENV_VAR) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(url) = lookup(ASSISTANT_URL_ENV_VAR) {
            config.assistant_url = url;
        }
        if let Some(raw) = lookup(SCAN_DELAY_ENV_VAR) {
            let millis: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be a number of milliseconds, got '{}'", SCAN_DELAY_ENV_VAR, raw))?;
            config.scan_delay = Duration::from_millis(millis);
        }
        config.catalog_path = lookup(CATALOG_ENV_VAR).map(PathBuf::from);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() -> Result<()> {
        let config = PlannerConfig::from_lookup(lookup(&[]))?;
        assert_eq!(config, PlannerConfig::default());
        assert_eq!(config.scan_delay, Duration::from_millis(2000));
        Ok(())
    }

    #[test]
    fn test_overrides() -> Result<()> {
        let config = PlannerConfig::from_lookup(lookup(&[
            (DATA_DIR_ENV_VAR, "/tmp/planner"),
            (SCAN_DELAY_ENV_VAR, " 50 "),
            (CATALOG_ENV_VAR, "recipes.json"),
        ]))?;
        assert_eq!(config.data_dir, PathBuf::from("/tmp/planner"));
        assert_eq!(config.scan_delay, Duration::from_millis(50));
        assert_eq!(config.catalog_path, Some(PathBuf::from("recipes.json")));
        assert_eq!(config.assistant_url, DEFAULT_ENDPOINT);
        Ok(())
    }

    #[test]
    fn test_bad_delay_is_an_error() {
        let err = PlannerConfig::from_lookup(lookup(&[(SCAN_DELAY_ENV_VAR, "soon")])).unwrap_err();
        assert!(err.to_string().contains(SCAN_DELAY_ENV_VAR));
    }
}
