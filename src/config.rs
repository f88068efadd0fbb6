//! Runtime configuration from environment variables.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};

use crate::core::Catalog;

pub const DEFAULT_DATA_DIR: &str = ".body-quest";
pub const DEFAULT_TICK_MS: u32 = 50;
pub const DEFAULT_LOG_FILTER: &str = "body_quest=info";
pub const LOG_FILE: &str = "body-quest.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Profiles and the log file live here.
    pub data_dir: PathBuf,
    /// Replaces the built-in catalog when set.
    pub catalog_path: Option<PathBuf>,
    /// Fixed seed for reproducible rounds; clock-derived when unset.
    pub seed: Option<u32>,
    /// Frame step of the main loop.
    pub tick_ms: u32,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            catalog_path: None,
            seed: None,
            tick_ms: DEFAULT_TICK_MS,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset, blank or unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let defaults = Self::default();

        Self {
            data_dir: get("BODY_QUEST_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            catalog_path: get("BODY_QUEST_CATALOG").map(PathBuf::from),
            seed: get("BODY_QUEST_SEED").and_then(|s| s.parse().ok()),
            tick_ms: get("BODY_QUEST_TICK_MS")
                .and_then(|s| s.parse().ok())
                .filter(|&ms| ms > 0)
                .unwrap_or(defaults.tick_ms),
            log_filter: get("RUST_LOG").unwrap_or(defaults.log_filter),
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }

    /// The configured seed, or one taken from the clock.
    pub fn resolve_seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }

    /// Catalog from `catalog_path`, or the built-in one.
    pub fn load_catalog(&self) -> Result<Catalog> {
        let Some(path) = &self.catalog_path else {
            return Ok(Catalog::builtin());
        };
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog {}", path.display()))?;
        let catalog = Catalog::from_json(&json)
            .with_context(|| format!("invalid catalog {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            systems = catalog.systems().len(),
            cards = catalog.cards().len(),
            questions = catalog.questions().len(),
            "custom catalog loaded"
        );
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(Config::from_lookup(lookup(&[])), Config::default());
    }

    #[test]
    fn reads_every_variable() {
        let cfg = Config::from_lookup(lookup(&[
            ("BODY_QUEST_DATA_DIR", "/tmp/bq"),
            ("BODY_QUEST_CATALOG", "cards.json"),
            ("BODY_QUEST_SEED", "42"),
            ("BODY_QUEST_TICK_MS", "16"),
            ("RUST_LOG", "body_quest=debug"),
        ]));
        assert_eq!(cfg.data_dir, PathBuf::from("/tmp/bq"));
        assert_eq!(cfg.catalog_path, Some(PathBuf::from("cards.json")));
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.resolve_seed(), 42);
        assert_eq!(cfg.tick_ms, 16);
        assert_eq!(cfg.log_filter, "body_quest=debug");
        assert_eq!(cfg.log_path(), PathBuf::from("/tmp/bq").join(LOG_FILE));
    }

    #[test]
    fn bad_values_fall_back() {
        let cfg = Config::from_lookup(lookup(&[
            ("BODY_QUEST_DATA_DIR", "   "),
            ("BODY_QUEST_SEED", "soon"),
            ("BODY_QUEST_TICK_MS", "0"),
        ]));
        assert_eq!(cfg.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.tick_ms, DEFAULT_TICK_MS);
    }

    #[test]
    fn builtin_catalog_without_path() {
        let catalog = Config::default().load_catalog().unwrap();
        assert!(!catalog.cards().is_empty());
    }

    #[test]
    fn missing_catalog_file_is_an_error() {
        let cfg = Config {
            catalog_path: Some(PathBuf::from("/definitely/not/here.json")),
            ..Config::default()
        };
        let err = cfg.load_catalog().unwrap_err();
        assert!(err.to_string().contains("failed to read catalog"));
    }
}
