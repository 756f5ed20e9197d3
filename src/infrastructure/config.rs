//! Hierarchical configuration loading for benchmark sweeps.
//!
//! Ground truth is [`crate::services::benchmark::BenchmarkConfig`]; this
//! module only adds the merge-and-validate layer around it. Precedence
//! follows the teacher's `infrastructure/config/loader.rs` exactly,
//! adjusted to this crate's file names and env prefix.

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::services::benchmark::BenchmarkConfig;

const KNOWN_TOPOLOGIES: [&str; 3] = ["small", "medium", "large"];
const KNOWN_STRATEGIES: [&str; 4] = ["sse_optimal", "uniform", "static", "heuristic"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("num_trials must be at least 1")]
    InvalidNumTrials,

    #[error("max_rounds must be at least 1")]
    InvalidMaxRounds,

    #[error("budget must be positive, got {0}")]
    InvalidBudget(f64),

    #[error("unknown topology name: {0}")]
    UnknownTopology(String),

    #[error("unknown strategy name: {0}")]
    UnknownStrategy(String),

    #[error("failed to extract configuration: {0}")]
    Extract(String),
}

/// Loads a [`BenchmarkConfig`], merging in precedence order (lowest to
/// highest):
/// 1. Programmatic defaults
/// 2. `wardgame.yaml` (project config)
/// 3. `.wardgame/local.yaml` (optional local overrides)
/// 4. `WARDGAME_*` environment variables, `__`-delimited for nested fields
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load() -> Result<BenchmarkConfig, ConfigError> {
        let config: BenchmarkConfig = Figment::new()
            .merge(Serialized::defaults(BenchmarkConfig::default()))
            .merge(Yaml::file("wardgame.yaml"))
            .merge(Yaml::file(".wardgame/local.yaml"))
            .merge(Env::prefixed("WARDGAME_").split("__"))
            .extract()
            .map_err(|e| ConfigError::Extract(e.to_string()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<BenchmarkConfig, ConfigError> {
        let config: BenchmarkConfig = Figment::new()
            .merge(Serialized::defaults(BenchmarkConfig::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .map_err(|e| ConfigError::Extract(e.to_string()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    pub fn validate(config: &BenchmarkConfig) -> Result<(), ConfigError> {
        if config.num_trials == 0 {
            return Err(ConfigError::InvalidNumTrials);
        }
        if config.max_rounds == 0 {
            return Err(ConfigError::InvalidMaxRounds);
        }
        if config.budget <= 0.0 {
            return Err(ConfigError::InvalidBudget(config.budget));
        }
        for name in &config.topologies {
            if !KNOWN_TOPOLOGIES.contains(&name.as_str()) {
                return Err(ConfigError::UnknownTopology(name.clone()));
            }
        }
        for name in &config.strategies {
            if !KNOWN_STRATEGIES.contains(&name.as_str()) {
                return Err(ConfigError::UnknownStrategy(name.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = BenchmarkConfig::default();
        ConfigLoader::validate(&config).unwrap();
    }

    #[test]
    fn rejects_zero_trials() {
        let config = BenchmarkConfig { num_trials: 0, ..BenchmarkConfig::default() };
        assert!(matches!(ConfigLoader::validate(&config), Err(ConfigError::InvalidNumTrials)));
    }

    #[test]
    fn rejects_nonpositive_budget() {
        let config = BenchmarkConfig { budget: 0.0, ..BenchmarkConfig::default() };
        assert!(matches!(ConfigLoader::validate(&config), Err(ConfigError::InvalidBudget(_))));
    }

    #[test]
    fn rejects_unknown_topology() {
        let config = BenchmarkConfig { topologies: vec!["gigantic".to_string()], ..BenchmarkConfig::default() };
        assert!(matches!(ConfigLoader::validate(&config), Err(ConfigError::UnknownTopology(_))));
    }

    #[test]
    fn load_from_file_merges_over_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "num_trials: 5\nbudget: 20.0").unwrap();

        let config = ConfigLoader::load_from_file(file.path()).unwrap();
        assert_eq!(config.num_trials, 5);
        assert_eq!(config.budget, 20.0);
        // max_rounds wasn't set in the file, so the default survives.
        assert_eq!(config.max_rounds, BenchmarkConfig::default().max_rounds);
    }
}
