use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::scenario::ScenarioConfig;
use crate::constants::{
    BASE_URL_ENV, CONFIG_FILE, DEFAULT_BASE_URL, DEFAULT_PACING, DEFAULT_REPORT_INTERVAL_SECS, DEFAULT_REQUEST_TIMEOUT,
    DEFAULT_SEED_TEAM_COUNT, DEFAULT_SETUP_TIMEOUT, METRIC_HTTP_REQ_DURATION, METRIC_HTTP_REQ_FAILED,
};
use crate::error::{LoadTestError, LoadTestResult};
use crate::metrics::thresholds::Threshold;
use crate::models::WorkflowKind;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub pacing_ms: u64,
    pub request_timeout_secs: u64,
    pub setup_timeout_secs: u64,
    pub seed_team_count: usize,
    pub report_interval_secs: u64,
    pub scenarios: Vec<ScenarioConfig>,
    pub thresholds: BTreeMap<String, Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        let mut thresholds = BTreeMap::new();
        thresholds.insert(METRIC_HTTP_REQ_FAILED.to_string(), vec!["rate<0.0001".to_string()]);
        thresholds.insert(METRIC_HTTP_REQ_DURATION.to_string(), vec!["p(99)<100".to_string()]);

        Config {
            base_url: DEFAULT_BASE_URL.to_string(),
            pacing_ms: DEFAULT_PACING.as_millis() as u64,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT.as_secs(),
            setup_timeout_secs: DEFAULT_SETUP_TIMEOUT.as_secs(),
            seed_team_count: DEFAULT_SEED_TEAM_COUNT,
            report_interval_secs: DEFAULT_REPORT_INTERVAL_SECS,
            scenarios: vec![
                ScenarioConfig::constant_arrival_rate("team_scenario", WorkflowKind::Team),
                ScenarioConfig::constant_arrival_rate("pr_scenario", WorkflowKind::PullRequest),
            ],
            thresholds,
        }
    }
}

impl Config {
    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn setup_timeout(&self) -> Duration {
        Duration::from_secs(self.setup_timeout_secs)
    }

    /// Parsed threshold expressions, in metric-name order.
    pub fn parsed_thresholds(&self) -> LoadTestResult<Vec<Threshold>> {
        let mut parsed = Vec::new();
        for (metric, expressions) in &self.thresholds {
            for expression in expressions {
                parsed.push(Threshold::parse(metric, expression)?);
            }
        }
        Ok(parsed)
    }

    pub fn validate(&self) -> LoadTestResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(LoadTestError::ConfigError("base_url cannot be empty".to_string()));
        }
        if self.request_timeout_secs == 0 || self.setup_timeout_secs == 0 {
            return Err(LoadTestError::ConfigError("timeouts must be at least one second".to_string()));
        }
        if self.scenarios.is_empty() {
            return Err(LoadTestError::ConfigError("at least one scenario is required".to_string()));
        }
        for scenario in &self.scenarios {
            scenario.validate()?;
        }
        self.parsed_thresholds()?;
        Ok(())
    }
}

pub fn default_config_path() -> LoadTestResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| LoadTestError::ConfigError("Could not find home directory".to_string()))?;
    Ok(home_dir.join(CONFIG_FILE))
}

/// Load `~/.pr-loadtest.json`, falling back to defaults when it does not exist.
pub fn load_config() -> LoadTestResult<Config> {
    load_config_from(&default_config_path()?)
}

pub fn load_config_from(path: &Path) -> LoadTestResult<Config> {
    let mut config = if path.exists() {
        let config_str = fs::read_to_string(path)?;
        serde_json::from_str(&config_str)
            .map_err(|e| LoadTestError::ConfigError(format!("{}: {}", path.display(), e)))?
    } else {
        Config::default()
    };

    // Environment wins over the file
    if let Ok(base_url) = env::var(BASE_URL_ENV) {
        if !base_url.trim().is_empty() {
            config.base_url = base_url;
        }
    }

    Ok(config)
}

pub fn save_config(config: &Config) -> LoadTestResult<PathBuf> {
    let path = default_config_path()?;
    save_config_to(config, &path)?;
    Ok(path)
}

pub fn save_config_to(config: &Config, path: &Path) -> LoadTestResult<()> {
    let config_str = serde_json::to_string_pretty(config)?;
    fs::write(path, config_str)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_run() {
        let config = Config::default();
        assert_eq!(config.pacing(), Duration::from_millis(100));
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.setup_timeout(), Duration::from_secs(10));
        assert_eq!(config.seed_team_count, 10);
        assert_eq!(config.scenarios.len(), 2);
        assert!(config.validate().is_ok());
        assert_eq!(config.parsed_thresholds().unwrap().len(), 2);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{ "pacing_ms": 0 }"#).unwrap();
        assert_eq!(config.pacing_ms, 0);
        assert_eq!(config.seed_team_count, 10);
        assert_eq!(config.scenarios.len(), 2);
    }

    #[test]
    fn test_validate_rejects_bad_threshold() {
        let mut config = Config::default();
        config
            .thresholds
            .insert("http_req_duration".to_string(), vec!["p99 under 100".to_string()]);
        assert!(matches!(config.validate(), Err(LoadTestError::InvalidThreshold(_))));
    }

    #[test]
    fn test_validate_rejects_empty_base_url() {
        let config = Config {
            base_url: "  ".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(LoadTestError::ConfigError(_))));
    }
}
