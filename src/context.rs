use std::path::PathBuf;
use std::sync::Arc;

use crate::client::{ReviewersApi, ReviewersClient};
use crate::config::{load_config, load_config_from, Config};
use crate::error::{LoadTestError, LoadTestResult};
use crate::metrics::MetricsCollector;
use crate::models::WorkflowKind;
use crate::registry::TeamRegistry;
use crate::workflows::{Workload, WorkloadOptions};

/// Central context for a run, owning the configuration and the shared pieces
/// every iteration sees: client, team registry and metrics.
pub struct RunContext {
    config: Config,
    api: Option<Arc<dyn ReviewersApi>>,
    client: Option<Arc<ReviewersClient>>,
    registry: TeamRegistry,
    metrics: MetricsCollector,
}

impl RunContext {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            api: None,
            client: None,
            registry: TeamRegistry::new(),
            metrics: MetricsCollector::new(),
        }
    }

    /// Load context from the saved configuration.
    pub fn load() -> LoadTestResult<Self> {
        let config = load_config()?;
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &TeamRegistry {
        &self.registry
    }

    pub fn metrics(&self) -> &MetricsCollector {
        &self.metrics
    }

    /// Get or create the HTTP client for the configured base URL.
    pub fn client(&mut self) -> LoadTestResult<Arc<ReviewersClient>> {
        if let Some(client) = &self.client {
            return Ok(client.clone());
        }

        let client = Arc::new(ReviewersClient::new(self.config.base_url.clone())?);
        self.client = Some(client.clone());
        Ok(client)
    }

    /// The API the workload talks to: an injected one, or the HTTP client.
    pub fn api(&mut self) -> LoadTestResult<Arc<dyn ReviewersApi>> {
        if let Some(api) = &self.api {
            return Ok(api.clone());
        }
        let client: Arc<dyn ReviewersApi> = self.client()?;
        Ok(client)
    }

    pub fn workload(&mut self) -> LoadTestResult<Arc<Workload>> {
        Ok(Arc::new(Workload::new(
            self.api()?,
            self.registry.clone(),
            self.metrics.clone(),
            WorkloadOptions::from(&self.config),
        )))
    }
}

/// Builder for contexts with command-line overrides applied on top of the
/// configuration file.
#[derive(Default)]
pub struct RunContextBuilder {
    config: Option<Config>,
    config_path: Option<PathBuf>,
    api: Option<Arc<dyn ReviewersApi>>,
    base_url: Option<String>,
    rate: Option<u32>,
    duration_secs: Option<u64>,
    max_vus: Option<usize>,
    pacing_ms: Option<u64>,
    only: Option<WorkflowKind>,
}

impl RunContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn with_api(mut self, api: Arc<dyn ReviewersApi>) -> Self {
        self.api = Some(api);
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_rate(mut self, rate: u32) -> Self {
        self.rate = Some(rate);
        self
    }

    pub fn with_duration_secs(mut self, duration_secs: u64) -> Self {
        self.duration_secs = Some(duration_secs);
        self
    }

    pub fn with_max_vus(mut self, max_vus: usize) -> Self {
        self.max_vus = Some(max_vus);
        self
    }

    pub fn with_pacing_ms(mut self, pacing_ms: u64) -> Self {
        self.pacing_ms = Some(pacing_ms);
        self
    }

    /// Keep only the scenarios driving `kind`.
    pub fn only(mut self, kind: WorkflowKind) -> Self {
        self.only = Some(kind);
        self
    }

    pub fn build(self) -> LoadTestResult<RunContext> {
        let mut config = match (self.config, &self.config_path) {
            (Some(config), _) => config,
            (None, Some(path)) => load_config_from(path)?,
            (None, None) => load_config()?,
        };

        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(pacing_ms) = self.pacing_ms {
            config.pacing_ms = pacing_ms;
        }
        if let Some(kind) = self.only {
            config.scenarios.retain(|s| s.exec == kind);
            if config.scenarios.is_empty() {
                return Err(LoadTestError::ConfigError(format!("no scenario runs the {} workflow", kind)));
            }
        }
        for scenario in &mut config.scenarios {
            if let Some(rate) = self.rate {
                scenario.rate = rate;
            }
            if let Some(duration_secs) = self.duration_secs {
                scenario.duration_secs = duration_secs;
            }
            if let Some(max_vus) = self.max_vus {
                scenario.max_vus = max_vus;
                scenario.pre_allocated_vus = scenario.pre_allocated_vus.min(max_vus);
            }
        }

        config.validate()?;

        let mut context = RunContext::new(config);
        context.api = self.api;
        Ok(context)
    }
}
