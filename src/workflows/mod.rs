//! The two workflow generators and the one-off setup they depend on.

pub mod pull_request;
pub mod setup;
pub mod team;

use std::sync::Arc;
use std::time::Duration;

use crate::client::{HttpOutcome, ReviewersApi};
use crate::config::Config;
use crate::constants::{DEFAULT_PACING, DEFAULT_REQUEST_TIMEOUT, DEFAULT_SEED_TEAM_COUNT, DEFAULT_SETUP_TIMEOUT};
use crate::metrics::MetricsCollector;
use crate::models::WorkflowKind;
use crate::registry::TeamRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkloadOptions {
    /// Pause at the end of every iteration; zero skips it.
    pub pacing: Duration,
    pub request_timeout: Duration,
    pub setup_timeout: Duration,
    pub seed_team_count: usize,
}

impl Default for WorkloadOptions {
    fn default() -> Self {
        Self {
            pacing: DEFAULT_PACING,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            setup_timeout: DEFAULT_SETUP_TIMEOUT,
            seed_team_count: DEFAULT_SEED_TEAM_COUNT,
        }
    }
}

impl From<&Config> for WorkloadOptions {
    fn from(config: &Config) -> Self {
        Self {
            pacing: config.pacing(),
            request_timeout: config.request_timeout(),
            setup_timeout: config.setup_timeout(),
            seed_team_count: config.seed_team_count,
        }
    }
}

/// Produced once by setup and shared read-only by every iteration.
#[derive(Debug, Clone)]
pub struct SetupData {
    pub token: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationOutcome {
    Completed,
    /// Stopped early without recording any check.
    ShortCircuited,
}

pub struct Workload {
    api: Arc<dyn ReviewersApi>,
    registry: TeamRegistry,
    metrics: MetricsCollector,
    options: WorkloadOptions,
}

impl Workload {
    pub fn new(
        api: Arc<dyn ReviewersApi>,
        registry: TeamRegistry,
        metrics: MetricsCollector,
        options: WorkloadOptions,
    ) -> Self {
        Self {
            api,
            registry,
            metrics,
            options,
        }
    }

    pub fn registry(&self) -> &TeamRegistry {
        &self.registry
    }

    pub fn metrics(&self) -> &MetricsCollector {
        &self.metrics
    }

    pub fn options(&self) -> &WorkloadOptions {
        &self.options
    }

    pub async fn run(&self, kind: WorkflowKind, data: &SetupData) -> IterationOutcome {
        match kind {
            WorkflowKind::Team => self.team_workflow(data).await,
            WorkflowKind::PullRequest => self.pr_workflow(data).await,
        }
    }

    fn observe(&self, outcome: &HttpOutcome) {
        self.metrics.record_request(outcome);
    }

    fn check(&self, name: &str, passed: bool, outcome: &HttpOutcome) {
        if !passed {
            tracing::debug!(check = name, status = ?outcome.status, error = ?outcome.error, "check failed");
        }
        self.metrics.record_check(name, passed);
    }

    async fn pace(&self) {
        if !self.options.pacing.is_zero() {
            tokio::time::sleep(self.options.pacing).await;
        }
    }
}
