//! Ties setup, the scenarios and threshold evaluation into one run.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::task::JoinSet;

use crate::client::{ReviewersApi, ReviewersClient};
use crate::config::Config;
use crate::context::RunContext;
use crate::error::LoadTestResult;
use crate::ids;
use crate::metrics::reporter::start_periodic_reporter;
use crate::metrics::thresholds::evaluate_all;
use crate::metrics::{RunSummary, TestMetrics, Threshold};
use crate::models::NewTeam;
use crate::scenarios::{run_scenario, ScenarioReport};
use crate::workflows::{IterationOutcome, SetupData, Workload};

pub struct LoadTest {
    config: Config,
    workload: Arc<Workload>,
    thresholds: Vec<Threshold>,
}

/// Result of a single pass through both workflows.
#[derive(Debug, Clone)]
pub struct SmokeReport {
    pub seeded_teams: usize,
    pub team: IterationOutcome,
    pub pull_request: IterationOutcome,
    /// `Some(true)` when a freshly created team read back with the same usernames.
    pub roundtrip: Option<bool>,
    pub metrics: TestMetrics,
}

impl SmokeReport {
    pub fn passed(&self) -> bool {
        self.metrics.checks_total().fails == 0 && self.roundtrip.unwrap_or(true)
    }
}

impl LoadTest {
    pub fn new(config: Config, workload: Arc<Workload>) -> LoadTestResult<Self> {
        let thresholds = config.parsed_thresholds()?;
        Ok(Self {
            config,
            workload,
            thresholds,
        })
    }

    pub fn from_context(context: &mut RunContext) -> LoadTestResult<Self> {
        let workload = context.workload()?;
        Self::new(context.config().clone(), workload)
    }

    pub fn workload(&self) -> &Arc<Workload> {
        &self.workload
    }

    /// Setup, then every configured scenario concurrently, then thresholds.
    pub async fn run(&self) -> LoadTestResult<RunSummary> {
        let data = Arc::new(self.workload.setup().await?);
        let metrics = self.workload.metrics().clone();

        let reporter = tokio::spawn(start_periodic_reporter(
            metrics.clone(),
            self.config.report_interval_secs,
        ));

        let mut scenarios = JoinSet::new();
        for scenario in self.config.scenarios.clone() {
            let workload = self.workload.clone();
            let data = data.clone();
            scenarios.spawn(async move { run_scenario(&scenario, workload, data).await });
        }

        let mut reports: Vec<ScenarioReport> = Vec::new();
        while let Some(joined) = scenarios.join_next().await {
            match joined {
                Ok(report) => reports.push(report),
                Err(e) => tracing::error!(error = %e, "scenario task failed"),
            }
        }
        reporter.abort();

        let summary = RunSummary {
            metrics: metrics.snapshot(),
            latency: metrics.latency_stats(),
            thresholds: evaluate_all(&self.thresholds, &metrics),
            elapsed: metrics.elapsed(),
        };

        for failed in summary.failed_thresholds() {
            tracing::warn!(threshold = %failed, "threshold crossed");
        }
        tracing::info!(scenarios = reports.len(), passed = summary.passed(), "run finished");
        Ok(summary)
    }

    /// One iteration of each workflow, plus a create/read-back comparison
    /// when an HTTP client is available.
    pub async fn smoke(&self, client: Option<&ReviewersClient>) -> LoadTestResult<SmokeReport> {
        let data = self.workload.setup().await?;
        let seeded_teams = self.workload.registry().len();

        let team = self.workload.team_workflow(&data).await;
        let pull_request = self.workload.pr_workflow(&data).await;

        let roundtrip = match client {
            Some(client) => Some(verify_team_roundtrip(client, &data, &self.config).await?),
            None => None,
        };

        Ok(SmokeReport {
            seeded_teams,
            team,
            pull_request,
            roundtrip,
            metrics: self.workload.metrics().snapshot(),
        })
    }
}

/// Create a team and check the service returns exactly the submitted usernames.
pub async fn verify_team_roundtrip(
    client: &ReviewersClient,
    data: &SetupData,
    config: &Config,
) -> LoadTestResult<bool> {
    let team = NewTeam::new(ids::team_name(), ids::fresh_members());
    let created = client.add_team(&data.token, &team, config.request_timeout()).await;
    if !created.status_is(201) {
        tracing::warn!(status = ?created.status, "round-trip team was not created");
        return Ok(false);
    }

    let fetched = client.fetch_team(&data.token, &team.team_name).await?;
    let submitted: HashSet<&str> = team.members.iter().map(|m| m.username.as_str()).collect();
    let returned: HashSet<&str> = fetched.usernames().into_iter().collect();
    Ok(fetched.team_name == team.team_name && submitted == returned)
}
