use std::sync::Arc;
use std::time::Duration;

use super::fake_api::FakeApi;
use super::workload_with;
use crate::config::{Config, ScenarioConfig};
use crate::constants::{CHECK_MERGE_PR, METRIC_HTTP_REQ_FAILED};
use crate::engine::LoadTest;
use crate::error::LoadTestError;
use crate::models::WorkflowKind;
use crate::scenarios::run_scenario;
use crate::workflows::{IterationOutcome, SetupData};

fn short_scenario(name: &str, exec: WorkflowKind) -> ScenarioConfig {
    ScenarioConfig {
        rate: 10,
        time_unit_ms: 100,
        duration_secs: 1,
        pre_allocated_vus: 5,
        max_vus: 10,
        ..ScenarioConfig::constant_arrival_rate(name, exec)
    }
}

fn short_config() -> Config {
    Config {
        pacing_ms: 0,
        scenarios: vec![
            short_scenario("team_scenario", WorkflowKind::Team),
            short_scenario("pr_scenario", WorkflowKind::PullRequest),
        ],
        ..Config::default()
    }
}

#[tokio::test]
async fn test_scenario_accounts_for_every_scheduled_iteration() {
    let api = Arc::new(FakeApi::new().with_latency(Duration::from_millis(50)));
    let workload = Arc::new(workload_with(api));
    let data = Arc::new(SetupData {
        token: "test-token".to_string(),
    });

    let scenario = ScenarioConfig {
        rate: 1,
        time_unit_ms: 5,
        duration_secs: 1,
        pre_allocated_vus: 1,
        max_vus: 1,
        ..ScenarioConfig::constant_arrival_rate("team_scenario", WorkflowKind::Team)
    };
    let report = run_scenario(&scenario, workload.clone(), data).await;

    assert!(report.scheduled > 0);
    assert!(report.completed >= 1);
    // One slot and 100ms per iteration cannot keep up with a 5ms arrival gap
    assert!(report.dropped > 0);
    assert_eq!(report.panicked, 0);
    assert_eq!(
        report.scheduled,
        report.completed + report.short_circuited + report.dropped
    );

    let iterations = &workload.metrics().snapshot().iterations["team_scenario"];
    assert_eq!(iterations.dropped, report.dropped);
    assert_eq!(iterations.completed, report.completed);
    assert_eq!(iterations.in_flight, 0);
}

#[tokio::test]
async fn test_run_passes_thresholds_against_healthy_service() {
    let api = Arc::new(FakeApi::new());
    let load_test = LoadTest::new(short_config(), Arc::new(workload_with(api.clone()))).unwrap();

    let summary = load_test.run().await.unwrap();

    assert!(summary.passed());
    assert_eq!(summary.thresholds.len(), 2);
    assert!(summary.metrics.iterations.contains_key("team_scenario"));
    assert!(summary.metrics.iterations.contains_key("pr_scenario"));
    assert_eq!(summary.metrics.checks_total().fails, 0);
    assert!(!api.created_pull_requests().is_empty());
}

#[tokio::test]
async fn test_run_fails_thresholds_when_merges_fail() {
    let api = Arc::new(FakeApi::new().merge_pr_status(500));
    let load_test = LoadTest::new(short_config(), Arc::new(workload_with(api))).unwrap();

    let summary = load_test.run().await.unwrap();

    assert!(!summary.passed());
    let failed: Vec<_> = summary.failed_thresholds().collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].threshold.metric.as_str(), METRIC_HTTP_REQ_FAILED);
    assert!(summary.metrics.check(CHECK_MERGE_PR).fails > 0);
}

#[tokio::test]
async fn test_run_aborts_when_setup_fails() {
    let api = Arc::new(FakeApi::new().without_token());
    let load_test = LoadTest::new(short_config(), Arc::new(workload_with(api.clone()))).unwrap();

    let err = load_test.run().await.unwrap_err();
    assert!(matches!(err, LoadTestError::MissingToken));
    assert!(api.added_teams().is_empty());
}

#[tokio::test]
async fn test_smoke_without_client() {
    let api = Arc::new(FakeApi::new());
    let load_test = LoadTest::new(short_config(), Arc::new(workload_with(api))).unwrap();

    let report = load_test.smoke(None).await.unwrap();
    assert_eq!(report.seeded_teams, 10);
    assert_eq!(report.team, IterationOutcome::Completed);
    assert_eq!(report.pull_request, IterationOutcome::Completed);
    assert!(report.roundtrip.is_none());
    assert!(report.passed());
}

#[test]
fn test_invalid_threshold_rejected_up_front() {
    let mut config = short_config();
    config
        .thresholds
        .insert("http_req_duration".to_string(), vec!["p(99)~100".to_string()]);
    let api = Arc::new(FakeApi::new());
    let result = LoadTest::new(config, Arc::new(workload_with(api)));
    assert!(matches!(result, Err(LoadTestError::InvalidThreshold(_))));
}
