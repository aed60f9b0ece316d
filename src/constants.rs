use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://pr-reviewers-service:8080/api/v1";
pub const CONFIG_FILE: &str = ".pr-loadtest.json";
pub const BASE_URL_ENV: &str = "PR_LOADTEST_BASE_URL";

// Service routes, relative to the base URL
pub const LOGIN_PATH: &str = "/dummyLogin";
pub const TEAM_ADD_PATH: &str = "/team/add";
pub const TEAM_GET_PATH: &str = "/team/get";
pub const PR_CREATE_PATH: &str = "/pullRequest/create";
pub const PR_MERGE_PATH: &str = "/pullRequest/merge";

pub const DEFAULT_PACING: Duration = Duration::from_millis(100);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_SETUP_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_SEED_TEAM_COUNT: usize = 10;
pub const DEFAULT_REPORT_INTERVAL_SECS: u64 = 5;

pub const DEFAULT_RATE: u32 = 250;
pub const DEFAULT_TIME_UNIT_MS: u64 = 1_000;
pub const DEFAULT_DURATION_SECS: u64 = 60;
pub const DEFAULT_PRE_ALLOCATED_VUS: usize = 70;
pub const DEFAULT_MAX_VUS: usize = 150;

// Check names, as they appear in the summary
pub const CHECK_CREATE_TEAM: &str = "create team ok";
pub const CHECK_GET_TEAM: &str = "get team info ok";
pub const CHECK_CREATE_PR: &str = "create PR ok";
pub const CHECK_MERGE_PR: &str = "merge PR ok";

// Metric names accepted in threshold definitions
pub const METRIC_HTTP_REQ_FAILED: &str = "http_req_failed";
pub const METRIC_HTTP_REQ_DURATION: &str = "http_req_duration";
pub const METRIC_CHECKS: &str = "checks";

/// Exit code used when the run finished but a threshold was crossed.
pub const THRESHOLDS_FAILED_EXIT_CODE: i32 = 99;
