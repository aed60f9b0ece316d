use std::time::Duration;

use async_trait::async_trait;

use crate::error::LoadTestResult;
use crate::models::{MergePullRequest, NewPullRequest, NewTeam};

/// What a single request produced, as far as the workload cares.
///
/// `status` is `None` when no response arrived at all (connect failure,
/// per-call timeout, body write error).
#[derive(Debug, Clone, PartialEq)]
pub struct HttpOutcome {
    pub status: Option<u16>,
    pub duration: Duration,
    pub error: Option<String>,
}

impl HttpOutcome {
    pub fn with_status(status: u16, duration: Duration) -> Self {
        Self {
            status: Some(status),
            duration,
            error: None,
        }
    }

    pub fn transport_error(error: impl std::fmt::Display, duration: Duration) -> Self {
        Self {
            status: None,
            duration,
            error: Some(error.to_string()),
        }
    }

    pub fn status_is(&self, code: u16) -> bool {
        self.status == Some(code)
    }

    pub fn status_in(&self, codes: &[u16]) -> bool {
        self.status.map_or(false, |s| codes.contains(&s))
    }

    /// Counted as a failed request when there is no response or the status
    /// falls outside 200..400.
    pub fn is_http_failure(&self) -> bool {
        match self.status {
            Some(status) => !(200..400).contains(&status),
            None => true,
        }
    }
}

/// Login result together with the request that produced it, so setup can
/// account for it like any other call.
#[derive(Debug)]
pub struct LoginAttempt {
    pub outcome: HttpOutcome,
    pub token: LoadTestResult<String>,
}

/// Calls the workload makes against the reviewers service.
///
/// Everything after login is authorized with the bearer token from setup and
/// bounded by the given timeout. Failures are reported through the returned
/// outcome and never as `Err`.
#[async_trait]
pub trait ReviewersApi: Send + Sync {
    /// Unauthenticated login; `token` is an error when the response carries none.
    async fn dummy_login(&self) -> LoginAttempt;

    async fn add_team(&self, token: &str, team: &NewTeam, timeout: Duration) -> HttpOutcome;

    async fn get_team(&self, token: &str, team_name: &str, timeout: Duration) -> HttpOutcome;

    async fn create_pull_request(
        &self,
        token: &str,
        pull_request: &NewPullRequest,
        timeout: Duration,
    ) -> HttpOutcome;

    async fn merge_pull_request(
        &self,
        token: &str,
        merge: &MergePullRequest,
        timeout: Duration,
    ) -> HttpOutcome;
}
