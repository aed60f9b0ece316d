pub mod auth;
pub mod pull_request;
pub mod team;

// Re-export commonly used types
pub use auth::{ErrorBody, ErrorResponse, LoginResponse};
pub use pull_request::{MergePullRequest, NewPullRequest};
pub use team::{Member, NewTeam, TeamMemberView, TeamRecord, TeamResponse};

use serde::{Deserialize, Serialize};

/// Which workflow generator a scenario drives.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowKind {
    #[serde(alias = "teamWorkflowTest")]
    Team,
    #[serde(alias = "prWorkflowTest", alias = "pr")]
    PullRequest,
}

impl WorkflowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowKind::Team => "team",
            WorkflowKind::PullRequest => "pull_request",
        }
    }
}

impl std::fmt::Display for WorkflowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
