use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NewPullRequest {
    pub author_id: Uuid,
    pub pull_request_id: Uuid,
    pub pull_request_name: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MergePullRequest {
    pub pull_request_id: Uuid,
}
