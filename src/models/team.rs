use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A member as submitted to `/team/add`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Member {
    pub user_id: Uuid,
    pub username: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NewTeam {
    pub team_name: String,
    pub members: Vec<Member>,
}

impl NewTeam {
    pub fn new(team_name: impl Into<String>, members: Vec<Member>) -> Self {
        Self {
            team_name: team_name.into(),
            members,
        }
    }

    /// The registry entry this team becomes once the service accepts it.
    pub fn to_record(&self) -> TeamRecord {
        TeamRecord {
            team_name: self.team_name.clone(),
            user_ids: self.members.iter().map(|m| m.user_id).collect(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TeamMemberView {
    pub user_id: Uuid,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Body returned by `/team/get` and by a 201 from `/team/add`.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TeamResponse {
    pub team_name: String,
    #[serde(default)]
    pub members: Vec<TeamMemberView>,
}

impl TeamResponse {
    pub fn usernames(&self) -> Vec<&str> {
        self.members.iter().map(|m| m.username.as_str()).collect()
    }
}

/// Locally tracked team; never mutated after it lands in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRecord {
    pub team_name: String,
    pub user_ids: Vec<Uuid>,
}
