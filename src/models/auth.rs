use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// Error envelope the service uses for every non-2xx response.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}
