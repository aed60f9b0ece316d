//! In-process stand-in for the reviewers service, enough of `/api/v1` for the
//! workload to run against.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::task::JoinHandle;

pub const MOCK_TOKEN: &str = "mock-token";

#[derive(Default)]
pub struct MockState {
    pub teams: HashMap<String, Vec<Value>>,
    pub users: HashSet<String>,
    pub pull_requests: HashMap<String, bool>,
    pub fail_team_add: bool,
    pub omit_token: bool,
}

type Shared = Arc<Mutex<MockState>>;

pub struct MockService {
    pub base_url: String,
    pub state: Shared,
    handle: JoinHandle<()>,
}

impl MockService {
    pub async fn start() -> Self {
        Self::start_with(MockState::default()).await
    }

    pub async fn start_with(state: MockState) -> Self {
        let state: Shared = Arc::new(Mutex::new(state));
        let app = Router::new()
            .route("/api/v1/dummyLogin", post(login))
            .route("/api/v1/team/add", post(add_team))
            .route("/api/v1/team/get", get(get_team))
            .route("/api/v1/pullRequest/create", post(create_pull_request))
            .route("/api/v1/pullRequest/merge", post(merge_pull_request))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}/api/v1", addr),
            state,
            handle,
        }
    }

    pub fn set_fail_team_add(&self, fail: bool) {
        self.state.lock().fail_team_add = fail;
    }

    pub fn team_count(&self) -> usize {
        self.state.lock().teams.len()
    }

    pub fn pull_request_ids(&self) -> Vec<String> {
        self.state.lock().pull_requests.keys().cloned().collect()
    }

    pub fn merged_count(&self) -> usize {
        self.state.lock().pull_requests.values().filter(|m| **m).count()
    }
}

impl Drop for MockService {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn error(status: StatusCode, code: &str, message: &str) -> Response {
    (status, Json(json!({ "error": { "code": code, "message": message } }))).into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map_or(false, |v| v == format!("Bearer {}", MOCK_TOKEN))
}

async fn login(State(state): State<Shared>) -> Response {
    if state.lock().omit_token {
        return Json(json!({})).into_response();
    }
    Json(json!({ "token": MOCK_TOKEN })).into_response()
}

async fn add_team(State(state): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "missing token");
    }
    let mut state = state.lock();
    if state.fail_team_add {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "UNKNOWN", "internal server error");
    }

    let Some(team_name) = body["team_name"].as_str().map(str::to_string) else {
        return error(StatusCode::UNPROCESSABLE_ENTITY, "BAD_REQUEST", "validation failed");
    };
    if state.teams.contains_key(&team_name) {
        return StatusCode::NOT_MODIFIED.into_response();
    }

    let members: Vec<Value> = body["members"]
        .as_array()
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .map(|m| json!({ "user_id": m["user_id"], "username": m["username"], "is_active": true }))
        .collect();
    for member in &members {
        if let Some(id) = member["user_id"].as_str() {
            state.users.insert(id.to_string());
        }
    }
    state.teams.insert(team_name.clone(), members.clone());

    (StatusCode::CREATED, Json(json!({ "team_name": team_name, "members": members }))).into_response()
}

async fn get_team(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "missing token");
    }
    let team_name = params.get("team_name").map(|s| s.trim()).unwrap_or_default();
    if team_name.is_empty() {
        return error(StatusCode::BAD_REQUEST, "BAD_REQUEST", "team_name cannot be empty");
    }

    let state = state.lock();
    match state.teams.get(team_name) {
        Some(members) => Json(json!({ "team_name": team_name, "members": members })).into_response(),
        None => error(StatusCode::NOT_FOUND, "NOT_FOUND", "there is no team looking for"),
    }
}

async fn create_pull_request(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "missing token");
    }
    let mut state = state.lock();
    let author = body["author_id"].as_str().unwrap_or_default().to_string();
    let pr_id = body["pull_request_id"].as_str().unwrap_or_default().to_string();

    if !state.users.contains(&author) {
        return error(StatusCode::NOT_FOUND, "NOT_FOUND", "author not found");
    }
    if state.pull_requests.contains_key(&pr_id) {
        return error(StatusCode::CONFLICT, "PR_EXISTS", "pull request already exists");
    }
    state.pull_requests.insert(pr_id.clone(), false);

    (
        StatusCode::CREATED,
        Json(json!({ "pr": { "pull_request_id": pr_id, "author_id": author, "status": "OPEN" } })),
    )
        .into_response()
}

async fn merge_pull_request(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "missing token");
    }
    let mut state = state.lock();
    let pr_id = body["pull_request_id"].as_str().unwrap_or_default().to_string();

    match state.pull_requests.get_mut(&pr_id) {
        Some(merged) => {
            *merged = true;
            Json(json!({ "pr": { "pull_request_id": pr_id, "status": "MERGED" } })).into_response()
        }
        None => error(StatusCode::NOT_FOUND, "NOT_FOUND", "pull request not found"),
    }
}
