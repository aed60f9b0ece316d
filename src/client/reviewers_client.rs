use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::RequestBuilder;
use serde_json::json;

use crate::client::api::{HttpOutcome, LoginAttempt, ReviewersApi};
use crate::constants::{LOGIN_PATH, PR_CREATE_PATH, PR_MERGE_PATH, TEAM_ADD_PATH, TEAM_GET_PATH};
use crate::error::{LoadTestError, LoadTestResult};
use crate::models::{ErrorResponse, LoginResponse, MergePullRequest, NewPullRequest, NewTeam, TeamResponse};

/// JSON headers plus the bearer token for every authorized call.
pub fn auth_headers(token: &str) -> LoadTestResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    let bearer = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|e| LoadTestError::InvalidInput(format!("Token is not a valid header value: {}", e)))?;
    headers.insert(AUTHORIZATION, bearer);
    Ok(headers)
}

/// reqwest-backed client for the `/api/v1` surface of the reviewers service.
#[derive(Clone)]
pub struct ReviewersClient {
    client: reqwest::Client,
    base_url: String,
}

impl ReviewersClient {
    pub fn new(base_url: impl Into<String>) -> LoadTestResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder, token: &str, timeout: Duration) -> HttpOutcome {
        let headers = match auth_headers(token) {
            Ok(headers) => headers,
            Err(e) => return HttpOutcome::transport_error(e, Duration::ZERO),
        };

        let start = Instant::now();
        match request.headers(headers).timeout(timeout).send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                // Drain the body so the connection goes back to the pool.
                if let Err(e) = response.bytes().await {
                    tracing::debug!(status, error = %e, "failed to read response body");
                }
                HttpOutcome::with_status(status, start.elapsed())
            }
            Err(e) => {
                tracing::debug!(error = %e, "request failed before a response arrived");
                HttpOutcome::transport_error(e, start.elapsed())
            }
        }
    }

    /// Fetch a team and decode it; any status other than 200 is an error.
    pub async fn fetch_team(&self, token: &str, team_name: &str) -> LoadTestResult<TeamResponse> {
        let response = self
            .client
            .get(self.url(TEAM_GET_PATH))
            .query(&[("team_name", team_name)])
            .headers(auth_headers(token)?)
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&text)
                .map(|e| format!("{}: {}", e.error.code, e.error.message))
                .unwrap_or(text);
            return Err(LoadTestError::ApiError(format!(
                "get team '{}' returned {}: {}",
                team_name, status, message
            )));
        }

        Ok(response.json::<TeamResponse>().await?)
    }
}

#[async_trait]
impl ReviewersApi for ReviewersClient {
    async fn dummy_login(&self) -> LoginAttempt {
        let start = Instant::now();
        let response = match self.client.post(self.url(LOGIN_PATH)).json(&json!({})).send().await {
            Ok(response) => response,
            Err(e) => {
                return LoginAttempt {
                    outcome: HttpOutcome::transport_error(&e, start.elapsed()),
                    token: Err(e.into()),
                };
            }
        };

        let status = response.status();
        let body = response.json::<LoginResponse>().await;
        let outcome = HttpOutcome::with_status(status.as_u16(), start.elapsed());

        let token = body
            .map_err(|e| LoadTestError::SetupFailed(format!("login response ({}) is not JSON: {}", status, e)))
            .and_then(|body| {
                body.token
                    .filter(|token| !token.is_empty())
                    .ok_or(LoadTestError::MissingToken)
            });

        LoginAttempt { outcome, token }
    }

    async fn add_team(&self, token: &str, team: &NewTeam, timeout: Duration) -> HttpOutcome {
        let request = self.client.post(self.url(TEAM_ADD_PATH)).json(team);
        self.send(request, token, timeout).await
    }

    async fn get_team(&self, token: &str, team_name: &str, timeout: Duration) -> HttpOutcome {
        let request = self
            .client
            .get(self.url(TEAM_GET_PATH))
            .query(&[("team_name", team_name)]);
        self.send(request, token, timeout).await
    }

    async fn create_pull_request(
        &self,
        token: &str,
        pull_request: &NewPullRequest,
        timeout: Duration,
    ) -> HttpOutcome {
        let request = self.client.post(self.url(PR_CREATE_PATH)).json(pull_request);
        self.send(request, token, timeout).await
    }

    async fn merge_pull_request(
        &self,
        token: &str,
        merge: &MergePullRequest,
        timeout: Duration,
    ) -> HttpOutcome {
        let request = self.client.post(self.url(PR_MERGE_PATH)).json(merge);
        self.send(request, token, timeout).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_headers() {
        let headers = auth_headers("abc").unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer abc");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn test_auth_headers_rejects_control_characters() {
        assert!(matches!(
            auth_headers("bad\ntoken"),
            Err(LoadTestError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ReviewersClient::new("http://localhost:8080/api/v1/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api/v1");
        assert_eq!(client.url(TEAM_ADD_PATH), "http://localhost:8080/api/v1/team/add");
    }
}
