use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use sprintcov_config::AppConfig;

use super::models::{JiraBoardSprintsResponse, JiraIssue, JiraSearchResponse, JiraSprint};

#[derive(Debug, Clone)]
pub struct JiraClientConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub max_results: u32,
    pub max_retries: u32,
    pub timeout_secs: u64,
}

impl From<&AppConfig> for JiraClientConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            base_url: config.server.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
            max_results: config.max_results,
            max_retries: config.max_retries,
            timeout_secs: config.timeout_secs,
        }
    }
}

/// Exponential backoff before retry `attempt`, capped at 30 seconds.
fn backoff_secs(attempt: u32) -> u64 {
    1u64.checked_shl(attempt).unwrap_or(u64::MAX).min(30)
}

#[derive(Clone)]
pub struct JiraClient {
    client: Client,
    config: JiraClientConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum JiraClientError {
    #[error("HTTP {status}: {body}")]
    HttpError { status: StatusCode, body: String },

    #[error("request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

impl JiraClient {
    pub fn new(config: JiraClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Fetch sprint metadata (name, dates) by id.
    pub async fn fetch_sprint(&self, sprint_id: u64) -> Result<JiraSprint, JiraClientError> {
        let url = format!("{}/rest/agile/1.0/sprint/{}", self.config.base_url, sprint_id);
        self.request_with_retry(&url, &[]).await
    }

    /// The active sprint of a board, if there is one.
    pub async fn fetch_active_sprint(
        &self,
        board_id: u64,
    ) -> Result<Option<JiraSprint>, JiraClientError> {
        let url = format!("{}/rest/agile/1.0/board/{}/sprint", self.config.base_url, board_id);
        let page: JiraBoardSprintsResponse = self
            .request_with_retry(&url, &[("state", "active".to_string())])
            .await?;
        tracing::debug!(
            board_id,
            active = page.values.len(),
            is_last = page.is_last,
            "active sprints"
        );
        Ok(page.values.into_iter().next())
    }

    /// Run a JQL search, returning at most `max_results` issues with their labels.
    ///
    /// Results beyond the cap are not fetched.
    pub async fn search_issues(&self, jql: &str) -> Result<Vec<JiraIssue>, JiraClientError> {
        let url = format!("{}/rest/api/2/search", self.config.base_url);
        let query = [
            ("jql", jql.to_string()),
            ("maxResults", self.config.max_results.to_string()),
            ("fields", "labels".to_string()),
        ];

        let page: JiraSearchResponse = self.request_with_retry(&url, &query).await?;
        tracing::debug!(
            start_at = page.start_at,
            max_results = page.max_results,
            total = page.total,
            returned = page.issues.len(),
            "jira search page"
        );
        if page.total as usize > page.issues.len() {
            tracing::warn!(
                total = page.total,
                returned = page.issues.len(),
                cap = self.config.max_results,
                "search result truncated at cap"
            );
        }

        Ok(page.issues)
    }

    async fn request_with_retry<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, JiraClientError> {
        let mut last_error = String::new();

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                let backoff_secs = backoff_secs(attempt);
                tracing::warn!(attempt, backoff_secs, url, "retrying after backoff");
                tokio::time::sleep(Duration::from_secs(backoff_secs)).await;
            }

            let response = match self
                .client
                .get(url)
                .query(query)
                .basic_auth(&self.config.username, Some(&self.config.password))
                .send()
                .await
            {
                Ok(resp) => resp,
                Err(e) => {
                    last_error = e.to_string();
                    if e.is_timeout() || e.is_connect() {
                        continue;
                    }
                    return Err(JiraClientError::RequestError(e));
                }
            };

            let status = response.status();

            if status.is_success() {
                return response
                    .json::<T>()
                    .await
                    .map_err(JiraClientError::RequestError);
            }

            // Honor Retry-After header for 429
            if status == StatusCode::TOO_MANY_REQUESTS {
                if let Some(retry_after) = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                {
                    let wait = std::cmp::min(retry_after, 60);
                    tracing::warn!(wait, "rate-limited, waiting Retry-After");
                    tokio::time::sleep(Duration::from_secs(wait)).await;
                }
                last_error = "429 Too Many Requests".to_string();
                continue;
            }

            if status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                last_error = format!("{status}: {body}");
                continue;
            }

            // 401/403/404 and friends are not retried
            let body = response.text().await.unwrap_or_default();
            return Err(JiraClientError::HttpError { status, body });
        }

        Err(JiraClientError::MaxRetriesExceeded {
            attempts: self.config.max_retries + 1,
            last_error,
        })
    }
}
