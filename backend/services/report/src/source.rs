use async_trait::async_trait;
use sprintcov_common::error::{SprintcovError, SprintcovResult};
use sprintcov_coverage::{Issue, SprintInfo};

use crate::jira::client::{JiraClient, JiraClientError};
use crate::jira::query::build_sprint_issues_jql;

/// Where sprint metadata and sprint issues come from.
#[async_trait]
pub trait SprintSource: Send + Sync {
    async fn sprint(&self, sprint_id: u64) -> SprintcovResult<SprintInfo>;

    async fn active_sprint(&self, board_id: u64) -> SprintcovResult<Option<SprintInfo>>;

    /// Work items of `sprint_id` in `project_name`, up to the source's result cap.
    async fn sprint_issues(&self, sprint_id: u64, project_name: &str)
        -> SprintcovResult<Vec<Issue>>;
}

impl From<JiraClientError> for SprintcovError {
    fn from(err: JiraClientError) -> Self {
        SprintcovError::Upstream(format!("jira: {err}"))
    }
}

#[async_trait]
impl SprintSource for JiraClient {
    async fn sprint(&self, sprint_id: u64) -> SprintcovResult<SprintInfo> {
        let sprint = self.fetch_sprint(sprint_id).await?;
        tracing::debug!(sprint_id, state = ?sprint.state, "fetched sprint");
        Ok(sprint.into_sprint_info())
    }

    async fn active_sprint(&self, board_id: u64) -> SprintcovResult<Option<SprintInfo>> {
        Ok(self
            .fetch_active_sprint(board_id)
            .await?
            .map(|s| s.into_sprint_info()))
    }

    async fn sprint_issues(
        &self,
        sprint_id: u64,
        project_name: &str,
    ) -> SprintcovResult<Vec<Issue>> {
        let jql = build_sprint_issues_jql(sprint_id, project_name);
        tracing::info!(jql = %jql, "searching sprint issues");
        let issues = self.search_issues(&jql).await?;
        Ok(issues.into_iter().map(|i| i.into_issue()).collect())
    }
}
