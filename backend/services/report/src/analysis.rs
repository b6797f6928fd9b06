use sprintcov_common::error::{SprintcovError, SprintcovResult};
use sprintcov_config::AppConfig;
use sprintcov_coverage::{classify, ChartEntry, SprintCoverageResult, SprintInfo};

use crate::source::SprintSource;

/// The sprint to analyse: the configured id, otherwise the active sprint of the
/// configured board.
pub async fn resolve_sprint<S>(source: &S, config: &AppConfig) -> SprintcovResult<SprintInfo>
where
    S: SprintSource + ?Sized,
{
    if let Some(sprint_id) = config.sprint_id {
        return source.sprint(sprint_id).await;
    }

    let board_id = config.board_id.ok_or_else(|| {
        SprintcovError::Config("either JIRA_SPRINT_ID or JIRA_BOARD_ID must be set".to_owned())
    })?;

    tracing::info!(board_id, "no sprint configured, looking up active sprint");
    source
        .active_sprint(board_id)
        .await?
        .ok_or_else(|| SprintcovError::NotFound(format!("no active sprint on board {board_id}")))
}

/// Fetch the sprint and its issues, then classify them by coverage label.
pub async fn analyze_sprint<S>(source: &S, config: &AppConfig) -> SprintcovResult<SprintCoverageResult>
where
    S: SprintSource + ?Sized,
{
    let sprint = resolve_sprint(source, config).await?;
    tracing::info!(
        sprint_id = sprint.id,
        name = %sprint.name,
        start = ?sprint.start_date,
        end = ?sprint.end_date,
        "sprint resolved"
    );

    let issues = source.sprint_issues(sprint.id, &config.project_name).await?;
    tracing::info!(count = issues.len(), "fetched sprint issues");

    let result = classify(sprint, &issues);
    for (category, keys) in result.categories() {
        tracing::debug!(category = %category, count = keys.len(), "category tally");
    }
    Ok(result)
}

/// One log line per emitted wedge.
pub fn log_summary(result: &SprintCoverageResult, entries: &[ChartEntry]) {
    if entries.is_empty() {
        tracing::warn!(sprint_id = result.sprint().id, "sprint has no issues, nothing to chart");
        return;
    }

    tracing::info!(
        sprint_id = result.sprint().id,
        total = result.total(),
        wedges = entries.len(),
        "coverage summary"
    );
    for entry in entries {
        tracing::info!(
            bucket = %entry.label,
            count = entry.count,
            percent = %format!("{:.2}", entry.ratio * 100.0),
            "coverage bucket"
        );
    }
}
