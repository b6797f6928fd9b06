mod analysis;
mod chart;
mod jira;
mod source;

use sprintcov_common::error::{SprintcovError, SprintcovResult};
use sprintcov_config::{init_tracing, AppConfig};
use sprintcov_coverage::partition;

use crate::analysis::{analyze_sprint, log_summary};
use crate::chart::{chart_title, render_pie_svg, write_chart};
use crate::jira::client::{JiraClient, JiraClientConfig};

async fn run(config: AppConfig) -> SprintcovResult<()> {
    tracing::info!(
        server = %config.server,
        project = %config.project_name,
        sprint_id = ?config.sprint_id,
        board_id = ?config.board_id,
        "configuration loaded"
    );

    let client = JiraClient::new(JiraClientConfig::from(&config))
        .map_err(|e| SprintcovError::Internal(format!("failed to create jira client: {e}")))?;

    let result = analyze_sprint(&client, &config).await?;
    let entries = partition(&result);
    log_summary(&result, &entries);

    let title = chart_title(result.sprint(), result.total());
    let svg = render_pie_svg(&title, &entries);
    write_chart(&config.chart_output, &svg)?;

    tracing::info!(path = %config.chart_output.display(), "chart written");
    println!("{}", config.chart_output.display());
    Ok(())
}

#[tokio::main]
async fn main() {
    // Config first so LOG_LEVEL from .env applies to the subscriber
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing("info");
            tracing::error!(error = %e, "failed to load config");
            std::process::exit(1);
        }
    };
    init_tracing(&config.log_level);
    tracing::info!(service = "sprintcov-report", "starting");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "sprint coverage report failed");
        std::process::exit(1);
    }

    tracing::info!("sprint coverage report finished");
}
