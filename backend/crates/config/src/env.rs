use sprintcov_common::error::{SprintcovError, SprintcovResult};
use std::env;
use std::fmt;
use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub server: String,
    pub project_name: String,
    pub board_id: Option<u64>,
    pub sprint_id: Option<u64>,
    pub username: String,
    pub password: String,
    pub max_results: u32,
    pub max_retries: u32,
    pub timeout_secs: u64,
    pub chart_output: PathBuf,
    pub log_level: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    /// Loads `.env` file if present, then reads required vars.
    ///
    /// At least one of `JIRA_SPRINT_ID` / `JIRA_BOARD_ID` must be set; with only a
    /// board the active sprint of that board is analysed.
    pub fn from_env() -> SprintcovResult<Self> {
        // Best-effort .env load; ignore if missing
        let _ = dotenvy::dotenv();

        let sprint_id = get_optional_u64("JIRA_SPRINT_ID")?;
        let board_id = get_optional_u64("JIRA_BOARD_ID")?;
        if sprint_id.is_none() && board_id.is_none() {
            return Err(SprintcovError::Config(
                "either JIRA_SPRINT_ID or JIRA_BOARD_ID must be set".to_owned(),
            ));
        }

        Ok(Self {
            server: get_var("JIRA_SERVER")?.trim_end_matches('/').to_owned(),
            project_name: get_var("JIRA_PROJECT_NAME")?,
            board_id,
            sprint_id,
            username: get_var("JIRA_USERNAME")?,
            password: get_var("JIRA_PASSWORD")?,
            max_results: parse_var_or("JIRA_MAX_RESULTS", 200)?,
            max_retries: parse_var_or("JIRA_MAX_RETRIES", 3)?,
            timeout_secs: parse_var_or("JIRA_TIMEOUT_SECS", 30)?,
            chart_output: PathBuf::from(get_var_or("CHART_OUTPUT", "sprint_coverage.svg")),
            log_level: get_var_or("LOG_LEVEL", "info"),
        })
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("server", &self.server)
            .field("project_name", &self.project_name)
            .field("board_id", &self.board_id)
            .field("sprint_id", &self.sprint_id)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("max_results", &self.max_results)
            .field("max_retries", &self.max_retries)
            .field("timeout_secs", &self.timeout_secs)
            .field("chart_output", &self.chart_output)
            .field("log_level", &self.log_level)
            .finish()
    }
}

fn get_var(key: &str) -> SprintcovResult<String> {
    env::var(key).map_err(|_| SprintcovError::Config(format!("{key} is required but not set")))
}

fn get_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn get_optional_u64(key: &str) -> SprintcovResult<Option<u64>> {
    match env::var(key) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| SprintcovError::Config(format!("invalid {key}: {e}"))),
        Err(_) => Ok(None),
    }
}

fn parse_var_or<T>(key: &str, default: T) -> SprintcovResult<T>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| SprintcovError::Config(format!("invalid {key}: {e}"))),
        Err(_) => Ok(default),
    }
}
