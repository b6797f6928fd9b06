use chrono::NaiveDate;
use serde::Deserialize;
use sprintcov_coverage::{Issue, SprintInfo};

/// A sprint from the Jira Agile API (`/rest/agile/1.0/sprint/{id}`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraSprint {
    pub id: u64,
    pub name: String,
    pub state: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl JiraSprint {
    pub fn into_sprint_info(self) -> SprintInfo {
        SprintInfo {
            id: self.id,
            start_date: self.start_date.as_deref().and_then(parse_day),
            end_date: self.end_date.as_deref().and_then(parse_day),
            name: self.name,
        }
    }
}

/// Parse the calendar day of a Jira timestamp such as `2026-03-02T09:00:00.000+01:00`.
/// Only the leading `YYYY-MM-DD` is used; the time of day is dropped.
fn parse_day(raw: &str) -> Option<NaiveDate> {
    let day = raw.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Page of sprints for a board (`/rest/agile/1.0/board/{id}/sprint`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraBoardSprintsResponse {
    #[serde(default)]
    pub values: Vec<JiraSprint>,
    #[serde(default)]
    pub is_last: bool,
}

/// Response of `/rest/api/2/search`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraSearchResponse {
    #[serde(default)]
    pub start_at: u32,
    #[serde(default)]
    pub max_results: u32,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub issues: Vec<JiraIssue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JiraIssue {
    pub key: String,
    #[serde(default)]
    pub fields: JiraIssueFields,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JiraIssueFields {
    #[serde(default)]
    pub labels: Vec<String>,
}

impl JiraIssue {
    pub fn into_issue(self) -> Issue {
        Issue {
            key: self.key,
            labels: self.fields.labels,
        }
    }
}
