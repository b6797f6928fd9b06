/// Work item types included in the coverage analysis.
pub const ISSUE_TYPES: &[&str] = &["New Feature", "Work Item", "Bug"];

/// Build the JQL selecting the work items of one sprint within a project.
///
/// Generates: `Sprint = 42 AND project = "Data Platform" AND type in ("New Feature", "Work Item", Bug) ORDER BY key ASC`
pub fn build_sprint_issues_jql(sprint_id: u64, project_name: &str) -> String {
    let types: Vec<String> = ISSUE_TYPES.iter().map(|t| escape_jql_value(t)).collect();
    format!(
        "Sprint = {sprint_id} AND project = {} AND type in ({}) ORDER BY key ASC",
        quote_jql_value(project_name),
        types.join(", ")
    )
}

/// Escape a JQL value, quoting it unless it is plain `[A-Za-z0-9_]+`.
fn escape_jql_value(value: &str) -> String {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        value.to_string()
    } else {
        quote_jql_value(value)
    }
}

fn quote_jql_value(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
