use crate::jira_client::*;
use crate::models::*;
use crate::sprint_store::*;

/// Statuses that make it into the report.
pub const REPORTED_STATUSES: [&str; 3] = ["In Staging", "Approved by Tech", "In Progress"];

pub fn filter_issues(issues: &[JiraIssue]) -> Vec<SprintRow> {
    issues
        .iter()
        .filter(|issue| REPORTED_STATUSES.contains(&issue.fields.status.name.as_str()))
        .map(SprintRow::from)
        .collect()
}

/// Fetches the sprint, keeps the reported statuses and overwrites the sprint data file.
///
/// Nothing is written when the request fails.
pub async fn collect_sprint(
    jira_client: &JiraClient,
    store: &SprintStore,
    sprint_id: &str,
) -> Result<Vec<SprintRow>, CollectError> {
    tracing::info!("Collecting issues for sprint {}...", sprint_id);

    let issues = jira_client.get_sprint_issues(sprint_id).await?;
    let rows = filter_issues(&issues);
    for row in &rows {
        tracing::debug!("Keeping {} ({}): {}", row.issue_key, row.status, row.summary);
    }

    store.write_rows(&rows)?;
    tracing::info!(
        "Kept {} of {} issues, written to {}",
        rows.len(),
        issues.len(),
        store.path().display()
    );
    Ok(rows)
}

#[derive(thiserror::Error, Debug)]
pub enum CollectError {
    #[error(transparent)]
    Jira(#[from] JiraError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
