use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug)]
pub struct JiraUser {
    #[serde(rename = "displayName", default)]
    pub display_name: String,
}

#[derive(Deserialize, Debug)]
pub struct JiraStatus {
    pub name: String,
}

/// One page of `GET /rest/agile/1.0/sprint/{id}/issue`.
#[derive(Deserialize, Debug)]
pub struct SprintIssuesResponse {
    #[serde(default)]
    pub total: u64,
    pub issues: Vec<JiraIssue>,
}

#[derive(Deserialize, Debug)]
pub struct JiraIssue {
    pub key: String,
    pub fields: JiraIssueFields,
}

#[derive(Deserialize, Debug)]
pub struct JiraIssueFields {
    pub summary: String,
    pub reporter: Option<JiraUser>,
    pub status: JiraStatus,
}

/// Row of the intermediate CSV handed from the fetch stage to the export stage.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SprintRow {
    #[serde(rename = "Issue key")]
    pub issue_key: String,
    #[serde(rename = "Summary")]
    pub summary: String,
    #[serde(rename = "Reporter")]
    pub reporter: String,
    #[serde(rename = "Status")]
    pub status: String,
}

impl From<&JiraIssue> for SprintRow {
    fn from(issue: &JiraIssue) -> Self {
        Self {
            issue_key: issue.key.clone(),
            summary: issue.fields.summary.clone(),
            reporter: issue
                .fields
                .reporter
                .as_ref()
                .map(|reporter| reporter.display_name.clone())
                .unwrap_or_default(),
            status: issue.fields.status.name.clone(),
        }
    }
}

/// Row of the exported spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub issue_key: String,
    pub summary: String,
    pub reporter: String,
    pub department: String,
    pub theme: String,
}

impl ReportRow {
    /// Cell values in column order.
    pub fn cells(&self) -> [&str; 5] {
        [
            self.issue_key.as_str(),
            self.summary.as_str(),
            self.reporter.as_str(),
            self.department.as_str(),
            self.theme.as_str(),
        ]
    }
}
