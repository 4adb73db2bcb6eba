//! Fetch-then-export orchestration and the status text shown to the user.

use crate::collector::*;
use crate::context::AppContext;
use crate::jira_client::*;
use crate::renderer::ReportRenderer;
use crate::settings::SettingsError;
use crate::sprint_store::StoreError;
use itertools::Itertools;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Please enter a sprint ID.")]
    MissingSprintId,
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Jira(#[from] JiraError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Failed to write spreadsheet: {0}")]
    Report(#[from] rust_xlsxwriter::XlsxError),
}

impl From<CollectError> for PipelineError {
    fn from(err: CollectError) -> Self {
        match err {
            CollectError::Jira(e) => PipelineError::Jira(e),
            CollectError::Store(e) => PipelineError::Store(e),
        }
    }
}

impl PipelineError {
    pub fn status_message(&self) -> String {
        match self {
            PipelineError::MissingSprintId => self.to_string(),
            PipelineError::Store(StoreError::NotFound(_)) => "File not found.".to_string(),
            PipelineError::Jira(JiraError::Status { status, .. }) => {
                format!("Failed to retrieve tickets (HTTP {}).", status.as_u16())
            }
            PipelineError::Jira(JiraError::Request(e)) => {
                format!("Failed to retrieve tickets: {}", e)
            }
            other => format!("An error occurred: {}", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub report_path: PathBuf,
    pub rows: usize,
    /// Rows per department, sorted by department name. Unmatched rows count under "".
    pub department_counts: Vec<(String, usize)>,
}

impl ExportSummary {
    pub fn status_message(&self) -> String {
        format!("File saved to \n {}", self.report_path.display())
    }
}

fn sprint_id_or_error(sprint_id: &str) -> Result<&str, PipelineError> {
    let sprint_id = sprint_id.trim();
    if sprint_id.is_empty() {
        return Err(PipelineError::MissingSprintId);
    }
    Ok(sprint_id)
}

pub fn report_path(output_dir: &str, sprint_id: &str) -> PathBuf {
    Path::new(output_dir).join(format!("sprint_{}.xlsx", sprint_id))
}

/// Fetch-and-filter stage. Returns the number of rows written to the sprint data file.
pub async fn fetch_stage(context: &AppContext, sprint_id: &str) -> Result<usize, PipelineError> {
    let sprint_id = sprint_id_or_error(sprint_id)?;
    let settings = context.settings_store().load()?;

    let jira_client = JiraClient::new(
        &context.tracker_base_url,
        &settings.username,
        &settings.api_token,
    );
    let rows = collect_sprint(&jira_client, &context.sprint_store(), sprint_id).await?;
    tracing::info!("Tickets retrieved!");
    Ok(rows.len())
}

/// Classify-and-export stage. The sprint data file is removed only after the spreadsheet is saved.
pub fn export_stage(context: &AppContext, sprint_id: &str) -> Result<ExportSummary, PipelineError> {
    let sprint_id = sprint_id_or_error(sprint_id)?;
    let settings = context.settings_store().load()?;
    let store = context.sprint_store();

    let report_rows = store
        .read_rows()?
        .into_iter()
        .map(|row| context.classifier.classify(row))
        .collect::<Vec<_>>();

    let report_path = report_path(&settings.output_dir, sprint_id);
    ReportRenderer::new(&context.tracker_base_url).render(&report_rows, &report_path)?;

    let department_counts = report_rows
        .iter()
        .counts_by(|row| row.department.clone())
        .into_iter()
        .sorted()
        .collect::<Vec<_>>();
    for (department, count) in &department_counts {
        let department = if department.is_empty() { "(none)" } else { department.as_str() };
        tracing::info!("{}: {} issues", department, count);
    }

    if let Err(e) = store.remove() {
        tracing::warn!("Could not delete {}: {}", store.path().display(), e);
    }

    Ok(ExportSummary {
        report_path,
        rows: report_rows.len(),
        department_counts,
    })
}

/// Runs both stages back to back. A failed fetch stops before the export.
pub async fn process_sprint(
    context: &AppContext,
    sprint_id: &str,
) -> Result<ExportSummary, PipelineError> {
    fetch_stage(context, sprint_id).await?;
    export_stage(context, sprint_id)
}
