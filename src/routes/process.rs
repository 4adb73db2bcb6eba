use super::root::render_sprint_form;
use super::StatusStyle;
use crate::pipeline::process_sprint;
use crate::AppState;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct ProcessForm {
    #[serde(default)]
    pub sprint_id: String,
}

/// Runs fetch-then-export for the submitted sprint. Only one run is in flight at a time.
pub async fn process(
    axum::extract::State(state): axum::extract::State<AppState>,
    axum::extract::Form(form): axum::extract::Form<ProcessForm>,
) -> axum::response::Html<String> {
    let _running = state.run_lock.lock().await;

    let (message, style) = match process_sprint(&state.context, &form.sprint_id).await {
        Ok(summary) => (summary.status_message(), StatusStyle::Success),
        Err(e) => {
            tracing::error!("Processing sprint '{}' failed: {}", form.sprint_id, e);
            (e.status_message(), StatusStyle::Danger)
        }
    };

    axum::response::Html(render_sprint_form(&form.sprint_id, Some((message.as_str(), style))))
}
