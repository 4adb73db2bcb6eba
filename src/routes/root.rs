use super::{escape_html, page, status_html, StatusStyle};

pub fn render_sprint_form(sprint_id: &str, status: Option<(&str, StatusStyle)>) -> String {
    page(
        "Sprint Processor",
        &format!(
            r#"
                <h1>Jira Sprint ID:</h1>
                <form method="post" action="/process">
                    <input name="sprint_id" value="{}" title="Enter the Jira Sprint ID" autofocus>
                    <button type="submit">Start</button>
                </form>
                {}
                <a href="/config">Config.</a>
            "#,
            escape_html(sprint_id),
            status_html(status)
        ),
    )
}

pub async fn root() -> axum::response::Html<String> {
    axum::response::Html(render_sprint_form("", None))
}
