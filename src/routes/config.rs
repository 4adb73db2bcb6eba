use super::{escape_html, page, status_html, StatusStyle};
use crate::settings::Settings;
use crate::AppState;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct ConfigForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub api_token: String,
    #[serde(default)]
    pub output_file: String,
}

fn render_config_form(settings: &Settings, status: Option<(&str, StatusStyle)>) -> String {
    page(
        "Config",
        &format!(
            r#"
                <h1>Config</h1>
                <form method="post" action="/config">
                    <p>
                        <label title="Enter your Jira username">Jira Username:<br>
                        <input name="username" value="{}"></label>
                    </p>
                    <p>
                        <label title="Enter your Jira API token">Jira API Token:<br>
                        <input name="api_token" type="password" value="{}"></label>
                    </p>
                    <p>
                        <label title="Folder where the output file will be saved">Output Path:<br>
                        <input name="output_file" value="{}"></label>
                    </p>
                    <button type="submit">Save</button>
                </form>
                {}
                <a href="/">Back</a>
            "#,
            escape_html(&settings.username),
            escape_html(&settings.api_token),
            escape_html(&settings.output_dir),
            status_html(status)
        ),
    )
}

pub async fn show_config(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> axum::response::Html<String> {
    let html = match state.context.settings_store().load() {
        Ok(settings) => render_config_form(&settings, None),
        Err(e) => {
            let message = format!("An error occurred: {}", e);
            render_config_form(&Settings::default(), Some((message.as_str(), StatusStyle::Danger)))
        }
    };
    axum::response::Html(html)
}

pub async fn save_config(
    axum::extract::State(state): axum::extract::State<AppState>,
    axum::extract::Form(form): axum::extract::Form<ConfigForm>,
) -> axum::response::Html<String> {
    let settings = Settings {
        username: form.username,
        api_token: form.api_token,
        output_dir: form.output_file,
    };

    let html = match state.context.settings_store().save(&settings) {
        Ok(()) => render_config_form(
            &settings,
            Some(("Configuration saved successfully.", StatusStyle::Success)),
        ),
        Err(e) => {
            let message = format!("An error occurred: {}", e);
            render_config_form(&settings, Some((message.as_str(), StatusStyle::Danger)))
        }
    };
    axum::response::Html(html)
}
