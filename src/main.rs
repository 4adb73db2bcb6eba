mod classifier;
mod collector;
mod context;
mod jira_client;
mod logging;
mod models;
mod pipeline;
mod renderer;
mod routes;
mod settings;
mod sprint_store;

use clap::{Parser, Subcommand};
use classifier::Classifier;
use context::*;
use pipeline::*;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Clone)]
struct AppState {
    context: std::sync::Arc<AppContext>,
    run_lock: std::sync::Arc<tokio::sync::Mutex<()>>,
}

impl AppState {
    fn new(context: AppContext) -> Self {
        Self {
            context: std::sync::Arc::new(context),
            run_lock: std::sync::Arc::new(tokio::sync::Mutex::new(())),
        }
    }
}

/// Builds a classified spreadsheet report from the issues of a Jira sprint.
#[derive(Parser)]
#[command(name = "sprint-processor", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Settings file holding username, API token and output directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for the intermediate sprint data file
    #[arg(long, global = true)]
    work_dir: Option<PathBuf>,

    /// JSON file with department and theme rules (built-in rules otherwise)
    #[arg(long, env = "SPRINT_RULES_FILE", global = true)]
    rules: Option<PathBuf>,

    /// Base URL of the Jira instance
    #[arg(long, env = "JIRA_BASE_URL", default_value = DEFAULT_TRACKER_URL, global = true)]
    jira_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch the sprint and export the spreadsheet
    Run { sprint_id: String },
    /// Only fetch and filter the sprint into the intermediate file
    Fetch { sprint_id: String },
    /// Only classify the intermediate file and export the spreadsheet
    Export { sprint_id: String },
    /// Show or change the stored settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Serve the sprint form on a local web page
    Serve {
        #[arg(long, default_value = "127.0.0.1:8080")]
        bind: String,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    Show,
    Set {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        api_token: Option<String>,
        /// Directory the spreadsheet is written into
        #[arg(long)]
        output_dir: Option<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    logging::init(cli.verbose);

    let classifier = match Classifier::load(cli.rules.as_deref()) {
        Ok(classifier) => classifier,
        Err(e) => {
            eprintln!("An error occurred: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let context = AppContext::new(
        AppPaths::resolve(cli.config, cli.work_dir),
        &cli.jira_url,
        classifier,
    );

    match cli.command {
        Command::Run { sprint_id } => report(process_sprint(&context, &sprint_id).await),
        Command::Fetch { sprint_id } => match fetch_stage(&context, &sprint_id).await {
            Ok(rows) => {
                println!("Tickets retrieved! ({} rows)", rows);
                ExitCode::SUCCESS
            }
            Err(e) => fail(e),
        },
        Command::Export { sprint_id } => report(export_stage(&context, &sprint_id)),
        Command::Config { action } => match configure(&context, action) {
            Ok(message) => {
                println!("{}", message);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("An error occurred: {}", e);
                ExitCode::FAILURE
            }
        },
        Command::Serve { bind } => serve(context, &bind).await,
    }
}

fn report(result: Result<ExportSummary, PipelineError>) -> ExitCode {
    match result {
        Ok(summary) => {
            println!("{}", summary.status_message());
            for (department, count) in &summary.department_counts {
                let department = if department.is_empty() { "(none)" } else { department.as_str() };
                println!("  {}: {}", department, count);
            }
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

fn fail(e: PipelineError) -> ExitCode {
    tracing::debug!("{:?}", e);
    eprintln!("{}", e.status_message());
    ExitCode::FAILURE
}

fn configure(context: &AppContext, action: ConfigAction) -> Result<String, settings::SettingsError> {
    let store = context.settings_store();
    let mut settings = store.load()?;

    match action {
        ConfigAction::Show => Ok(format!(
            "Settings file:  {}\nJira Username:  {}\nJira API Token: {}\nOutput Path:    {}",
            store.path().display(),
            settings.username,
            settings.masked_token(),
            settings.output_dir
        )),
        ConfigAction::Set {
            username,
            api_token,
            output_dir,
        } => {
            if let Some(username) = username {
                settings.username = username;
            }
            if let Some(api_token) = api_token {
                settings.api_token = api_token;
            }
            if let Some(output_dir) = output_dir {
                settings.output_dir = output_dir;
            }

            store.save(&settings)?;
            Ok("Configuration saved successfully.".to_string())
        }
    }
}

async fn serve(context: AppContext, bind: &str) -> ExitCode {
    let state = AppState::new(context);

    let app = axum::Router::new()
        .route("/", axum::routing::get(routes::root::root))
        .route("/process", axum::routing::post(routes::process::process))
        .route(
            "/config",
            axum::routing::get(routes::config::show_config).post(routes::config::save_config),
        )
        .with_state(state);

    let listener = match tokio::net::TcpListener::bind(bind).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("Could not bind to {}: {}", bind, e);
            return ExitCode::FAILURE;
        }
    };
    println!("Sprint Processor listening on http://{}", bind);

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server stopped: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
