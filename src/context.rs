//! Everything an operation needs, resolved once at startup and passed around explicitly.

use crate::classifier::Classifier;
use crate::settings::SettingsStore;
use crate::sprint_store::SprintStore;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub const DEFAULT_TRACKER_URL: &str = "https://kaferocks.atlassian.net";
const SETTINGS_FILE_NAME: &str = "settings.json";
const SPRINT_DATA_FILE_NAME: &str = "sprint_data.csv";

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub settings_file: PathBuf,
    pub sprint_data_file: PathBuf,
}

impl AppPaths {
    /// Uses the platform config/data directories unless overridden.
    pub fn resolve(settings_file: Option<PathBuf>, work_dir: Option<PathBuf>) -> Self {
        let project_dirs = ProjectDirs::from("rocks", "kafe", "sprint-processor");

        let settings_file = settings_file.unwrap_or_else(|| match &project_dirs {
            Some(dirs) => dirs.config_dir().join(SETTINGS_FILE_NAME),
            None => PathBuf::from(SETTINGS_FILE_NAME),
        });
        let work_dir = work_dir.unwrap_or_else(|| match &project_dirs {
            Some(dirs) => dirs.data_dir().to_path_buf(),
            None => PathBuf::from("."),
        });

        Self {
            settings_file,
            sprint_data_file: work_dir.join(SPRINT_DATA_FILE_NAME),
        }
    }

    /// Keeps both files inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            settings_file: dir.join(SETTINGS_FILE_NAME),
            sprint_data_file: dir.join(SPRINT_DATA_FILE_NAME),
        }
    }
}

pub struct AppContext {
    pub paths: AppPaths,
    pub tracker_base_url: String,
    pub classifier: Classifier,
}

impl AppContext {
    pub fn new(paths: AppPaths, tracker_base_url: &str, classifier: Classifier) -> Self {
        Self {
            paths,
            tracker_base_url: tracker_base_url.trim_end_matches('/').to_string(),
            classifier,
        }
    }

    pub fn settings_store(&self) -> SettingsStore {
        SettingsStore::new(&self.paths.settings_file)
    }

    pub fn sprint_store(&self) -> SprintStore {
        SprintStore::new(&self.paths.sprint_data_file)
    }
}
