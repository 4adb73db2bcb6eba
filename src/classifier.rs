//! Reporter→department and keyword→theme classification.
//!
//! Rules are plain data. The built-in set ships in `config/rules.json` and an
//! alternate file can be supplied at startup. Both tables are evaluated in
//! list order and the first match wins.

use crate::models::{ReportRow, SprintRow};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const BUILTIN_RULES: &str = include_str!("../config/rules.json");

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Failed to read rules file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid classification rules: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Deserialize, Debug, Clone)]
pub struct DepartmentRule {
    pub name: String,
    pub reporters: Vec<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct KeywordRule {
    pub keyword: String,
    pub theme: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ThemeRules {
    pub default: String,
    #[serde(default)]
    pub keywords: Vec<KeywordRule>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Classifier {
    pub departments: Vec<DepartmentRule>,
    pub themes: ThemeRules,
}

impl Classifier {
    pub fn builtin() -> Result<Self, ClassifierError> {
        Self::from_json(BUILTIN_RULES)
    }

    pub fn from_json(json: &str) -> Result<Self, ClassifierError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads rules from `path`, or the built-in rules when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ClassifierError> {
        match path {
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|source| ClassifierError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                let classifier = Self::from_json(&content)?;
                tracing::info!(
                    "Loaded {} department rules from {}",
                    classifier.departments.len(),
                    path.display()
                );
                Ok(classifier)
            }
            None => Self::builtin(),
        }
    }

    /// Exact, case-sensitive reporter match. Unknown reporters get an empty department.
    pub fn department_for(&self, reporter: &str) -> &str {
        self.departments
            .iter()
            .find(|rule| rule.reporters.iter().any(|name| name == reporter))
            .map(|rule| rule.name.as_str())
            .unwrap_or("")
    }

    /// Case-sensitive substring match on the summary, falling back to the default theme.
    pub fn theme_for(&self, summary: &str) -> &str {
        self.themes
            .keywords
            .iter()
            .find(|rule| summary.contains(rule.keyword.as_str()))
            .map(|rule| rule.theme.as_str())
            .unwrap_or(self.themes.default.as_str())
    }

    pub fn classify(&self, row: SprintRow) -> ReportRow {
        let department = self.department_for(&row.reporter).to_string();
        let theme = self.theme_for(&row.summary).to_string();
        tracing::debug!(
            "{}: reporter '{}' -> department '{}', theme '{}'",
            row.issue_key,
            row.reporter,
            department,
            theme
        );

        ReportRow {
            issue_key: row.issue_key,
            summary: row.summary,
            reporter: row.reporter,
            department,
            theme,
        }
    }
}
