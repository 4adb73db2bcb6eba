use crate::models::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const HEADER: [&str; 4] = ["Issue key", "Summary", "Reporter", "Status"];

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Sprint data file not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to access sprint data file: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// The CSV file that hands rows from the fetch stage to the export stage.
pub struct SprintStore {
    path: PathBuf,
}

impl SprintStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrites the file with a header row followed by `rows`.
    pub fn write_rows(&self, rows: &[SprintRow]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::CRLF)
            .from_path(&self.path)?;
        writer.write_record(HEADER)?;
        for row in rows {
            writer.write_record([
                row.issue_key.as_str(),
                row.summary.as_str(),
                row.reporter.as_str(),
                row.status.as_str(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn read_rows(&self) -> Result<Vec<SprintRow>, StoreError> {
        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(self.path.clone()))
            }
            Err(e) => return Err(e.into()),
        };

        let mut reader = csv::Reader::from_reader(file);
        let rows = reader
            .deserialize::<SprintRow>()
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn remove(&self) -> Result<(), StoreError> {
        fs::remove_file(&self.path)?;
        tracing::info!("{} has been deleted.", self.path.display());
        Ok(())
    }
}
