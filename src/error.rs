//! Error types for loading and summarising trip data.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("unknown city: {0}")]
    UnknownCity(String),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing required column: {0}")]
    MissingColumn(String),
    #[error("row {row}: cannot parse start time '{value}': {source}")]
    Timestamp {
        row: usize,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("no data available for the selected filters")]
    EmptyDataset,
}

impl DataError {
    /// True for the empty-result case, which callers report instead of aborting.
    pub fn is_empty_dataset(&self) -> bool {
        matches!(self, DataError::EmptyDataset)
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
