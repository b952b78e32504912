use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the bikedash workspace.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A data file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV record could not be parsed.
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// A date value in a source table did not match `%Y-%m-%d`.
    #[error("Invalid date {value:?} at record {record}")]
    DateParse { value: String, record: u64 },

    /// A selected range has its start after its end.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    /// The daily table contained no rows, so no min/max dates exist.
    #[error("Dataset is empty: {0}")]
    EmptyDataset(PathBuf),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the bikedash crates.
pub type Result<T> = std::result::Result<T, DashboardError>;
