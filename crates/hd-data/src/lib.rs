//! Data handling for the health dashboard: the table store, the
//! trend and cohort queries, and the relational/CSV sources

pub mod coerce;
pub mod config;
pub mod query;
pub mod sample_db;
pub mod sources;
pub mod store;

use arrow::error::ArrowError;
use tokio::task::JoinError;
use thiserror::Error;

// Re-exports
pub use config::NullConfig;
pub use query::{CohortQuery, Histogram, HistogramBin, SummaryStats, TrendPoint, TrendQuery};
pub use sources::{CsvSource, SqliteSource};
pub use store::TableStore;

/// Errors that can occur in data operations
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Arrow error: {0}")]
    Arrow(ArrowError),

    #[error("CSV parsing error: {0}")]
    Csv(String),

    #[error("SQLite error: {0}")]
    Sqlite(String),

    #[error("Table is missing required column(s): {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("No data to plot: {0}")]
    EmptySelection(String),

    #[error("Join error: {0}")]
    Join(#[from] JoinError),

    #[error("Other error: {0}")]
    Other(String),
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => DataError::Io(std::io::Error::new(io_err.kind(), error.to_string())),
            _ => DataError::Csv(error.to_string()),
        }
    }
}

impl From<ArrowError> for DataError {
    fn from(error: ArrowError) -> Self {
        DataError::Arrow(error)
    }
}

impl From<rusqlite::Error> for DataError {
    fn from(error: rusqlite::Error) -> Self {
        DataError::Sqlite(error.to_string())
    }
}
