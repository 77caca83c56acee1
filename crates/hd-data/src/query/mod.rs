//! Queries feeding the trend and cohort plots

pub mod cohort;
pub mod trend;

pub use cohort::{CohortQuery, Histogram, HistogramBin, SummaryStats, DEFAULT_BIN_COUNT};
pub use trend::{TrendPoint, TrendQuery};
