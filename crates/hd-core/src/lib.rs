//! Core functionality for the health analytics dashboard
//!
//! This crate provides the selection state, the event bus, configuration,
//! and the data source abstraction shared by the other crates.

pub mod events;
pub mod selection;
pub mod settings;

// Re-export commonly used types
pub use events::{EventBus, Event, EventHandler, handler_from_fn};
pub use selection::{
    PatientId, Selection, SelectionDomain, SelectionError, SelectionSlot, SelectionState,
};
pub use settings::{DashboardConfig, DatabaseConfig, ImagingConfig, SelectionPreferences};
pub use data::DataSource;

/// Name of the patient identifier column
pub const PATIENT_ID_COLUMN: &str = "PatientID";

/// Name of the per-patient ordering column
pub const SAMPLE_INDEX_COLUMN: &str = "SampleIndex";

pub mod data {
    use arrow::record_batch::RecordBatch;

    /// Trait for the relational source the vitals table is fetched from
    #[async_trait::async_trait]
    pub trait DataSource: Send + Sync {
        /// Fetch the whole table in one batch
        async fn fetch_table(&self) -> anyhow::Result<RecordBatch>;

        /// Get the source name/path
        fn source_name(&self) -> &str;
    }
}
