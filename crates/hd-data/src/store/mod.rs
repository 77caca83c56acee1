//! The currently loaded vitals table and the facts derived from its schema

use std::collections::BTreeSet;
use std::sync::Arc;
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use tracing::{info, warn};

use hd_core::{PatientId, SelectionDomain, PATIENT_ID_COLUMN, SAMPLE_INDEX_COLUMN};
use crate::coerce::{as_patient_id, numeric_values};
use crate::config::NullConfig;
use crate::DataError;

/// Owns the table. A load replaces everything wholesale; a rejected load
/// keeps the previous table.
pub struct TableStore {
    table: Option<RecordBatch>,
    patient_ids: Vec<PatientId>,
    variable_columns: Vec<String>,
    /// Numeric columns that are not vital signs
    non_vital_columns: Vec<String>,
    null_config: NullConfig,
}

impl TableStore {
    /// Create an empty store excluding the given numeric columns from the variable list
    pub fn new(non_vital_columns: Vec<String>) -> Self {
        Self {
            table: None,
            patient_ids: Vec::new(),
            variable_columns: Vec::new(),
            non_vital_columns,
            null_config: NullConfig::default(),
        }
    }

    /// Use custom null markers for text cells
    pub fn with_null_config(mut self, null_config: NullConfig) -> Self {
        self.null_config = null_config;
        self
    }

    /// Replace the table. Column names are trimmed before validation.
    pub fn load(&mut self, batch: RecordBatch) -> Result<(), DataError> {
        let schema = batch.schema();
        let trimmed: Vec<Field> = schema
            .fields()
            .iter()
            .map(|f| f.as_ref().clone().with_name(f.name().trim()))
            .collect();

        let missing: Vec<String> = [PATIENT_ID_COLUMN, SAMPLE_INDEX_COLUMN]
            .iter()
            .copied()
            .filter(|required| !trimmed.iter().any(|f| f.name() == *required))
            .map(|required| required.to_string())
            .collect();
        if !missing.is_empty() {
            warn!("Rejected table without {:?}; keeping previous table", missing);
            return Err(DataError::Schema { missing });
        }

        let mut variable_columns: Vec<String> = trimmed
            .iter()
            .filter(|f| f.data_type().is_numeric())
            .map(|f| f.name().clone())
            .filter(|name| !self.is_excluded(name))
            .collect();
        variable_columns.sort();
        variable_columns.dedup();

        let table = RecordBatch::try_new(Arc::new(Schema::new(trimmed)), batch.columns().to_vec())?;

        let patient_ids: BTreeSet<PatientId> = table
            .column_by_name(PATIENT_ID_COLUMN)
            .map(|column| numeric_values(column.as_ref(), &self.null_config))
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .filter_map(as_patient_id)
            .collect();

        info!(
            "Loaded table: {} rows, {} patients, {} variables",
            table.num_rows(),
            patient_ids.len(),
            variable_columns.len()
        );

        self.patient_ids = patient_ids.into_iter().collect();
        self.variable_columns = variable_columns;
        self.table = Some(table);
        Ok(())
    }

    fn is_excluded(&self, name: &str) -> bool {
        name == PATIENT_ID_COLUMN
            || name == SAMPLE_INDEX_COLUMN
            || self.non_vital_columns.iter().any(|c| c == name)
    }

    /// The current table, if any
    pub fn table(&self) -> Option<&RecordBatch> {
        self.table.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.table.is_some()
    }

    pub fn row_count(&self) -> usize {
        self.table.as_ref().map_or(0, |t| t.num_rows())
    }

    /// Distinct patient identifiers, ascending; empty when nothing is loaded
    pub fn distinct_patient_ids(&self) -> &[PatientId] {
        &self.patient_ids
    }

    /// Numeric vital-sign columns, sorted lexically
    pub fn variable_columns(&self) -> &[String] {
        &self.variable_columns
    }

    /// Parse-or-drop view of a column; `None` when the column does not exist
    pub fn numeric_column(&self, name: &str) -> Option<Vec<Option<f64>>> {
        let column = self.table.as_ref()?.column_by_name(name)?;
        Some(numeric_values(column.as_ref(), &self.null_config))
    }

    /// Row-aligned patient identifiers
    pub fn patient_column(&self) -> Option<Vec<Option<PatientId>>> {
        let values = self.numeric_column(PATIENT_ID_COLUMN)?;
        Some(values.into_iter().map(|v| v.and_then(as_patient_id)).collect())
    }
}

impl Default for TableStore {
    fn default() -> Self {
        Self::new(vec!["Age".to_string()])
    }
}

impl SelectionDomain for TableStore {
    fn patient_ids(&self) -> &[PatientId] {
        &self.patient_ids
    }

    fn variable_columns(&self) -> &[String] {
        &self.variable_columns
    }
}
