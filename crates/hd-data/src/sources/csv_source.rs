use std::path::{Path, PathBuf};
use std::sync::Arc;
use async_trait::async_trait;
use arrow::array::{ArrayRef, Float64Builder, Int64Builder, StringBuilder};
use arrow::datatypes::{Schema, Field, DataType};
use arrow::record_batch::RecordBatch;
use csv::{ReaderBuilder, StringRecord};
use tracing::info;

use crate::config::NullConfig;
use crate::DataError;

/// CSV data source loading a whole vitals export into one batch
pub struct CsvSource {
    /// Path to the CSV file
    path: PathBuf,
    /// Markers treated as empty cells
    null_config: NullConfig,
}

impl CsvSource {
    /// Create a new CSV source from a file path
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            null_config: NullConfig::default(),
        }
    }

    /// Use custom null markers for text cells
    pub fn with_null_config(mut self, null_config: NullConfig) -> Self {
        self.null_config = null_config;
        self
    }

    /// Read and type the whole file; blocking
    fn read_file(path: &Path, null_config: &NullConfig) -> Result<RecordBatch, DataError> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;

        let headers: Vec<String> = csv_reader.headers()?.iter().map(|h| h.trim().to_string()).collect();
        let records = csv_reader.records().collect::<Result<Vec<StringRecord>, _>>()?;

        let cell = |record: &StringRecord, col_idx: usize| -> Option<String> {
            record
                .get(col_idx)
                .filter(|value| !null_config.is_null(value))
                .map(|value| value.trim().to_string())
        };

        let mut fields = Vec::with_capacity(headers.len());
        let mut columns: Vec<ArrayRef> = Vec::with_capacity(headers.len());

        for (col_idx, name) in headers.iter().enumerate() {
            let values: Vec<Option<String>> = records.iter().map(|r| cell(r, col_idx)).collect();
            let data_type = Self::detect_column_type(&values);

            let array: ArrayRef = match data_type {
                DataType::Int64 => {
                    let mut builder = Int64Builder::new();
                    for value in &values {
                        builder.append_option(value.as_deref().and_then(|v| v.parse::<i64>().ok()));
                    }
                    Arc::new(builder.finish())
                }
                DataType::Float64 => {
                    let mut builder = Float64Builder::new();
                    for value in &values {
                        builder.append_option(value.as_deref().and_then(|v| v.parse::<f64>().ok()));
                    }
                    Arc::new(builder.finish())
                }
                _ => {
                    let mut builder = StringBuilder::new();
                    for value in &values {
                        builder.append_option(value.as_deref());
                    }
                    Arc::new(builder.finish())
                }
            };

            fields.push(Field::new(name, data_type, true));
            columns.push(array);
        }

        let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?;
        info!("Read {} rows from {:?}", batch.num_rows(), path);
        Ok(batch)
    }

    /// Detect column type from its non-empty cells
    fn detect_column_type(values: &[Option<String>]) -> DataType {
        let mut is_int = true;
        let mut is_float = true;

        for value in values.iter().flatten() {
            // Try parsing as integer
            if is_int && value.parse::<i64>().is_err() {
                is_int = false;
            }

            // Try parsing as float
            if is_float && value.parse::<f64>().is_err() {
                is_float = false;
            }
        }

        if is_int {
            DataType::Int64
        } else if is_float {
            DataType::Float64
        } else {
            DataType::Utf8
        }
    }
}

#[async_trait]
impl hd_core::data::DataSource for CsvSource {
    async fn fetch_table(&self) -> anyhow::Result<RecordBatch> {
        let path = self.path.clone();
        let null_config = self.null_config.clone();
        let batch = tokio::task::spawn_blocking(move || Self::read_file(&path, &null_config))
            .await
            .map_err(DataError::from)??;
        Ok(batch)
    }

    fn source_name(&self) -> &str {
        self.path.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown.csv")
    }
}
