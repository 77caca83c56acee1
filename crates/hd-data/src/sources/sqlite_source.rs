//! SQLite data source implementation

use std::path::{Path, PathBuf};
use std::sync::Arc;
use async_trait::async_trait;
use arrow::array::{ArrayRef, Float64Builder, Int64Builder, StringBuilder};
use arrow::datatypes::{Schema, Field, DataType};
use arrow::record_batch::RecordBatch;
use rusqlite::{Connection, OpenFlags, types::ValueRef};
use tracing::info;

use crate::DataError;

/// Reads one table of a SQLite database into a single batch
pub struct SqliteSource {
    path: PathBuf,
    table_name: String,
}

/// Per-column array builder chosen from the declared column type
enum ColumnBuilder {
    Int(Int64Builder),
    Float(Float64Builder),
    Text(StringBuilder),
}

impl ColumnBuilder {
    fn for_type(data_type: &DataType) -> Self {
        match data_type {
            DataType::Int64 => ColumnBuilder::Int(Int64Builder::new()),
            DataType::Float64 => ColumnBuilder::Float(Float64Builder::new()),
            _ => ColumnBuilder::Text(StringBuilder::new()),
        }
    }

    /// Append one cell; values that do not fit the column type become null
    fn append(&mut self, value: ValueRef<'_>) {
        match self {
            ColumnBuilder::Int(builder) => match value {
                ValueRef::Integer(i) => builder.append_value(i),
                ValueRef::Real(f) if f.fract() == 0.0 => builder.append_value(f as i64),
                ValueRef::Text(s) => match std::str::from_utf8(s).ok().and_then(|t| t.trim().parse().ok()) {
                    Some(i) => builder.append_value(i),
                    None => builder.append_null(),
                },
                _ => builder.append_null(),
            },
            ColumnBuilder::Float(builder) => match value {
                ValueRef::Real(f) => builder.append_value(f),
                ValueRef::Integer(i) => builder.append_value(i as f64),
                ValueRef::Text(s) => match std::str::from_utf8(s).ok().and_then(|t| t.trim().parse().ok()) {
                    Some(f) => builder.append_value(f),
                    None => builder.append_null(),
                },
                _ => builder.append_null(),
            },
            ColumnBuilder::Text(builder) => match value {
                ValueRef::Text(s) => builder.append_value(String::from_utf8_lossy(s)),
                ValueRef::Integer(i) => builder.append_value(i.to_string()),
                ValueRef::Real(f) => builder.append_value(f.to_string()),
                _ => builder.append_null(),
            },
        }
    }

    fn finish(&mut self) -> ArrayRef {
        match self {
            ColumnBuilder::Int(builder) => Arc::new(builder.finish()),
            ColumnBuilder::Float(builder) => Arc::new(builder.finish()),
            ColumnBuilder::Text(builder) => Arc::new(builder.finish()),
        }
    }
}

impl SqliteSource {
    /// Create a new SQLite data source
    pub fn new<P: AsRef<Path>>(path: P, table_name: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            table_name: table_name.into(),
        }
    }

    /// Read the whole table; blocking
    fn read_table(path: &Path, table_name: &str) -> Result<RecordBatch, DataError> {
        // read-only so a missing file is a connection error instead of a new empty database
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|e| DataError::Sqlite(format!("Failed to open database {:?}: {}", path, e)))?;

        let schema = Arc::new(Self::detect_schema(&conn, table_name)?);

        let column_list = schema
            .fields()
            .iter()
            .map(|f| quote_identifier(f.name()))
            .collect::<Vec<_>>()
            .join(", ");
        let query = format!("SELECT {} FROM {}", column_list, quote_identifier(table_name));

        let mut stmt = conn.prepare(&query)?;
        let mut builders: Vec<ColumnBuilder> = schema
            .fields()
            .iter()
            .map(|f| ColumnBuilder::for_type(f.data_type()))
            .collect();

        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            for (col_idx, builder) in builders.iter_mut().enumerate() {
                builder.append(row.get_ref(col_idx)?);
            }
        }

        let arrays: Vec<ArrayRef> = builders.iter_mut().map(|b| b.finish()).collect();
        let batch = RecordBatch::try_new(schema, arrays)?;
        info!("Fetched {} rows from {}", batch.num_rows(), table_name);
        Ok(batch)
    }

    /// Detect schema from the declared column types
    fn detect_schema(conn: &Connection, table_name: &str) -> Result<Schema, DataError> {
        let query = format!("PRAGMA table_info({})", quote_identifier(table_name));
        let mut stmt = conn.prepare(&query)?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(1)?,  // column name
                row.get::<_, String>(2)?,  // declared type
            ))
        })?;

        let mut fields = Vec::new();
        for row_result in rows {
            let (name, declared) = row_result?;
            fields.push(Field::new(name, declared_type(&declared), true));
        }

        if fields.is_empty() {
            return Err(DataError::Sqlite(format!("Table '{}' does not exist or has no columns", table_name)));
        }

        Ok(Schema::new(fields))
    }
}

/// Map a declared column type to an arrow type following SQLite's affinity rules
fn declared_type(declared: &str) -> DataType {
    let upper = declared.to_uppercase();
    if upper.contains("INT") {
        DataType::Int64
    } else if upper.contains("CHAR") || upper.contains("CLOB") || upper.contains("TEXT") {
        DataType::Utf8
    } else if upper.contains("REAL") || upper.contains("FLOA") || upper.contains("DOUB")
        || upper.contains("NUMERIC") || upper.contains("DECIMAL")
    {
        DataType::Float64
    } else {
        DataType::Utf8
    }
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[async_trait]
impl hd_core::data::DataSource for SqliteSource {
    async fn fetch_table(&self) -> anyhow::Result<RecordBatch> {
        let path = self.path.clone();
        let table_name = self.table_name.clone();
        let batch = tokio::task::spawn_blocking(move || Self::read_table(&path, &table_name))
            .await
            .map_err(DataError::from)??;
        Ok(batch)
    }

    fn source_name(&self) -> &str {
        self.path.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown.db")
    }
}
