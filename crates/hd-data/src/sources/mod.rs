pub mod csv_source;
pub mod sqlite_source;

pub use csv_source::CsvSource;
pub use sqlite_source::SqliteSource;
