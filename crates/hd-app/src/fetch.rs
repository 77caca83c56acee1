//! Background table fetch with the result handed back over a channel

use std::sync::Arc;
use arrow::record_batch::RecordBatch;
use hd_core::DataSource;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

/// Result of one fetch, applied on the UI thread
pub struct FetchOutcome {
    pub generation: u64,
    pub source_name: String,
    pub result: anyhow::Result<RecordBatch>,
}

/// Numbers fetches so that only the most recently started one is applied
#[derive(Debug, Default)]
pub struct FetchGenerations {
    latest: u64,
}

impl FetchGenerations {
    /// Number for a fetch about to start; supersedes every earlier one
    pub fn next(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_current(&self, outcome: &FetchOutcome) -> bool {
        outcome.generation == self.latest
    }
}

/// Fetch the whole table on the runtime and send the outcome tagged with
/// `generation`. `on_done` runs after the send, typically to wake the UI.
pub fn spawn_fetch<F>(
    runtime: &Handle,
    generation: u64,
    source: Arc<dyn DataSource>,
    tx: UnboundedSender<FetchOutcome>,
    on_done: F,
) where
    F: FnOnce() + Send + 'static,
{
    runtime.spawn(async move {
        let source_name = source.source_name().to_string();
        info!("Fetching table from {} (fetch {})", source_name, generation);
        let result = source.fetch_table().await;
        if tx.send(FetchOutcome { generation, source_name, result }).is_err() {
            warn!("Fetch finished after the dashboard closed");
        }
        on_done();
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use hd_data::sample_db::{create_sample_database, SAMPLE_TABLE};
    use std::time::Duration;
    use arrow::datatypes::Schema;
    use hd_data::SqliteSource;

    /// Source answering with an empty table after a delay
    struct DelayedSource {
        name: String,
        delay: Duration,
    }

    #[async_trait::async_trait]
    impl DataSource for DelayedSource {
        async fn fetch_table(&self) -> anyhow::Result<RecordBatch> {
            tokio::time::sleep(self.delay).await;
            Ok(RecordBatch::new_empty(Arc::new(Schema::empty())))
        }

        fn source_name(&self) -> &str {
            &self.name
        }
    }

    fn delayed(name: &str, millis: u64) -> Arc<dyn DataSource> {
        Arc::new(DelayedSource { name: name.to_string(), delay: Duration::from_millis(millis) })
    }

    #[tokio::test]
    async fn test_outcome_arrives_on_channel() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vitals.db");
        create_sample_database(&path, 2, 3).unwrap();

        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let source: Arc<dyn DataSource> = Arc::new(SqliteSource::new(&path, SAMPLE_TABLE));
        spawn_fetch(&Handle::current(), 1, source, tx, || {});

        let outcome = rx.recv().await.unwrap();
        assert_eq!(outcome.source_name, "vitals.db");
        assert_eq!(outcome.result.unwrap().num_rows(), 6);
    }

    #[tokio::test]
    async fn test_failure_is_delivered_too() {
        let dir = tempfile::tempdir().unwrap();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let source: Arc<dyn DataSource> =
            Arc::new(SqliteSource::new(dir.path().join("missing.db"), SAMPLE_TABLE));
        spawn_fetch(&Handle::current(), 1, source, tx, || {});

        assert!(rx.recv().await.unwrap().result.is_err());
    }

    #[tokio::test]
    async fn test_only_latest_fetch_is_current() {
        let mut generations = FetchGenerations::default();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

        // a slow startup fetch overtaken by a later, faster one
        spawn_fetch(&Handle::current(), generations.next(), delayed("vitals.db", 200), tx.clone(), || {});
        spawn_fetch(&Handle::current(), generations.next(), delayed("vitals.csv", 0), tx, || {});

        let first = rx.recv().await.unwrap();
        assert_eq!(first.source_name, "vitals.csv");
        assert!(generations.is_current(&first));

        let late = rx.recv().await.unwrap();
        assert_eq!(late.source_name, "vitals.db");
        assert!(!generations.is_current(&late));
    }
}
