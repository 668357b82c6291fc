//! In-memory implementation of the time-series write capability.
//!
//! Stores accepted records per database/table pair and is suitable for tests
//! and development. A failure can be injected on a chosen call to exercise
//! partial-batch failure handling in callers.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::RwLock;

use crate::{
    TimeSeriesWrite,
    error::{BatchTooLargeSnafu, RejectedRecord, RejectedSnafu, Result, UnavailableSnafu},
    types::{CommonAttributes, Dimension, MAX_BATCH_RECORDS, Point, TimeUnit, WriteAck, WriteTarget},
};

/// One record as the destination stored it, with the invocation-wide
/// attributes merged in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    pub point: Point,
    pub dimensions: Vec<Dimension>,
    pub time_unit: TimeUnit,
}

#[derive(Debug, Default)]
struct TimeSeriesStore {
    tables: HashMap<(String, String), Vec<StoredRecord>>,
}

/// In-memory time-series destination.
#[derive(Debug, Default)]
pub struct InMemoryTimeSeries {
    store: RwLock<TimeSeriesStore>,
    calls: AtomicUsize,
    fail_call: Option<usize>,
}

impl InMemoryTimeSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Destination that fails the `call`-th `write_batch` invocation
    /// (zero-based) with an unavailability error.
    pub fn failing_on_call(call: usize) -> Self {
        Self {
            fail_call: Some(call),
            ..Self::default()
        }
    }

    /// Number of `write_batch` calls received so far, including failed ones.
    pub fn batches_received(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Records stored for the given target, in arrival order.
    pub async fn records(&self, target: &WriteTarget) -> Vec<StoredRecord> {
        let store = self.store.read().await;
        store
            .tables
            .get(&table_key(target))
            .cloned()
            .unwrap_or_default()
    }

    pub async fn record_count(&self, target: &WriteTarget) -> usize {
        let store = self.store.read().await;
        store
            .tables
            .get(&table_key(target))
            .map(Vec::len)
            .unwrap_or(0)
    }
}

#[async_trait::async_trait]
impl TimeSeriesWrite for InMemoryTimeSeries {
    async fn write_batch(
        &self,
        target: &WriteTarget,
        records: &[Point],
        common: &CommonAttributes,
    ) -> Result<WriteAck> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_call == Some(call) {
            return UnavailableSnafu {
                message: format!("injected failure on call {call}"),
            }
            .fail();
        }

        if records.len() > MAX_BATCH_RECORDS {
            return BatchTooLargeSnafu {
                count: records.len(),
                limit: MAX_BATCH_RECORDS,
            }
            .fail();
        }

        // Destination-side validation: timestamps must be integral epoch values.
        let rejected: Vec<_> = records
            .iter()
            .filter(|record| record.timestamp.parse::<i64>().is_err())
            .map(|record| RejectedRecord {
                record: record.clone(),
                reason: "timestamp is not an integral epoch value".to_string(),
            })
            .collect();

        if !rejected.is_empty() {
            return RejectedSnafu { rejected }.fail();
        }

        let mut store = self.store.write().await;
        let table = store.tables.entry(table_key(target)).or_default();
        table.extend(records.iter().map(|record| StoredRecord {
            point: record.clone(),
            dimensions: common.dimensions.clone(),
            time_unit: common.time_unit,
        }));

        Ok(WriteAck {
            records_written: records.len(),
        })
    }
}

fn table_key(target: &WriteTarget) -> (String, String) {
    (
        target.database.as_str().to_string(),
        target.table.as_str().to_string(),
    )
}
