//! Stdout implementation of the time-series write capability.
//!
//! Prints every accepted record as one JSON line. Intended for development
//! runs where the real destination is not reachable, not for production
//! throughput.

use serde_json::json;

use crate::{
    TimeSeriesWrite,
    error::{BatchTooLargeSnafu, Result},
    types::{CommonAttributes, MAX_BATCH_RECORDS, Point, WriteAck, WriteTarget},
};

/// Development sink that renders records as JSON lines on stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutTimeSeries;

#[async_trait::async_trait]
impl TimeSeriesWrite for StdoutTimeSeries {
    async fn write_batch(
        &self,
        target: &WriteTarget,
        records: &[Point],
        common: &CommonAttributes,
    ) -> Result<WriteAck> {
        if records.len() > MAX_BATCH_RECORDS {
            return BatchTooLargeSnafu {
                count: records.len(),
                limit: MAX_BATCH_RECORDS,
            }
            .fail();
        }

        for record in records {
            let line = json!({
                "database": target.database.as_str(),
                "table": target.table.as_str(),
                "time_unit": common.time_unit,
                "dimensions": common.dimensions,
                "record": record,
            });
            println!("{line}");
        }

        Ok(WriteAck {
            records_written: records.len(),
        })
    }
}
