//! Chunked, concurrent batch submission.
//!
//! The destination caps one write call at [`MAX_BATCH_RECORDS`] records, so
//! the point sequence is split into contiguous chunks that are submitted as
//! independent concurrent writes. Chunks are disjoint and order between them
//! carries no meaning, every point of an invocation shares one processing
//! batch, so concurrent submission is safe.

use futures::future;
use tracing::{error, info, warn};
use updraft_timeseries::{
    CommonAttributes, MAX_BATCH_RECORDS, Point, TimeSeriesError, TimeSeriesWrite, WriteAck,
    WriteTarget,
};

/// Submit `points` as chunked writes and wait for every chunk to settle.
///
/// Returns the acknowledgements in chunk order, or the first chunk error
/// after all chunks have settled. Records the destination rejected are
/// logged before the error propagates. There is no per-chunk retry: chunks
/// that succeeded before a failing one stay written, so reprocessing the
/// same source may duplicate them.
pub async fn write_all(
    destination: &dyn TimeSeriesWrite,
    target: &WriteTarget,
    points: &[Point],
    common: &CommonAttributes,
) -> Result<Vec<WriteAck>, TimeSeriesError> {
    let chunks: Vec<&[Point]> = points.chunks(MAX_BATCH_RECORDS).collect();
    info!(
        chunks = chunks.len(),
        points = points.len(),
        "submitting chunked write"
    );

    let writes = chunks
        .iter()
        .map(|chunk| destination.write_batch(target, chunk, common));
    let outcomes = future::join_all(writes).await;

    let mut acks = Vec::with_capacity(outcomes.len());
    let mut first_error = None;
    for (chunk, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(ack) => acks.push(ack),
            Err(err) => {
                if let TimeSeriesError::Rejected { rejected } = &err {
                    for rejection in rejected {
                        warn!(
                            chunk,
                            metric = %rejection.record.metric,
                            reason = %rejection.reason,
                            "record rejected by destination"
                        );
                    }
                }
                error!(chunk, %err, "chunk write failed");
                first_error.get_or_insert(err);
            }
        }
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(acks),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use updraft_timeseries::{
        DatabaseName, Dimension, InMemoryTimeSeries, TableName, TimeUnit, ValueType,
    };

    fn target() -> WriteTarget {
        WriteTarget {
            database: DatabaseName::new("metrics"),
            table: TableName::new("readings"),
        }
    }

    fn common() -> CommonAttributes {
        CommonAttributes {
            time_unit: TimeUnit::Milliseconds,
            dimensions: vec![Dimension {
                name: "context".to_string(),
                value: "test".to_string(),
            }],
        }
    }

    fn points(count: usize) -> Vec<Point> {
        (0..count)
            .map(|i| Point {
                metric: format!("metric.{i}"),
                value: i.to_string(),
                value_type: ValueType::Numeric,
                timestamp: "1700000000000".to_string(),
                tag: None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_chunks_preserve_order_and_size() {
        let destination = InMemoryTimeSeries::new();
        let input = points(250);

        let acks = write_all(&destination, &target(), &input, &common())
            .await
            .expect("write_all");

        assert_eq!(acks.len(), 3);
        assert_eq!(acks[0].records_written, 100);
        assert_eq!(acks[1].records_written, 100);
        assert_eq!(acks[2].records_written, 50);
        assert_eq!(destination.batches_received(), 3);

        // Concatenating the stored chunks reconstructs the input sequence.
        let stored = destination.records(&target()).await;
        let stored_points: Vec<_> = stored.into_iter().map(|r| r.point).collect();
        assert_eq!(stored_points, input);
    }

    #[tokio::test]
    async fn test_exact_multiple_of_chunk_size() {
        let destination = InMemoryTimeSeries::new();
        let acks = write_all(&destination, &target(), &points(200), &common())
            .await
            .expect("write_all");

        assert_eq!(acks.len(), 2);
        assert_eq!(destination.batches_received(), 2);
    }

    #[tokio::test]
    async fn test_no_points_no_writes() {
        let destination = InMemoryTimeSeries::new();
        let acks = write_all(&destination, &target(), &[], &common())
            .await
            .expect("write_all");

        assert!(acks.is_empty());
        assert_eq!(destination.batches_received(), 0);
    }

    #[tokio::test]
    async fn test_any_failing_chunk_fails_the_write() {
        let destination = InMemoryTimeSeries::failing_on_call(1);

        let error = write_all(&destination, &target(), &points(250), &common())
            .await
            .unwrap_err();
        assert!(matches!(error, TimeSeriesError::Unavailable { .. }));

        // Every chunk was still submitted; the failure did not short-circuit
        // the remaining chunks.
        assert_eq!(destination.batches_received(), 3);
        // The chunks that succeeded stay written.
        assert_eq!(destination.record_count(&target()).await, 150);
    }
}
