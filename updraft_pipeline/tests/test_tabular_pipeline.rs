use common::{event, gzip, harness, object_exists, put_object, test_config, write_target};
use updraft_pipeline::{COMPLETION_TOKEN, PipelineError};
use updraft_timeseries::InMemoryTimeSeries;

mod common;

/// 150 rows with two sample columns each; the second sample is empty for the
/// first 50 rows, so 250 points survive the empty-value filter.
fn csv_fixture() -> Vec<u8> {
    let mut table = String::from("path,1700000000000,1700000000001\n");
    for i in 0..150 {
        let second = if i < 50 {
            String::new()
        } else {
            format!("{}.5", i)
        };
        table.push_str(&format!("house.metric.{i},{i},{second}\n"));
    }

    gzip(table.as_bytes())
}

#[tokio::test]
async fn test_end_to_end_csv_ingestion() {
    let harness = harness(test_config(true), InMemoryTimeSeries::new());
    put_object(&harness, "landing", "drops/readings.csv.gz", csv_fixture()).await;

    let token = harness
        .pipeline
        .run_tabular(&event("landing", "drops/readings.csv.gz"))
        .await
        .expect("run_tabular");
    assert_eq!(token, COMPLETION_TOKEN);

    // 250 surviving points land as 100 + 100 + 50.
    assert_eq!(harness.destination.batches_received(), 3);
    assert_eq!(harness.destination.record_count(&write_target()).await, 250);

    let stored = harness.destination.records(&write_target()).await;
    assert_eq!(stored[0].point.metric, "house.metric.0");
    assert_eq!(stored[0].point.value, "0");
    assert_eq!(stored[0].point.timestamp, "1700000000000");
    assert_eq!(stored[0].dimensions[0].name, "context");
    assert_eq!(stored[0].dimensions[0].value, "updraft-test");

    // The source object is removed after the successful write.
    assert!(!object_exists(&harness, "landing", "drops/readings.csv.gz").await);
}

#[tokio::test]
async fn test_invalid_gzip_is_a_decode_error() {
    let harness = harness(test_config(true), InMemoryTimeSeries::new());
    put_object(
        &harness,
        "landing",
        "drops/corrupt.csv.gz",
        b"definitely not gzip".to_vec(),
    )
    .await;

    let error = harness
        .pipeline
        .run_tabular(&event("landing", "drops/corrupt.csv.gz"))
        .await
        .unwrap_err();
    assert!(matches!(error, PipelineError::Decode { .. }));

    // Nothing was written and the object stays in place for reprocessing.
    assert_eq!(harness.destination.batches_received(), 0);
    assert!(object_exists(&harness, "landing", "drops/corrupt.csv.gz").await);
}

#[tokio::test]
async fn test_missing_object_is_a_retrieval_error() {
    let harness = harness(test_config(true), InMemoryTimeSeries::new());

    let error = harness
        .pipeline
        .run_tabular(&event("landing", "drops/never-uploaded.csv.gz"))
        .await
        .unwrap_err();
    assert!(matches!(error, PipelineError::Retrieval { .. }));
    assert_eq!(harness.destination.batches_received(), 0);
}

#[tokio::test]
async fn test_failing_chunk_fails_the_invocation_and_skips_deletion() {
    let harness = harness(test_config(true), InMemoryTimeSeries::failing_on_call(1));
    put_object(&harness, "landing", "drops/readings.csv.gz", csv_fixture()).await;

    let error = harness
        .pipeline
        .run_tabular(&event("landing", "drops/readings.csv.gz"))
        .await
        .unwrap_err();
    assert!(matches!(error, PipelineError::Write { .. }));

    // All chunks were submitted before the invocation failed, but deletion
    // never ran.
    assert_eq!(harness.destination.batches_received(), 3);
    assert!(object_exists(&harness, "landing", "drops/readings.csv.gz").await);
}

#[tokio::test]
async fn test_rerun_on_undeleted_object_appends_duplicates() {
    let harness = harness(test_config(false), InMemoryTimeSeries::new());
    put_object(&harness, "landing", "drops/readings.csv.gz", csv_fixture()).await;

    for _ in 0..2 {
        harness
            .pipeline
            .run_tabular(&event("landing", "drops/readings.csv.gz"))
            .await
            .expect("run_tabular");
    }

    // Deletion is disabled, so the object survives and the rerun appends a
    // second copy of every point.
    assert!(object_exists(&harness, "landing", "drops/readings.csv.gz").await);
    assert_eq!(harness.destination.record_count(&write_target()).await, 500);
}
