use std::io::Write;
use std::sync::Arc;

use flate2::{Compression, write::GzEncoder};
use object_store::{PutPayload, path::Path as ObjectPath};
use updraft_object_store::{BucketName, ObjectStoreFactory, TemporaryFileSystemFactory};
use updraft_pipeline::{ObjectEvent, Pipeline, PipelineConfig};
use updraft_timeseries::{DatabaseName, InMemoryTimeSeries, TableName, WriteTarget};

pub struct TestHarness {
    pub stores: Arc<TemporaryFileSystemFactory>,
    pub destination: Arc<InMemoryTimeSeries>,
    pub pipeline: Pipeline,
}

pub fn test_config(delete_on_success: bool) -> PipelineConfig {
    PipelineConfig {
        database: DatabaseName::new("metrics"),
        table: TableName::new("readings"),
        instance_id: "updraft-test".to_string(),
        delete_on_success,
    }
}

pub fn write_target() -> WriteTarget {
    WriteTarget {
        database: DatabaseName::new("metrics"),
        table: TableName::new("readings"),
    }
}

pub fn harness(config: PipelineConfig, destination: InMemoryTimeSeries) -> TestHarness {
    let stores = Arc::new(TemporaryFileSystemFactory::new().expect("temporary store factory"));
    let destination = Arc::new(destination);
    let pipeline = Pipeline::new(stores.clone(), destination.clone(), config);

    TestHarness {
        stores,
        destination,
        pipeline,
    }
}

pub fn event(bucket: &str, key: &str) -> ObjectEvent {
    ObjectEvent {
        bucket: BucketName::new(bucket),
        key: key.to_string(),
    }
}

pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).expect("gzip write");
    encoder.finish().expect("gzip finish")
}

pub async fn put_object(harness: &TestHarness, bucket: &str, key: &str, body: Vec<u8>) {
    let store = harness
        .stores
        .create_object_store(&BucketName::new(bucket))
        .await
        .expect("create_object_store");
    store
        .put(&ObjectPath::from(key), PutPayload::from(body))
        .await
        .expect("put object");
}

pub async fn object_exists(harness: &TestHarness, bucket: &str, key: &str) -> bool {
    let store = harness
        .stores
        .create_object_store(&BucketName::new(bucket))
        .await
        .expect("create_object_store");
    store.head(&ObjectPath::from(key)).await.is_ok()
}
