//! Pipeline orchestrator.
//!
//! One invocation walks fetch → decode → normalize → write → optional
//! delete. Any stage error aborts the rest, including deletion: the source
//! object is only removed after a fully successful write, so a failed
//! invocation can always be reprocessed from the object that is still there.

use std::sync::Arc;

use bytes::{Buf, Bytes};
use object_store::path::Path as ObjectPath;
use snafu::ResultExt;
use tracing::info;
use updraft_object_store::ObjectStoreFactory;
use updraft_timeseries::{Point, TimeSeriesWrite};

use crate::{
    config::PipelineConfig,
    decode,
    error::{DecodeSnafu, DeletionSnafu, Result, RetrievalSnafu, WriteSnafu},
    event::ObjectEvent,
    normalize, writer,
};

/// Opaque token returned to the caller by a fully successful invocation.
pub const COMPLETION_TOKEN: &str = "ok";

/// One pipeline instance: the collaborators plus the invocation-wide
/// configuration, shared by every event it handles.
pub struct Pipeline {
    stores: Arc<dyn ObjectStoreFactory>,
    destination: Arc<dyn TimeSeriesWrite>,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(
        stores: Arc<dyn ObjectStoreFactory>,
        destination: Arc<dyn TimeSeriesWrite>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            stores,
            destination,
            config,
        }
    }

    /// Handle an event announcing a gzipped CSV table.
    pub async fn run_tabular(&self, event: &ObjectEvent) -> Result<&'static str> {
        info!(instance = %self.config.instance_id, "starting tabular invocation");

        let body = self.fetch(event).await?;
        let rows = decode::decode_tabular(body.reader()).context(DecodeSnafu {
            bucket: event.bucket.as_str(),
            key: event.key.as_str(),
        })?;
        info!(rows = rows.len(), "decoded tabular rows");

        let points = normalize::points_from_rows(rows);
        self.write_and_cleanup(event, points).await
    }

    /// Handle an event announcing a gzipped pre-batched JSON snapshot.
    pub async fn run_snapshot(&self, event: &ObjectEvent) -> Result<&'static str> {
        info!(instance = %self.config.instance_id, "starting snapshot invocation");

        let body = self.fetch(event).await?;
        let snapshot = decode::decode_snapshot(body.reader()).context(DecodeSnafu {
            bucket: event.bucket.as_str(),
            key: event.key.as_str(),
        })?;
        info!(entries = snapshot.len(), "decoded snapshot entries");

        let points = normalize::points_from_snapshot(snapshot);
        self.write_and_cleanup(event, points).await
    }

    async fn fetch(&self, event: &ObjectEvent) -> Result<Bytes> {
        info!(bucket = %event.bucket, key = %event.key, "get object");

        let store = self
            .stores
            .create_object_store(&event.bucket)
            .await
            .context(RetrievalSnafu {
                bucket: event.bucket.as_str(),
                key: event.key.as_str(),
            })?;

        let result = store
            .get(&ObjectPath::from(event.key.as_str()))
            .await
            .context(RetrievalSnafu {
                bucket: event.bucket.as_str(),
                key: event.key.as_str(),
            })?;

        result.bytes().await.context(RetrievalSnafu {
            bucket: event.bucket.as_str(),
            key: event.key.as_str(),
        })
    }

    async fn write_and_cleanup(
        &self,
        event: &ObjectEvent,
        points: Vec<Point>,
    ) -> Result<&'static str> {
        info!(points = points.len(), "normalized point sequence");

        let acks = writer::write_all(
            self.destination.as_ref(),
            &self.config.write_target(),
            &points,
            &self.config.common_attributes(),
        )
        .await
        .context(WriteSnafu)?;
        info!(batches = acks.len(), "destination write complete");

        if self.config.delete_on_success {
            self.delete_source(event).await?;
        }

        Ok(COMPLETION_TOKEN)
    }

    async fn delete_source(&self, event: &ObjectEvent) -> Result<()> {
        info!(bucket = %event.bucket, key = %event.key, "delete object");

        let store = self
            .stores
            .create_object_store(&event.bucket)
            .await
            .context(DeletionSnafu {
                bucket: event.bucket.as_str(),
                key: event.key.as_str(),
            })?;

        store
            .delete(&ObjectPath::from(event.key.as_str()))
            .await
            .context(DeletionSnafu {
                bucket: event.bucket.as_str(),
                key: event.key.as_str(),
            })
    }
}
