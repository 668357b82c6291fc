use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use snafu::ResultExt;
use updraft_object_store::{BucketName, LocalFileSystemFactory};
use updraft_pipeline::{ObjectEvent, Pipeline, PipelineConfig};
use updraft_timeseries::StdoutTimeSeries;

use crate::error::{ConfigSnafu, EventSnafu, InvalidArgumentSnafu, IoSnafu, Result, StoreSnafu};

/// Arguments shared by every invocation: where the trigger event comes from
/// and where the local object store lives. The destination configuration is
/// read from the environment, as the hosting runtime would provide it.
#[derive(Args)]
pub struct InvocationArgs {
    /// Path to a storage-notification JSON document
    #[arg(long)]
    event: Option<PathBuf>,

    /// Bucket holding the source object (alternative to --event)
    #[arg(long)]
    bucket: Option<String>,

    /// Key of the source object (alternative to --event)
    #[arg(long)]
    key: Option<String>,

    /// Root directory backing the local object store
    #[arg(long, default_value = ".")]
    store_root: PathBuf,
}

impl InvocationArgs {
    pub fn object_event(&self) -> Result<ObjectEvent> {
        if let Some(path) = &self.event {
            let document = std::fs::read(path).context(IoSnafu)?;
            return ObjectEvent::parse(&document).context(EventSnafu);
        }

        match (&self.bucket, &self.key) {
            (Some(bucket), Some(key)) => Ok(ObjectEvent {
                bucket: BucketName::new(bucket),
                key: key.clone(),
            }),
            _ => InvalidArgumentSnafu {
                name: "event",
                message: "either --event or both --bucket and --key are required".to_string(),
            }
            .fail(),
        }
    }

    pub fn pipeline(&self) -> Result<Pipeline> {
        let config = PipelineConfig::from_env().context(ConfigSnafu)?;
        let stores = LocalFileSystemFactory::new(&self.store_root).context(StoreSnafu)?;

        Ok(Pipeline::new(
            Arc::new(stores),
            Arc::new(StdoutTimeSeries),
            config,
        ))
    }
}
