//! Destination-side model for updraft: the normalized point format, the
//! write capability trait, and the implementations used by tests and the
//! development sink.
//!
//! The destination accepts at most [`MAX_BATCH_RECORDS`] records per write
//! call; callers are expected to chunk their point sequences accordingly.

pub mod error;
pub mod memory;
pub mod stdout;
pub mod types;
pub mod value;

pub use error::{RejectedRecord, Result, TimeSeriesError};
pub use memory::{InMemoryTimeSeries, StoredRecord};
pub use stdout::StdoutTimeSeries;
pub use types::{
    CommonAttributes, DatabaseName, Dimension, MAX_BATCH_RECORDS, Point, TableName, Tag, TimeUnit,
    WriteAck, WriteTarget,
};
pub use value::ValueType;

/// Write capability of the time-series destination.
///
/// One call submits one batch of at most [`MAX_BATCH_RECORDS`] records to a
/// single database/table target, together with the attributes shared by every
/// record of the invocation. The destination is append-only: a failed batch
/// is never rolled back by a later call.
#[async_trait::async_trait]
pub trait TimeSeriesWrite: Send + Sync {
    async fn write_batch(
        &self,
        target: &WriteTarget,
        records: &[Point],
        common: &CommonAttributes,
    ) -> Result<WriteAck>;
}
