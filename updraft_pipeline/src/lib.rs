//! Core transform-and-write pipeline.
//!
//! One invocation per trigger event: fetch the named object, gunzip and
//! decode it (CSV table or pre-batched JSON snapshot), normalize the records
//! into time-series points, write the points downstream in chunks of at most
//! 100, and delete the source object if (and only if) the write fully
//! succeeded and deletion is configured.
//!
//! Every stage error is fatal to the invocation and leaves the source object
//! in place, so a failed invocation can be reprocessed from the same object.

pub mod config;
pub mod decode;
pub mod error;
pub mod event;
pub mod normalize;
pub mod pipeline;
pub mod writer;

pub use config::{ConfigError, PipelineConfig};
pub use decode::{DecodeError, SnapshotPoint, TabularRow};
pub use error::{PipelineError, Result};
pub use event::{EventError, ObjectEvent};
pub use pipeline::{COMPLETION_TOKEN, Pipeline};
