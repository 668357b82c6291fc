use snafu::Snafu;
use updraft_timeseries::TimeSeriesError;

use crate::decode::DecodeError;

/// Pipeline error types, one variant per failing stage.
///
/// Any of these aborts the invocation before the deletion stage, so the
/// source object stays available for reprocessing.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum PipelineError {
    #[snafu(display("failed to retrieve {bucket}:{key} from object storage"))]
    Retrieval {
        bucket: String,
        key: String,
        source: object_store::Error,
    },
    #[snafu(display("failed to decode {bucket}:{key}"))]
    Decode {
        bucket: String,
        key: String,
        source: DecodeError,
    },
    #[snafu(display("failed to write points downstream"))]
    Write { source: TimeSeriesError },
    #[snafu(display("failed to delete {bucket}:{key} after a successful write"))]
    Deletion {
        bucket: String,
        key: String,
        source: object_store::Error,
    },
}

pub type Result<T, E = PipelineError> = std::result::Result<T, E>;
