use snafu::Snafu;

use crate::types::Point;

/// Errors returned by the time-series destination.
///
/// The message associated with an error is logged and forwarded to the
/// invocation's caller, so it should say what the destination objected to.
#[derive(Debug, Clone, Snafu)]
#[snafu(visibility(pub))]
pub enum TimeSeriesError {
    /// The destination refused a subset of the submitted records.
    #[snafu(display("destination rejected {} of the submitted records", rejected.len()))]
    Rejected { rejected: Vec<RejectedRecord> },
    /// The batch exceeds the destination's per-call record ceiling.
    #[snafu(display("batch of {count} records exceeds the destination limit of {limit}"))]
    BatchTooLarge { count: usize, limit: usize },
    /// The destination could not be reached or failed internally.
    #[snafu(display("destination unavailable: {message}"))]
    Unavailable { message: String },
}

/// One record the destination refused, with its stated reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    pub record: Point,
    pub reason: String,
}

pub type Result<T, E = TimeSeriesError> = std::result::Result<T, E>;
