use serde::{Deserialize, Serialize};

use crate::value::ValueType;

/// Hard per-call batch ceiling imposed by the destination's write API.
pub const MAX_BATCH_RECORDS: usize = 100;

/// One normalized time-series observation.
///
/// `value` keeps the original textual form of the measurement; `value_type`
/// records what the value was inferred to be. `timestamp` is an epoch value
/// in the invocation's [`TimeUnit`]. Points with an empty `value` are dropped
/// before batching, a value may be legitimately absent when the source device
/// was offline during part of an aggregation interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub metric: String,
    pub value: String,
    pub value_type: ValueType,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<Tag>,
}

/// Optional per-point dimension, e.g. the data source a snapshot point came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub value: String,
}

/// Unit of the `timestamp` field of every record in a write call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeUnit {
    Seconds,
    Milliseconds,
    Microseconds,
    Nanoseconds,
}

/// Invocation-wide dimension attached to every record in a write call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    pub name: String,
    pub value: String,
}

/// Attributes shared by all records of one write call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonAttributes {
    pub time_unit: TimeUnit,
    pub dimensions: Vec<Dimension>,
}

/// A destination database name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatabaseName(String);

/// A table within a destination database.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableName(String);

/// The database/table pair a write call lands in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteTarget {
    pub database: DatabaseName,
    pub table: TableName,
}

/// Destination acknowledgement for one accepted batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteAck {
    pub records_written: usize,
}

impl DatabaseName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TableName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DatabaseName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for TableName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
