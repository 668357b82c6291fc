//! Stream decoders: gzipped CSV tables and gzipped JSON snapshots.
//!
//! Both decoders stream the gzip decompression from the underlying byte
//! source; the tabular decoder hands each decompressed chunk to the CSV
//! parser as it arrives and buffers only the parsed rows, so memory is
//! bounded by the size of the source data rather than the compressed stream.
//! Any decompression or parse error aborts the invocation.

use std::io::Read;

use flate2::read::MultiGzDecoder;
use serde::Deserialize;
use snafu::{ResultExt, Snafu};

/// The privileged tabular column holding the metric name; every other
/// column is a `(timestamp, value)` sample.
pub const PATH_COLUMN: &str = "path";

/// One decoded tabular row: the metric path plus its samples, in the
/// source's encoded column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularRow {
    pub path: String,
    pub samples: Vec<(String, String)>,
}

/// One point-shaped object from a pre-batched snapshot document.
///
/// The external batching convention produces a flat list of these; the
/// decoder consumes the shape but does not define it. `value` and `time`
/// stay as raw JSON scalars until normalization renders them to text.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotPoint {
    pub path: String,
    pub value: serde_json::Value,
    pub time: serde_json::Value,
    pub source: String,
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum DecodeError {
    #[snafu(display("failed to read decompressed stream"))]
    Io { source: std::io::Error },
    #[snafu(display("failed to parse tabular data"))]
    Csv { source: csv::Error },
    #[snafu(display("failed to parse snapshot document"))]
    Json { source: serde_json::Error },
    #[snafu(display("tabular source has no '{PATH_COLUMN}' column"))]
    MissingPathColumn,
}

/// Decode a gzipped, header-delimited CSV stream into rows.
pub fn decode_tabular<R: Read>(input: R) -> Result<Vec<TabularRow>, DecodeError> {
    let decoder = MultiGzDecoder::new(input);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(decoder);

    let headers = reader.headers().context(CsvSnafu)?.clone();
    let Some(path_index) = headers.iter().position(|column| column == PATH_COLUMN) else {
        return MissingPathColumnSnafu {}.fail();
    };

    let mut rows = Vec::new();
    for record in reader.into_records() {
        let record = record.context(CsvSnafu)?;

        let mut path = String::new();
        let mut samples = Vec::with_capacity(headers.len().saturating_sub(1));
        for (index, (column, value)) in headers.iter().zip(record.iter()).enumerate() {
            if index == path_index {
                path = value.to_string();
            } else {
                samples.push((column.to_string(), value.to_string()));
            }
        }

        rows.push(TabularRow { path, samples });
    }

    Ok(rows)
}

/// Decode a gzipped snapshot document: the decompressed text is one JSON
/// document that already is the flat point list.
pub fn decode_snapshot<R: Read>(input: R) -> Result<Vec<SnapshotPoint>, DecodeError> {
    let mut decoder = MultiGzDecoder::new(input);
    let mut text = String::new();
    decoder.read_to_string(&mut text).context(IoSnafu)?;

    serde_json::from_str(&text).context(JsonSnafu)
}
