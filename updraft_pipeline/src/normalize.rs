//! Point normalization: decoder output to the flat point sequence.
//!
//! Two strategies, one per input shape. Tabular rows fan out into one point
//! per sample column; snapshot points map 1:1 with type coercion. Both end
//! by dropping points whose value is the empty string.

use updraft_timeseries::{Point, Tag, ValueType};

use crate::decode::{SnapshotPoint, TabularRow};

/// Tag name carrying a snapshot point's data-source identifier.
const SOURCE_TAG: &str = "source";

/// Fan a decoded table out into points: one per `(timestamp, value)` sample,
/// named by the row's path, with no tag. Values keep their original textual
/// form. A row with no samples contributes nothing.
pub fn points_from_rows(rows: Vec<TabularRow>) -> Vec<Point> {
    let mut points = Vec::new();
    for row in rows {
        for (timestamp, value) in row.samples {
            let value_type = ValueType::infer(&value);
            points.push(Point {
                metric: row.path.clone(),
                value,
                value_type,
                timestamp,
                tag: None,
            });
        }
    }

    drop_empty_values(points)
}

/// Map snapshot points 1:1: render the raw scalars to text, infer the type
/// once, and re-render numeric values canonically (`f64` display form) so
/// downstream consumers see a single spelling per number. Each point is
/// tagged with its declared data source.
pub fn points_from_snapshot(snapshot: Vec<SnapshotPoint>) -> Vec<Point> {
    let mut points = Vec::with_capacity(snapshot.len());
    for entry in snapshot {
        let text = scalar_text(&entry.value);
        let value_type = ValueType::infer(&text);
        let value = match value_type {
            ValueType::Numeric => text.parse::<f64>().map(|n| n.to_string()).unwrap_or(text),
            _ => text,
        };

        points.push(Point {
            metric: entry.path,
            value,
            value_type,
            timestamp: scalar_text(&entry.time),
            tag: Some(Tag {
                name: SOURCE_TAG.to_string(),
                value: entry.source,
            }),
        });
    }

    drop_empty_values(points)
}

/// Missing values are encoded as empty strings by both sources (a device
/// offline during part of an aggregation interval); they never reach a chunk.
fn drop_empty_values(mut points: Vec<Point>) -> Vec<Point> {
    points.retain(|point| !point.value.is_empty());
    points
}

fn scalar_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
