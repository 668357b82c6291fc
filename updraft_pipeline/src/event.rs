//! Trigger event documents.
//!
//! An invocation is triggered by an object-storage notification naming the
//! bucket and key that landed. The document arrives either directly or
//! nested one level inside a pub/sub relay envelope whose message body holds
//! the same notification as a JSON string. Object keys are percent-encoded
//! in the notification and are decoded here.

use serde::Deserialize;
use snafu::{ResultExt, Snafu};
use updraft_object_store::BucketName;

/// The bucket/key pair one invocation operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectEvent {
    pub bucket: BucketName,
    pub key: String,
}

#[derive(Debug, Snafu)]
pub enum EventError {
    #[snafu(display("event document is not valid JSON"))]
    Json { source: serde_json::Error },
    #[snafu(display("event document contains no records"))]
    Empty,
    #[snafu(display("event record carries neither a storage entity nor a relay envelope"))]
    UnrecognizedShape,
    #[snafu(display("object key is not valid percent-encoded UTF-8"))]
    KeyEncoding { source: std::string::FromUtf8Error },
}

#[derive(Debug, Deserialize)]
struct NotificationDocument {
    #[serde(rename = "Records")]
    records: Vec<NotificationRecord>,
}

#[derive(Debug, Deserialize)]
struct NotificationRecord {
    #[serde(default)]
    s3: Option<StorageEntity>,
    #[serde(rename = "Sns", default)]
    sns: Option<RelayEnvelope>,
}

#[derive(Debug, Deserialize)]
struct StorageEntity {
    bucket: BucketEntity,
    object: ObjectEntity,
}

#[derive(Debug, Deserialize)]
struct BucketEntity {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ObjectEntity {
    key: String,
}

#[derive(Debug, Deserialize)]
struct RelayEnvelope {
    #[serde(rename = "Message")]
    message: String,
}

impl ObjectEvent {
    /// Extract the bucket/key pair from a notification document, unwrapping
    /// one relay envelope if the notification was delivered through pub/sub.
    pub fn parse(document: &[u8]) -> Result<Self, EventError> {
        let document: NotificationDocument =
            serde_json::from_slice(document).context(JsonSnafu)?;

        let Some(record) = document.records.into_iter().next() else {
            return EmptySnafu {}.fail();
        };

        if let Some(entity) = record.s3 {
            let key = urlencoding::decode(&entity.object.key).context(KeyEncodingSnafu)?;
            return Ok(ObjectEvent {
                bucket: BucketName::new(entity.bucket.name),
                key: key.into_owned(),
            });
        }

        if let Some(envelope) = record.sns {
            return Self::parse(envelope.message.as_bytes());
        }

        UnrecognizedShapeSnafu {}.fail()
    }
}
