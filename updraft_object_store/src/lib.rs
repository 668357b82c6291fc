//! Object store factory for creating `ObjectStore` instances per bucket.
//!
//! Trigger events name a bucket and a key; this module provides the
//! `ObjectStoreFactory` trait that turns the bucket name into an
//! `object_store::ObjectStore` client. Implementations decide what a bucket
//! maps to: a directory on the local file system here, a cloud store in a
//! deployment-specific factory.

pub mod local;

use std::sync::Arc;

use object_store::ObjectStore;

pub use local::{LocalFileSystemFactory, TemporaryFileSystemFactory};

/// A bucket in object storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BucketName(String);

impl BucketName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BucketName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Factory trait for creating ObjectStore instances from a bucket name.
#[async_trait::async_trait]
pub trait ObjectStoreFactory: Send + Sync {
    /// Create an ObjectStore instance for the given bucket.
    async fn create_object_store(
        &self,
        bucket: &BucketName,
    ) -> Result<Arc<dyn ObjectStore>, object_store::Error>;
}
