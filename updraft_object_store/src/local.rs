//! Local file system object store factory implementation.
//!
//! `LocalFileSystemFactory` maps each bucket to a subdirectory of a
//! configured root path, creating it on first use.
//!
//! `TemporaryFileSystemFactory` places the root in a temporary directory
//! that is removed when the factory is dropped, which is what the tests and
//! development runs want.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use object_store::{Error as ObjectStoreError, ObjectStore, local::LocalFileSystem};
use tempfile::TempDir;

use crate::{BucketName, ObjectStoreFactory};

/// Factory for creating local file system object stores.
///
/// Each bucket is mapped to `<root>/<bucket>`, providing isolation between
/// buckets without any remote configuration.
pub struct LocalFileSystemFactory {
    root_path: PathBuf,
}

impl LocalFileSystemFactory {
    pub fn new(root_path: impl AsRef<Path>) -> Result<Self, ObjectStoreError> {
        let canonical_path =
            std::fs::canonicalize(root_path.as_ref()).map_err(|e| ObjectStoreError::Generic {
                store: "LocalFileSystem",
                source: Box::new(e),
            })?;

        Ok(Self {
            root_path: canonical_path,
        })
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }
}

#[async_trait::async_trait]
impl ObjectStoreFactory for LocalFileSystemFactory {
    async fn create_object_store(
        &self,
        bucket: &BucketName,
    ) -> Result<Arc<dyn ObjectStore>, ObjectStoreError> {
        let store_path = self.root_path.join(bucket.as_str());

        std::fs::create_dir_all(&store_path).map_err(|e| ObjectStoreError::Generic {
            store: "LocalFileSystem",
            source: Box::new(e),
        })?;

        let local_fs = LocalFileSystem::new_with_prefix(store_path)?;

        Ok(Arc::new(local_fs))
    }
}

/// Factory for creating temporary file system object stores.
///
/// The bucket directories live under a temporary root that is cleaned up
/// when the factory is dropped.
pub struct TemporaryFileSystemFactory {
    _temp_dir: TempDir,
    local_factory: LocalFileSystemFactory,
}

impl TemporaryFileSystemFactory {
    pub fn new() -> Result<Self, ObjectStoreError> {
        let temp_dir = TempDir::new().map_err(|e| ObjectStoreError::Generic {
            store: "TemporaryFileSystem",
            source: Box::new(e),
        })?;

        let local_factory = LocalFileSystemFactory::new(temp_dir.path())?;

        Ok(Self {
            _temp_dir: temp_dir,
            local_factory,
        })
    }

    pub fn root_path(&self) -> &Path {
        self.local_factory.root_path()
    }
}

#[async_trait::async_trait]
impl ObjectStoreFactory for TemporaryFileSystemFactory {
    async fn create_object_store(
        &self,
        bucket: &BucketName,
    ) -> Result<Arc<dyn ObjectStore>, ObjectStoreError> {
        self.local_factory.create_object_store(bucket).await
    }
}
