//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Vista.
//! The Vista project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Dataset Storage Module
//!
//! A [`ViStorage`] is an object store plus a root prefix: the directory-like
//! location a dataset lives under. Jobs only ever talk to storage through
//! this type, so the same job runs against S3, a local directory, or an
//! in-memory store in tests.
//!
//! ## Supported Locations
//!
//! - `s3://bucket/prefix` (credentials and region from the environment)
//! - `file:///absolute/path`
//! - `memory://name/prefix` (a fresh, empty in-memory store)
//! - a plain filesystem path

use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use futures::TryStreamExt;
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::{ObjectMeta, ObjectStore, PutPayload};
use url::Url;

use crate::errors::{Result, ViError};

/// Object store rooted at a dataset location.
#[derive(Clone, Debug)]
pub struct ViStorage {
    store: Arc<dyn ObjectStore>,
    root: Path,
    location: String,
}

impl ViStorage {
    /// Wraps an existing store. `root` is the dataset prefix inside it.
    pub fn new(store: Arc<dyn ObjectStore>, root: &str) -> Self {
        let root = Path::from(root.trim_matches('/'));
        let location = format!("{}/{}", store, root);
        Self {
            store,
            root,
            location,
        }
    }

    /// Opens an existing dataset location for reading.
    ///
    /// Local directories must exist.
    pub fn open(location: &str) -> Result<Self> {
        Self::build(location, false)
    }

    /// Opens a dataset location for writing, creating local directories.
    pub fn create(location: &str) -> Result<Self> {
        Self::build(location, true)
    }

    fn build(location: &str, create: bool) -> Result<Self> {
        let location = location.trim();
        if location.is_empty() {
            return Err(ViError::validation("storage location cannot be empty"));
        }

        if !location.contains("://") {
            return Self::local(location, PathBuf::from(location), create);
        }

        let url = Url::parse(location)
            .map_err(|e| ViError::validation(format!("invalid location '{}': {}", location, e)))?;

        let mut storage = match url.scheme() {
            "s3" | "s3a" => {
                let bucket = url.host_str().ok_or_else(|| {
                    ViError::validation(format!("location '{}' has no bucket", location))
                })?;
                let store = AmazonS3Builder::from_env()
                    .with_bucket_name(bucket)
                    .build()
                    .map_err(|e| ViError::storage(location, e))?;
                Self::new(Arc::new(store), url.path())
            }
            "file" => {
                let dir = url.to_file_path().map_err(|_| {
                    ViError::validation(format!("location '{}' is not a local path", location))
                })?;
                return Self::local(location, dir, create);
            }
            "memory" => {
                let root = format!("{}{}", url.host_str().unwrap_or_default(), url.path());
                Self::new(Arc::new(InMemory::new()), &root)
            }
            other => {
                return Err(ViError::validation(format!(
                    "unsupported storage scheme '{}' in '{}'",
                    other, location
                )))
            }
        };
        storage.location = location.to_string();
        Ok(storage)
    }

    fn local(location: &str, dir: PathBuf, create: bool) -> Result<Self> {
        if create {
            std::fs::create_dir_all(&dir).map_err(|e| ViError::storage(location, e))?;
        }
        let store = LocalFileSystem::new_with_prefix(&dir).map_err(|e| ViError::storage(location, e))?;
        let mut storage = Self::new(Arc::new(store), "");
        storage.location = location.to_string();
        Ok(storage)
    }

    /// The location string this storage was opened from.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Resolves a `/`-separated path relative to the root.
    pub fn child(&self, relative: &str) -> Path {
        relative
            .split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.root.clone(), |path, segment| path.child(segment))
    }

    /// Segments of `location` below the root, or `None` if it lies elsewhere.
    pub fn relative_parts(&self, location: &Path) -> Option<Vec<String>> {
        location
            .prefix_match(&self.root)
            .map(|parts| parts.map(|part| part.as_ref().to_string()).collect())
    }

    /// Lists every object under the root, sorted by location.
    pub async fn list(&self) -> Result<Vec<ObjectMeta>> {
        let prefix = if self.root.as_ref().is_empty() {
            None
        } else {
            Some(&self.root)
        };
        let mut objects: Vec<ObjectMeta> = self
            .store
            .list(prefix)
            .try_collect()
            .await
            .map_err(|e| ViError::storage(&self.location, e))?;
        objects.sort_by(|a, b| a.location.as_ref().cmp(b.location.as_ref()));
        Ok(objects)
    }

    /// Reads a whole object.
    pub async fn get(&self, location: &Path) -> Result<Bytes> {
        let result = self
            .store
            .get(location)
            .await
            .map_err(|e| ViError::storage(&self.location, e))?;
        result
            .bytes()
            .await
            .map_err(|e| ViError::storage(&self.location, e))
    }

    /// Writes an object at a path relative to the root. Returns its size.
    pub async fn put(&self, relative: &str, data: Vec<u8>) -> Result<u64> {
        let size = data.len() as u64;
        self.store
            .put(&self.child(relative), PutPayload::from(data))
            .await
            .map_err(|e| ViError::storage(&self.location, e))?;
        Ok(size)
    }

    /// Deletes every object under the root. Returns how many were removed.
    pub async fn clear(&self) -> Result<usize> {
        let objects = self.list().await?;
        for object in &objects {
            self.store
                .delete(&object.location)
                .await
                .map_err(|e| ViError::storage(&self.location, e))?;
        }
        if !objects.is_empty() {
            log::info!("removed {} existing objects under {}", objects.len(), self.location);
        }
        Ok(objects.len())
    }
}
