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

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ViError};

/// Name of the commit marker written after all data files.
pub const SUCCESS_MARKER: &str = "_SUCCESS";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViManifestFile {
    /// Path relative to the dataset root.
    pub path: String,
    pub size: u64,
    /// Hex blake3 digest of the file contents.
    pub hash: String,
    pub record_count: usize,
}

/// Contents of the `_SUCCESS` marker.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ViManifest {
    pub version: String,
    pub created_at: DateTime<Utc>,
    pub total_records: usize,
    pub total_size: u64,
    pub files: Vec<ViManifestFile>,
    pub metadata: BTreeMap<String, String>,
}

impl Default for ViManifest {
    fn default() -> Self {
        Self {
            version: "1.0.0".to_string(),
            created_at: Utc::now(),
            total_records: 0,
            total_size: 0,
            files: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ViManifestBuilder {
    manifest: ViManifest,
}

impl ViManifestBuilder {
    pub fn new() -> Self {
        Self {
            manifest: ViManifest::default(),
        }
    }

    /// Records a written file, hashing its contents.
    pub fn add_file(mut self, path: &str, data: &[u8], record_count: usize) -> Self {
        let size = data.len() as u64;
        self.manifest.files.push(ViManifestFile {
            path: path.to_string(),
            size,
            hash: compute_hash(data),
            record_count,
        });
        self.manifest.total_records += record_count;
        self.manifest.total_size += size;
        self
    }

    pub fn add_metadata(mut self, key: &str, value: &str) -> Self {
        self.manifest.metadata.insert(key.to_string(), value.to_string());
        self
    }

    pub fn build(self) -> ViManifest {
        self.manifest
    }
}

impl ViManifest {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ViError::internal(format!("Failed to serialize manifest: {}", e)))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| ViError::validation(format!("Invalid manifest JSON: {}", e)))
    }
}

/// Hex blake3 digest.
pub fn compute_hash(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}
