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

/// Magic bytes at both ends of every Parquet file.
const PARQUET_MAGIC: &[u8] = b"PAR1";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViDataFormat {
    Parquet,
    /// Bookkeeping objects such as `_SUCCESS`, `.crc` files or `_metadata`.
    Hidden,
    Unknown,
}

/// Classifies dataset objects by name, falling back to content sniffing.
#[derive(Clone, Debug, Default)]
pub struct ViFormatDetector;

impl ViFormatDetector {
    pub fn new() -> Self {
        Self
    }

    /// Detects the format from an object's file name.
    ///
    /// Names starting with `_` or `.` are hidden, as in Hive-style layouts.
    pub fn detect_from_name(&self, name: &str) -> ViDataFormat {
        if name.starts_with('_') || name.starts_with('.') {
            return ViDataFormat::Hidden;
        }

        let extension = name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("parquet") | Some("parq") => ViDataFormat::Parquet,
            _ => ViDataFormat::Unknown,
        }
    }

    /// True when a directory on the object's path is hidden, such as
    /// `_temporary/` or `.spark-staging/`. Partition segments (`key=value`)
    /// are never hidden.
    pub fn in_hidden_dir(&self, parts: &[String]) -> bool {
        let dirs = parts.len().saturating_sub(1);
        parts[..dirs].iter().any(|segment| {
            (segment.starts_with('_') || segment.starts_with('.')) && !segment.contains('=')
        })
    }

    /// Detects Parquet from the leading and trailing magic bytes.
    pub fn detect_from_content(&self, content: &[u8]) -> ViDataFormat {
        if content.len() >= 2 * PARQUET_MAGIC.len()
            && content.starts_with(PARQUET_MAGIC)
            && content.ends_with(PARQUET_MAGIC)
        {
            ViDataFormat::Parquet
        } else {
            ViDataFormat::Unknown
        }
    }
}
