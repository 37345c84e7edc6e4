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

//! # Data Export Module
//!
//! Writing job output back to object storage.
//!
//! ## Module Components
//!
//! - **Writer** ([writer.rs](writer/index.html)): Single-file CSV and day-partitioned Parquet
//! - **Manifest** ([manifest.rs](manifest/index.html)): The JSON body of the `_SUCCESS` marker
//!
//! ## Usage
//!
//! ```rust
//! use vista::export::ViCsvWriter;
//!
//! let stats = ViCsvWriter::new().write(&destination, &batches, "daily_visits").await?;
//! ```

pub mod manifest;
pub mod writer;

pub use manifest::{compute_hash, ViManifest, ViManifestBuilder, ViManifestFile, SUCCESS_MARKER};
pub use writer::{
    ViCompression, ViCsvOptions, ViCsvWriter, ViParquetOptions, ViPartitionedParquetWriter,
    ViWriteStats,
};
