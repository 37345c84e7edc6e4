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

//! # Data Ingestion Module
//!
//! Reading Parquet datasets from object storage.
//!
//! ## Module Components
//!
//! - **Format Detection** ([format.rs](format/index.html)): Data files vs. bookkeeping objects
//! - **Partitions** ([partition.rs](partition/index.html)): Hive-style `key=value` directories
//! - **Reader** ([reader.rs](reader/index.html)): Lists, downloads and decodes a dataset
//!
//! ## Usage
//!
//! ```rust
//! use vista::ingest::ViDatasetReader;
//! use vista::storage::ViStorage;
//!
//! let storage = ViStorage::open("s3://bucket/visits")?;
//! let dataset = ViDatasetReader::new().read(&storage).await?;
//! ```

pub mod format;
pub mod partition;
pub mod reader;

pub use format::{ViDataFormat, ViFormatDetector};
pub use partition::{ViPartitionValue, HIVE_DEFAULT_PARTITION};
pub use reader::{ViDataset, ViDatasetReader, ViReaderConfig};
