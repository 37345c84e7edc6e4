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

//! # Vista Core Library
//!
//! Batch jobs over site-visit logs and a small sentiment scoring service.
//!
//! ## Module Overview
//!
//! - **record**: Visit column names and Arrow conversions for visits and daily counts
//! - **operator**: Core operator trait and execution logic
//! - **operators**: The cutoff filter and the per-day visit count
//! - **storage**: Object store access for `s3://`, `file://`, `memory://` and local paths
//! - **ingest**: Partitioned Parquet dataset reading
//! - **export**: CSV and day-partitioned Parquet writers with a `_SUCCESS` manifest
//! - **jobs**: The `daily_visits` and `repartition_visits` batch jobs
//! - **service**: The `/predict` sentiment endpoint and its hit counter
//! - **config**: Job and server configuration files
//! - **logging**: Logger installation for the binaries
//!
//! ## Feature Flags
//!
//! - `redis`: Redis-backed prediction counter
//! - `full`: Enables all features
//!
//! ## Quick Start
//!
//! ```rust
//! use vista::{execute_job, ViDailyVisitsJob, ViJobConfig};
//!
//! let config = ViJobConfig::new("data/visits", "data/visit_counts_by_day");
//! let report = execute_job(&ViDailyVisitsJob::new(config)).await?;
//! println!("{} days written", report.rows_written);
//! ```
//!
//! ## Error Handling
//!
//! All operations return `Result<T, ViError>`. Job entry points wrap the
//! underlying storage or schema failure in `ViError::Job`.

pub mod config;
pub mod errors;
pub mod export;
pub mod ingest;
pub mod jobs;
pub mod logging;
pub mod operator;
pub mod operators;
pub mod record;
pub mod service;
pub mod storage;

pub use config::{ViCounterConfig, ViJobConfig, ViServerConfig};
pub use errors::{Result, ViError};
pub use export::{ViCompression, ViCsvWriter, ViManifest, ViPartitionedParquetWriter, ViWriteStats};
pub use ingest::{ViDataset, ViDatasetReader, ViReaderConfig};
pub use jobs::{execute_job, ViDailyVisitsJob, ViJob, ViJobReport, ViRepartitionJob};
pub use logging::{init_logging, ViLogConfig};
pub use operator::{execute_operator, ViOperator};
pub use operators::{ViCountByDay, ViFilterOnOrAfter};
pub use record::{ViDailyCount, ViRecordBatches, ViVisitRecord};
pub use service::{
    build_router, ViHitCounter, ViMemoryCounter, ViPolarityScores, ViRetryPolicy,
    ViSentimentModel, ViServiceState, ViVaderModel,
};
pub use storage::ViStorage;
