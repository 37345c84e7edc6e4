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

//! # Batch Jobs Module
//!
//! Each job is one `read -> transform -> write` pass from a source dataset
//! to a destination it fully replaces.
//!
//! - **daily_visits**: counts visits per day into a single CSV file
//! - **repartition**: keeps visits on or after a cutoff and rewrites them
//!   partitioned by day as Snappy Parquet
//!
//! Jobs are run through [`execute_job`], which logs the outcome and wraps
//! any failure in [`ViError::Job`] so the caller sees which job failed and
//! the storage or schema error that caused it.

use std::time::Instant;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ViError};

pub mod daily_visits;
pub mod repartition;

pub use daily_visits::ViDailyVisitsJob;
pub use repartition::ViRepartitionJob;

/// Summary of one job run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViJobReport {
    pub job: String,
    pub source: String,
    pub destination: String,
    pub files_read: usize,
    pub rows_read: usize,
    pub rows_written: usize,
    pub files_written: usize,
    pub partitions: usize,
}

/// A batch job that owns its whole lifecycle.
#[async_trait]
pub trait ViJob: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run(&self) -> Result<ViJobReport>;
}

/// Runs a job, logging its outcome and wrapping failures in [`ViError::Job`].
pub async fn execute_job(job: &dyn ViJob) -> Result<ViJobReport> {
    let started = Instant::now();
    log::info!("starting job {}", job.name());

    match job.run().await {
        Ok(report) => {
            log::info!(
                "job {} finished in {:.2?}: {} rows read from {} files, {} rows written to {} files",
                job.name(),
                started.elapsed(),
                report.rows_read,
                report.files_read,
                report.rows_written,
                report.files_written
            );
            Ok(report)
        }
        Err(err) => {
            log::error!("job {} failed: {}", job.name(), err);
            Err(match err {
                ViError::Job { .. } => err,
                other => ViError::job(job.name(), other),
            })
        }
    }
}
