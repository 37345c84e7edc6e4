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

use async_trait::async_trait;

use crate::config::ViJobConfig;
use crate::errors::{Result, ViError};
use crate::export::{ViParquetOptions, ViPartitionedParquetWriter};
use crate::ingest::ViDatasetReader;
use crate::jobs::{ViJob, ViJobReport};
use crate::operator::execute_operator;
use crate::operators::ViFilterOnOrAfter;
use crate::record::VISIT_DAY;
use crate::storage::ViStorage;

pub const JOB_NAME: &str = "repartition_visits";

/// Keeps visits on or after the configured cutoff and rewrites them as
/// `visit_day=YYYY-MM-DD/part-00000.snappy.parquet`.
///
/// No columns are added, joined or deduplicated; the destination is replaced.
#[derive(Clone, Debug)]
pub struct ViRepartitionJob {
    config: ViJobConfig,
    reader: ViDatasetReader,
}

impl ViRepartitionJob {
    pub fn new(config: ViJobConfig) -> Self {
        Self {
            config,
            reader: ViDatasetReader::new(),
        }
    }

    pub fn config(&self) -> &ViJobConfig {
        &self.config
    }

    fn filter(&self) -> Result<ViFilterOnOrAfter> {
        let cutoff = self
            .config
            .cutoff
            .ok_or_else(|| ViError::validation("repartition requires a cutoff date"))?;
        Ok(ViFilterOnOrAfter::visit_day(cutoff))
    }

    fn writer(&self) -> ViPartitionedParquetWriter {
        ViPartitionedParquetWriter::new().with_options(ViParquetOptions {
            compression: self.config.compression,
            partition_column: VISIT_DAY.to_string(),
        })
    }

    /// Runs against already opened storage.
    pub async fn run_with(&self, source: &ViStorage, destination: &ViStorage) -> Result<ViJobReport> {
        let filter = self.filter()?;
        let dataset = self.reader.read(source).await?;
        log::info!(
            "keeping visits on or after {} from {}",
            filter.cutoff(),
            source.location()
        );
        let kept = execute_operator(&filter, dataset.batches)?;
        let stats = self.writer().write(destination, &kept, JOB_NAME).await?;

        Ok(ViJobReport {
            job: JOB_NAME.to_string(),
            source: source.location().to_string(),
            destination: destination.location().to_string(),
            files_read: dataset.files_read,
            rows_read: dataset.rows_read,
            rows_written: stats.records_written,
            files_written: stats.files_created,
            partitions: stats.partitions,
        })
    }

    async fn execute(&self) -> Result<ViJobReport> {
        self.config.validate()?;
        let source = ViStorage::open(&self.config.source)?;
        let destination = ViStorage::create(&self.config.destination)?;
        self.run_with(&source, &destination).await
    }
}

#[async_trait]
impl ViJob for ViRepartitionJob {
    fn name(&self) -> &'static str {
        JOB_NAME
    }

    async fn run(&self) -> Result<ViJobReport> {
        self.execute().await.map_err(|e| ViError::job(JOB_NAME, e))
    }
}
