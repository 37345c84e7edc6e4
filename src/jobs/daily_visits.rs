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
use crate::export::ViCsvWriter;
use crate::ingest::ViDatasetReader;
use crate::jobs::{ViJob, ViJobReport};
use crate::operator::execute_operator;
use crate::operators::ViCountByDay;
use crate::storage::ViStorage;

pub const JOB_NAME: &str = "daily_visits";

/// Counts visits per `visit_day` into one CSV file with a header row.
///
/// The destination is recomputed from scratch on every run.
#[derive(Clone, Debug)]
pub struct ViDailyVisitsJob {
    config: ViJobConfig,
    reader: ViDatasetReader,
    writer: ViCsvWriter,
}

impl ViDailyVisitsJob {
    pub fn new(config: ViJobConfig) -> Self {
        Self {
            config,
            reader: ViDatasetReader::new(),
            writer: ViCsvWriter::new(),
        }
    }

    pub fn config(&self) -> &ViJobConfig {
        &self.config
    }

    /// Runs against already opened storage.
    pub async fn run_with(&self, source: &ViStorage, destination: &ViStorage) -> Result<ViJobReport> {
        let dataset = self.reader.read(source).await?;
        let counts = execute_operator(&ViCountByDay::visits(), dataset.batches)?;
        let stats = self.writer.write(destination, &counts, JOB_NAME).await?;

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
impl ViJob for ViDailyVisitsJob {
    fn name(&self) -> &'static str {
        JOB_NAME
    }

    async fn run(&self) -> Result<ViJobReport> {
        self.execute().await.map_err(|e| ViError::job(JOB_NAME, e))
    }
}
