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

use bytes::Bytes;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::errors::{Result, ViError};
use crate::ingest::format::{ViDataFormat, ViFormatDetector};
use crate::ingest::partition::{attach_partition_columns, partition_values, ViPartitionValue};
use crate::record::ViRecordBatches;
use crate::storage::ViStorage;

#[derive(Clone, Debug)]
pub struct ViReaderConfig {
    /// Rows per decoded Arrow batch.
    pub batch_size: usize,
    /// Re-attach `key=value` directory segments as columns.
    pub discover_partitions: bool,
    /// Sniff objects without a known extension for Parquet magic bytes.
    pub sniff_unknown: bool,
}

impl Default for ViReaderConfig {
    fn default() -> Self {
        Self {
            batch_size: 8192,
            discover_partitions: true,
            sniff_unknown: true,
        }
    }
}

/// Everything read from one dataset location.
#[derive(Clone, Debug, Default)]
pub struct ViDataset {
    pub batches: ViRecordBatches,
    pub files_read: usize,
    pub rows_read: usize,
}

/// Reads every Parquet file under a dataset location.
#[derive(Clone, Debug, Default)]
pub struct ViDatasetReader {
    config: ViReaderConfig,
    detector: ViFormatDetector,
}

impl ViDatasetReader {
    pub fn new() -> Self {
        Self {
            config: ViReaderConfig::default(),
            detector: ViFormatDetector::new(),
        }
    }

    pub fn with_config(mut self, config: ViReaderConfig) -> Self {
        self.config = config;
        self
    }

    /// Lists, downloads and decodes the dataset at `storage`.
    ///
    /// Fails when the location holds no data files, since there is no schema
    /// to infer from.
    pub async fn read(&self, storage: &ViStorage) -> Result<ViDataset> {
        let objects = storage.list().await?;
        let mut dataset = ViDataset::default();

        for object in objects {
            let Some(parts) = storage.relative_parts(&object.location) else {
                continue;
            };
            if self.detector.in_hidden_dir(&parts) {
                log::debug!("skipping {} (hidden directory)", object.location);
                continue;
            }
            let name = parts.last().map(String::as_str).unwrap_or_default();

            let data = match self.detector.detect_from_name(name) {
                ViDataFormat::Hidden => continue,
                ViDataFormat::Parquet => storage.get(&object.location).await?,
                ViDataFormat::Unknown => {
                    if !self.config.sniff_unknown {
                        log::debug!("skipping {} (not a parquet file)", object.location);
                        continue;
                    }
                    let data = storage.get(&object.location).await?;
                    if self.detector.detect_from_content(&data) != ViDataFormat::Parquet {
                        log::warn!("skipping {} (not a parquet file)", object.location);
                        continue;
                    }
                    data
                }
            };

            let partitions = if self.config.discover_partitions {
                partition_values(&parts)
            } else {
                Vec::new()
            };

            let batches = self
                .decode(data, &partitions)
                .map_err(|e| ViError::schema(format!("{}: {}", object.location, e)))?;
            dataset.rows_read += batches.iter().map(|b| b.num_rows()).sum::<usize>();
            dataset.files_read += 1;
            dataset.batches.extend(batches);
        }

        if dataset.files_read == 0 {
            return Err(ViError::storage(
                storage.location(),
                "no data files found",
            ));
        }

        log::info!(
            "read {} rows from {} files under {}",
            dataset.rows_read,
            dataset.files_read,
            storage.location()
        );
        Ok(dataset)
    }

    fn decode(&self, data: Bytes, partitions: &[ViPartitionValue]) -> Result<ViRecordBatches> {
        let reader = ParquetRecordBatchReaderBuilder::try_new(data)?
            .with_batch_size(self.config.batch_size)
            .build()?;

        let mut batches = Vec::new();
        for batch in reader {
            let batch = batch?;
            if batch.num_rows() == 0 {
                continue;
            }
            batches.push(attach_partition_columns(batch, partitions)?);
        }
        Ok(batches)
    }
}
