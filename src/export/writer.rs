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

//! # Dataset Writer Module
//!
//! Writers encode Arrow batches into files and commit them to a dataset
//! location with overwrite semantics:
//!
//! 1. every existing object under the destination is deleted,
//! 2. the data files are written,
//! 3. a `_SUCCESS` marker holding a JSON manifest is written last.
//!
//! A reader that finds `_SUCCESS` therefore sees a complete dataset.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use arrow::array::{BooleanArray, RecordBatch};
use arrow::compute::filter_record_batch;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use chrono::NaiveDate;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, GzipLevel, ZstdLevel};
use parquet::file::properties::WriterProperties;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ViError};
use crate::export::manifest::{ViManifestBuilder, SUCCESS_MARKER};
use crate::ingest::partition::day_partition_dir;
use crate::record::{conform_batch, unify_schemas, visit_days, VISIT_DAY};
use crate::storage::ViStorage;

/// Parquet compression codecs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViCompression {
    #[default]
    Snappy,
    Zstd,
    Gzip,
    None,
}

impl ViCompression {
    fn codec(self) -> Compression {
        match self {
            ViCompression::Snappy => Compression::SNAPPY,
            ViCompression::Zstd => Compression::ZSTD(ZstdLevel::default()),
            ViCompression::Gzip => Compression::GZIP(GzipLevel::default()),
            ViCompression::None => Compression::UNCOMPRESSED,
        }
    }

    /// File name infix, e.g. `part-00000.snappy.parquet`.
    fn file_suffix(self) -> &'static str {
        match self {
            ViCompression::Snappy => ".snappy.parquet",
            ViCompression::Zstd => ".zstd.parquet",
            ViCompression::Gzip => ".gz.parquet",
            ViCompression::None => ".parquet",
        }
    }
}

impl fmt::Display for ViCompression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViCompression::Snappy => "snappy",
            ViCompression::Zstd => "zstd",
            ViCompression::Gzip => "gzip",
            ViCompression::None => "none",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for ViCompression {
    type Err = ViError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "snappy" => Ok(ViCompression::Snappy),
            "zstd" => Ok(ViCompression::Zstd),
            "gzip" => Ok(ViCompression::Gzip),
            "none" | "uncompressed" => Ok(ViCompression::None),
            other => Err(ViError::validation(format!(
                "unknown compression '{}', expected snappy, zstd, gzip or none",
                other
            ))),
        }
    }
}

/// Statistics about one committed write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViWriteStats {
    pub records_written: usize,
    pub bytes_written: u64,
    pub files_created: usize,
    pub partitions: usize,
}

/// An encoded file waiting to be committed.
struct ViPendingFile {
    path: String,
    data: Vec<u8>,
    records: usize,
}

/// Replaces everything under `storage` with `files` and a `_SUCCESS` manifest.
async fn commit(
    storage: &ViStorage,
    files: Vec<ViPendingFile>,
    job: &str,
    partitions: usize,
) -> Result<ViWriteStats> {
    storage.clear().await?;

    let mut stats = ViWriteStats {
        partitions,
        ..ViWriteStats::default()
    };
    let mut manifest = ViManifestBuilder::new().add_metadata("job", job);

    for file in files {
        manifest = manifest.add_file(&file.path, &file.data, file.records);
        stats.bytes_written += storage.put(&file.path, file.data).await?;
        stats.records_written += file.records;
        stats.files_created += 1;
    }

    let marker = manifest.build().to_json()?;
    storage.put(SUCCESS_MARKER, marker.into_bytes()).await?;

    log::info!(
        "wrote {} records in {} files to {}",
        stats.records_written,
        stats.files_created,
        storage.location()
    );
    Ok(stats)
}

#[derive(Clone, Debug)]
pub struct ViCsvOptions {
    pub delimiter: u8,
    pub header: bool,
    pub file_name: String,
}

impl Default for ViCsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            header: true,
            file_name: "part-00000.csv".to_string(),
        }
    }
}

/// Writes all batches into a single CSV file.
#[derive(Clone, Debug, Default)]
pub struct ViCsvWriter {
    options: ViCsvOptions,
}

impl ViCsvWriter {
    pub fn new() -> Self {
        Self {
            options: ViCsvOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ViCsvOptions) -> Self {
        self.options = options;
        self
    }

    /// Encodes batches as CSV under their merged header.
    pub fn encode(&self, batches: &[RecordBatch]) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.options.delimiter)
            .has_headers(false)
            .from_writer(Vec::new());

        let schema = unify_schemas(batches)?;
        if self.options.header && !batches.is_empty() {
            writer.write_record(schema.fields().iter().map(|f| f.name().as_str()))?;
        }

        let format = FormatOptions::default();
        for batch in batches {
            let batch = conform_batch(batch, &schema)?;
            let formatters = batch
                .columns()
                .iter()
                .map(|column| ArrayFormatter::try_new(column.as_ref(), &format))
                .collect::<std::result::Result<Vec<_>, _>>()?;

            for row in 0..batch.num_rows() {
                writer.write_record(formatters.iter().map(|f| f.value(row).to_string()))?;
            }
        }

        writer
            .into_inner()
            .map_err(|e| ViError::internal(format!("CSV flush error: {}", e)))
    }

    /// Replaces the contents of `storage` with one CSV file.
    pub async fn write(&self, storage: &ViStorage, batches: &[RecordBatch], job: &str) -> Result<ViWriteStats> {
        let data = self.encode(batches)?;
        let records = batches.iter().map(|b| b.num_rows()).sum();
        let file = ViPendingFile {
            path: self.options.file_name.clone(),
            data,
            records,
        };
        commit(storage, vec![file], job, 0).await
    }
}

#[derive(Clone, Debug)]
pub struct ViParquetOptions {
    pub compression: ViCompression,
    /// Day column used for `key=value` directories; dropped from file contents.
    pub partition_column: String,
}

impl Default for ViParquetOptions {
    fn default() -> Self {
        Self {
            compression: ViCompression::Snappy,
            partition_column: VISIT_DAY.to_string(),
        }
    }
}

/// Writes one Parquet file per distinct day under `column=YYYY-MM-DD/`.
#[derive(Clone, Debug, Default)]
pub struct ViPartitionedParquetWriter {
    options: ViParquetOptions,
}

impl ViPartitionedParquetWriter {
    pub fn new() -> Self {
        Self {
            options: ViParquetOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ViParquetOptions) -> Self {
        self.options = options;
        self
    }

    /// Splits rows by day and removes the partition column from each slice.
    pub fn partition(&self, batches: &[RecordBatch]) -> Result<BTreeMap<Option<NaiveDate>, Vec<RecordBatch>>> {
        let column = &self.options.partition_column;
        let mut partitions: BTreeMap<Option<NaiveDate>, Vec<RecordBatch>> = BTreeMap::new();

        for batch in batches {
            let days = visit_days(batch, column)?;
            let key_index = batch.schema().index_of(column)?;
            let kept: Vec<usize> = (0..batch.num_columns()).filter(|i| *i != key_index).collect();

            let distinct: BTreeSet<Option<NaiveDate>> = days.iter().copied().collect();
            for day in distinct {
                let mask: BooleanArray = days.iter().map(|d| Some(*d == day)).collect();
                let slice = filter_record_batch(batch, &mask)?.project(&kept)?;
                partitions.entry(day).or_default().push(slice);
            }
        }
        Ok(partitions)
    }

    /// Encodes batches into one Parquet file, aligning their columns by name.
    pub fn encode(&self, batches: &[RecordBatch]) -> Result<Vec<u8>> {
        if batches.is_empty() {
            return Err(ViError::internal("cannot encode an empty partition"));
        }
        let schema = unify_schemas(batches)?;
        let props = WriterProperties::builder()
            .set_compression(self.options.compression.codec())
            .build();

        let mut writer = ArrowWriter::try_new(Vec::new(), schema.clone(), Some(props))?;
        for batch in batches {
            writer.write(&conform_batch(batch, &schema)?)?;
        }
        Ok(writer.into_inner()?)
    }

    /// Replaces the contents of `storage` with the partitioned dataset.
    pub async fn write(&self, storage: &ViStorage, batches: &[RecordBatch], job: &str) -> Result<ViWriteStats> {
        let partitions = self.partition(batches)?;
        let count = partitions.len();
        // Every partition file gets the same columns, whichever files fed it.
        let schema = unify_schemas(partitions.values().flatten())?;

        let mut files = Vec::with_capacity(count);
        for (day, slices) in partitions {
            let slices = slices
                .iter()
                .map(|slice| conform_batch(slice, &schema))
                .collect::<Result<Vec<_>>>()?;
            let path = format!(
                "{}/part-00000{}",
                day_partition_dir(&self.options.partition_column, day),
                self.options.compression.file_suffix()
            );
            files.push(ViPendingFile {
                path,
                data: self.encode(&slices)?,
                records: slices.iter().map(|b| b.num_rows()).sum(),
            });
        }

        commit(storage, files, job, count).await
    }
}
