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


//! # Shared Test Fixtures
//!
//! Helpers that lay out small visit datasets on the local filesystem the
//! way the upstream exports do: flat Parquet files with a string
//! `visit_day`, or Hive-style `visit_day=YYYY-MM-DD/` directories whose
//! files only carry `visitor_id`.

#![allow(dead_code)]

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, RecordBatch, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use chrono::NaiveDate;
use parquet::arrow::ArrowWriter;
use vista::record::{visit_days, VISITOR_ID, VISIT_DAY};
use vista::{ViDatasetReader, ViStorage};

/// Shorthand for a calendar date.
pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn write_parquet(path: &Path, batch: &RecordBatch) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let file = File::create(path).unwrap();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
    writer.write(batch).unwrap();
    writer.close().unwrap();
}

/// Writes `dir/file` with `visitor_id: Utf8` and `visit_day: Utf8` columns.
pub fn write_flat_visits(dir: &Path, file: &str, rows: &[(Option<&str>, Option<&str>)]) {
    let schema = Arc::new(Schema::new(vec![
        Field::new(VISITOR_ID, DataType::Utf8, true),
        Field::new(VISIT_DAY, DataType::Utf8, true),
    ]));
    let ids: StringArray = rows.iter().map(|(id, _)| *id).collect();
    let days: StringArray = rows.iter().map(|(_, day)| *day).collect();
    let batch = RecordBatch::try_new(
        schema,
        vec![Arc::new(ids) as ArrayRef, Arc::new(days) as ArrayRef],
    )
    .unwrap();
    write_parquet(&dir.join(file), &batch);
}

/// Writes `dir/file` with the given nullable string columns, in order.
pub fn write_string_columns(dir: &Path, file: &str, columns: &[(&str, Vec<Option<&str>>)]) {
    let schema = Arc::new(Schema::new(
        columns
            .iter()
            .map(|(name, _)| Field::new(*name, DataType::Utf8, true))
            .collect::<Vec<_>>(),
    ));
    let arrays = columns
        .iter()
        .map(|(_, values)| Arc::new(values.iter().copied().collect::<StringArray>()) as ArrayRef)
        .collect();
    let batch = RecordBatch::try_new(schema, arrays).unwrap();
    write_parquet(&dir.join(file), &batch);
}

/// Writes `dir/visit_day=<day>/part-00000.parquet` holding only `visitor_id`.
pub fn write_day_partition(dir: &Path, day: &str, ids: &[Option<&str>]) {
    let schema = Arc::new(Schema::new(vec![Field::new(VISITOR_ID, DataType::Utf8, true)]));
    let ids: StringArray = ids.iter().copied().collect();
    let batch = RecordBatch::try_new(schema, vec![Arc::new(ids) as ArrayRef]).unwrap();
    let path = dir
        .join(format!("{}={}", VISIT_DAY, day))
        .join("part-00000.parquet");
    write_parquet(&path, &batch);
}

/// Reads a dataset back as sorted `(visitor_id, visit_day)` rows.
pub async fn read_visits(location: &str) -> Vec<(Option<String>, Option<NaiveDate>)> {
    let storage = ViStorage::open(location).unwrap();
    let dataset = ViDatasetReader::new().read(&storage).await.unwrap();

    let mut rows = Vec::new();
    for batch in &dataset.batches {
        let days = visit_days(batch, VISIT_DAY).unwrap();
        let ids = batch
            .column_by_name(VISITOR_ID)
            .unwrap()
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        for (row, day) in days.into_iter().enumerate() {
            let id = ids.is_valid(row).then(|| ids.value(row).to_string());
            rows.push((id, day));
        }
    }
    rows.sort();
    rows
}

/// Relative paths of every file under `dir`, sorted, `/`-separated.
pub fn list_files(dir: &Path) -> Vec<String> {
    fn walk(root: &Path, dir: &Path, out: &mut Vec<String>) {
        for entry in std::fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(root, &path, out);
            } else {
                let relative = path.strip_prefix(root).unwrap();
                let parts: Vec<String> = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect();
                out.push(parts.join("/"));
            }
        }
    }
    let mut files = Vec::new();
    walk(dir, dir, &mut files);
    files.sort();
    files
}

/// Path as a location string.
pub fn location(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
