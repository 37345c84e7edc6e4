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

//! Hive-style partition directories (`key=value/`).

use std::sync::Arc;

use arrow::array::{new_null_array, ArrayRef, Date32Array, RecordBatch, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use chrono::NaiveDate;

use crate::errors::Result;
use crate::record::{date_to_days, format_day, parse_day};

/// Directory value that stands for a null partition key.
pub const HIVE_DEFAULT_PARTITION: &str = "__HIVE_DEFAULT_PARTITION__";

/// One `key=value` directory segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViPartitionValue {
    pub key: String,
    pub value: Option<String>,
}

impl ViPartitionValue {
    /// Parses a directory segment. Returns `None` for plain directories.
    pub fn parse(segment: &str) -> Option<Self> {
        let (key, value) = segment.split_once('=')?;
        if key.is_empty() {
            return None;
        }
        let value = match value {
            "" | HIVE_DEFAULT_PARTITION => None,
            other => Some(other.to_string()),
        };
        Some(Self {
            key: key.to_string(),
            value,
        })
    }

    /// Builds a constant column of `rows` values for this partition.
    ///
    /// Date-shaped values become `Date32`, anything else `Utf8`; a null
    /// partition becomes an all-null `Date32` column.
    pub fn to_column(&self, rows: usize) -> (Field, ArrayRef) {
        match self.value.as_deref() {
            None => (
                Field::new(&self.key, DataType::Date32, true),
                new_null_array(&DataType::Date32, rows),
            ),
            Some(value) => match parse_day(value) {
                Ok(day) => (
                    Field::new(&self.key, DataType::Date32, true),
                    Arc::new(Date32Array::from(vec![date_to_days(day); rows])) as ArrayRef,
                ),
                Err(_) => (
                    Field::new(&self.key, DataType::Utf8, true),
                    Arc::new(StringArray::from(vec![value; rows])) as ArrayRef,
                ),
            },
        }
    }
}

/// Collects partition values from the directory segments of an object path.
///
/// `parts` is the object path relative to the dataset root; the final
/// segment is the file name and is ignored.
pub fn partition_values(parts: &[String]) -> Vec<ViPartitionValue> {
    let dirs = parts.len().saturating_sub(1);
    parts[..dirs]
        .iter()
        .filter_map(|segment| ViPartitionValue::parse(segment))
        .collect()
}

/// Directory name for a day partition.
pub fn day_partition_dir(key: &str, day: Option<NaiveDate>) -> String {
    match day {
        Some(day) => format!("{}={}", key, format_day(day)),
        None => format!("{}={}", key, HIVE_DEFAULT_PARTITION),
    }
}

/// Appends partition columns the file does not already carry.
pub fn attach_partition_columns(
    batch: RecordBatch,
    partitions: &[ViPartitionValue],
) -> Result<RecordBatch> {
    let missing: Vec<&ViPartitionValue> = partitions
        .iter()
        .filter(|p| batch.schema().column_with_name(&p.key).is_none())
        .collect();
    if missing.is_empty() {
        return Ok(batch);
    }

    let schema = batch.schema();
    let mut fields: Vec<Field> = schema.fields().iter().map(|f| f.as_ref().clone()).collect();
    let mut columns: Vec<ArrayRef> = batch.columns().to_vec();
    for partition in missing {
        let (field, column) = partition.to_column(batch.num_rows());
        fields.push(field);
        columns.push(column);
    }

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}
