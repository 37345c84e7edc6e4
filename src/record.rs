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

//! # Vista Record Module
//!
//! Visit data flows through Vista as Arrow [`RecordBatch`]es so that columns
//! the jobs do not know about are carried through untouched. This module
//! holds the column names the jobs rely on, typed row views used by fixtures
//! and reports, and the helpers that read a `visit_day` column regardless of
//! how it was stored.
//!
//! ## Accepted `visit_day` encodings
//!
//! - `Date32` (what partition discovery produces)
//! - `Utf8` / `LargeUtf8` holding `YYYY-MM-DD`
//!
//! Nulls are preserved as `None`. A string that is not a date is a schema
//! error rather than a silently dropped row.

use std::collections::HashMap;
use std::sync::Arc;

use arrow::array::{
    new_null_array, Array, ArrayRef, Date32Array, Int64Array, LargeStringArray, RecordBatch,
    RecordBatchOptions, StringArray,
};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ViError};

/// Identifier column of a visit record.
pub const VISITOR_ID: &str = "visitor_id";

/// Date column visits are grouped and partitioned by.
pub const VISIT_DAY: &str = "visit_day";

/// Count column produced by the daily aggregation.
pub const NUM_VISITS: &str = "num_visits";

/// Format used for visit days in strings, CSV cells and partition directories.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Convenience alias for working on batches of Arrow data.
pub type ViRecordBatches = Vec<RecordBatch>;

/// One logged visitor event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViVisitRecord {
    pub visitor_id: Option<String>,
    pub visit_day: Option<NaiveDate>,
}

impl ViVisitRecord {
    /// Constructs a visit record.
    pub fn new(visitor_id: Option<&str>, visit_day: Option<NaiveDate>) -> Self {
        Self {
            visitor_id: visitor_id.map(str::to_string),
            visit_day,
        }
    }

    /// Builds a two-column batch (`visitor_id: Utf8`, `visit_day: Date32`).
    pub fn to_record_batch(records: &[ViVisitRecord]) -> Result<RecordBatch> {
        let schema = Arc::new(Schema::new(vec![
            Field::new(VISITOR_ID, DataType::Utf8, true),
            Field::new(VISIT_DAY, DataType::Date32, true),
        ]));
        let ids: StringArray = records.iter().map(|r| r.visitor_id.as_deref()).collect();
        let days: Date32Array = records
            .iter()
            .map(|r| r.visit_day.map(date_to_days))
            .collect();
        Ok(RecordBatch::try_new(
            schema,
            vec![Arc::new(ids) as ArrayRef, Arc::new(days) as ArrayRef],
        )?)
    }
}

/// One row of the daily aggregation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViDailyCount {
    pub visit_day: Option<NaiveDate>,
    pub num_visits: i64,
}

impl ViDailyCount {
    /// Reads `(visit_day, num_visits)` rows back out of an aggregation batch.
    pub fn from_record_batch(batch: &RecordBatch) -> Result<Vec<ViDailyCount>> {
        let days = visit_days(batch, VISIT_DAY)?;
        let counts = batch
            .column_by_name(NUM_VISITS)
            .and_then(|c| c.as_any().downcast_ref::<Int64Array>())
            .ok_or_else(|| ViError::schema(format!("missing Int64 column '{}'", NUM_VISITS)))?;

        Ok(days
            .into_iter()
            .enumerate()
            .map(|(row, visit_day)| ViDailyCount {
                visit_day,
                num_visits: counts.value(row),
            })
            .collect())
    }
}

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default()
}

/// Days since the Unix epoch, the `Date32` representation.
pub fn date_to_days(date: NaiveDate) -> i32 {
    date.signed_duration_since(epoch()).num_days() as i32
}

/// Inverse of [`date_to_days`].
pub fn days_to_date(days: i32) -> Option<NaiveDate> {
    epoch().checked_add_signed(TimeDelta::days(days as i64))
}

/// Parses a `YYYY-MM-DD` visit day.
pub fn parse_day(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DAY_FORMAT)
        .map_err(|e| ViError::schema(format!("'{}' is not a visit day: {}", value, e)))
}

/// Formats a visit day as `YYYY-MM-DD`.
pub fn format_day(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

/// Extracts the named day column of `batch` as dates.
pub fn visit_days(batch: &RecordBatch, column: &str) -> Result<Vec<Option<NaiveDate>>> {
    let array = batch
        .column_by_name(column)
        .ok_or_else(|| ViError::schema(format!("missing column '{}'", column)))?;
    day_values(array.as_ref(), column)
}

fn day_values(array: &dyn Array, column: &str) -> Result<Vec<Option<NaiveDate>>> {
    match array.data_type() {
        DataType::Date32 => {
            let days = array
                .as_any()
                .downcast_ref::<Date32Array>()
                .ok_or_else(|| ViError::internal("Date32 column did not downcast"))?;
            days.iter()
                .map(|value| match value {
                    Some(d) => days_to_date(d)
                        .map(Some)
                        .ok_or_else(|| ViError::schema(format!("day {} out of range", d))),
                    None => Ok(None),
                })
                .collect()
        }
        DataType::Utf8 => {
            let strings = array
                .as_any()
                .downcast_ref::<StringArray>()
                .ok_or_else(|| ViError::internal("Utf8 column did not downcast"))?;
            strings.iter().map(|v| v.map(parse_day).transpose()).collect()
        }
        DataType::LargeUtf8 => {
            let strings = array
                .as_any()
                .downcast_ref::<LargeStringArray>()
                .ok_or_else(|| ViError::internal("LargeUtf8 column did not downcast"))?;
            strings.iter().map(|v| v.map(parse_day).transpose()).collect()
        }
        other => Err(ViError::schema(format!(
            "column '{}' has type {} and cannot hold visit days",
            column, other
        ))),
    }
}

/// Merges the schemas of batches read from different files.
///
/// Columns are matched by name, in first-seen order. A column missing from
/// some batch becomes nullable; the same name with incompatible types is a
/// schema error.
pub fn unify_schemas<'a>(batches: impl IntoIterator<Item = &'a RecordBatch>) -> Result<SchemaRef> {
    let schemas: Vec<SchemaRef> = batches.into_iter().map(|b| b.schema()).collect();
    let bare = schemas.iter().map(|schema| {
        Schema::new(
            schema
                .fields()
                .iter()
                .map(|f| f.as_ref().clone().with_metadata(HashMap::new()))
                .collect::<Vec<_>>(),
        )
    });
    let merged = Schema::try_merge(bare)
        .map_err(|e| ViError::schema(format!("incompatible source schemas: {}", e)))?;

    let fields: Vec<Field> = merged
        .fields()
        .iter()
        .map(|field| {
            let everywhere = schemas
                .iter()
                .all(|s| s.column_with_name(field.name()).is_some());
            let nullable = field.is_nullable() || !everywhere;
            field.as_ref().clone().with_nullable(nullable)
        })
        .collect();
    Ok(Arc::new(Schema::new(fields)))
}

/// Rebuilds `batch` with the columns of `schema`, by name.
///
/// Missing columns are filled with nulls and differing types are cast.
pub fn conform_batch(batch: &RecordBatch, schema: &SchemaRef) -> Result<RecordBatch> {
    if batch.schema() == *schema {
        return Ok(batch.clone());
    }
    let rows = batch.num_rows();
    let columns = schema
        .fields()
        .iter()
        .map(|field| match batch.column_by_name(field.name()) {
            Some(column) if column.data_type() == field.data_type() => Ok(column.clone()),
            Some(column) => Ok(cast(column, field.data_type())?),
            None => Ok(new_null_array(field.data_type(), rows)),
        })
        .collect::<Result<Vec<ArrayRef>>>()?;
    let options = RecordBatchOptions::new().with_row_count(Some(rows));
    Ok(RecordBatch::try_new_with_options(schema.clone(), columns, &options)?)
}
