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


//! # Vista Operator Tests - Aggregate
//!
//! Tests for the `aggregate.count_by_day` visit count.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test aggregate
//! ```

use std::sync::Arc;

use arrow::array::{ArrayRef, RecordBatch, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use chrono::NaiveDate;
use vista::record::{NUM_VISITS, VISIT_DAY};
use vista::{execute_operator, ViCountByDay, ViDailyCount, ViError, ViOperator, ViVisitRecord};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn counts(batches: Vec<RecordBatch>) -> Vec<ViDailyCount> {
    let out = ViCountByDay::visits().apply(batches).unwrap();
    assert_eq!(out.len(), 1);
    ViDailyCount::from_record_batch(&out[0]).unwrap()
}

/// Tests that every distinct day appears once with its visit count.
#[test]
fn test_count_by_day_groups_across_batches() {
    let first = ViVisitRecord::to_record_batch(&[
        ViVisitRecord::new(Some("a"), Some(day(2020, 8, 2))),
        ViVisitRecord::new(Some("b"), Some(day(2020, 8, 1))),
    ])
    .unwrap();
    let second = ViVisitRecord::to_record_batch(&[
        ViVisitRecord::new(Some("a"), Some(day(2020, 8, 2))),
        ViVisitRecord::new(Some("c"), Some(day(2020, 8, 2))),
    ])
    .unwrap();

    assert_eq!(
        counts(vec![first, second]),
        vec![
            ViDailyCount { visit_day: Some(day(2020, 8, 1)), num_visits: 1 },
            ViDailyCount { visit_day: Some(day(2020, 8, 2)), num_visits: 3 },
        ]
    );
}

/// Tests that visits without a visitor id do not count but keep their day.
#[test]
fn test_count_by_day_skips_null_visitors() {
    let batch = ViVisitRecord::to_record_batch(&[
        ViVisitRecord::new(None, Some(day(2020, 8, 1))),
        ViVisitRecord::new(None, Some(day(2020, 8, 3))),
        ViVisitRecord::new(Some("a"), Some(day(2020, 8, 3))),
    ])
    .unwrap();

    assert_eq!(
        counts(vec![batch]),
        vec![
            ViDailyCount { visit_day: Some(day(2020, 8, 1)), num_visits: 0 },
            ViDailyCount { visit_day: Some(day(2020, 8, 3)), num_visits: 1 },
        ]
    );
}

/// Tests that string days are grouped the same as Date32 days.
#[test]
fn test_count_by_day_on_string_days() {
    let schema = Arc::new(Schema::new(vec![
        Field::new("visitor_id", DataType::Utf8, true),
        Field::new(VISIT_DAY, DataType::Utf8, true),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(StringArray::from(vec!["a", "b", "c"])) as ArrayRef,
            Arc::new(StringArray::from(vec![Some("2020-08-01"), None, Some("2020-08-01")])) as ArrayRef,
        ],
    )
    .unwrap();

    assert_eq!(
        counts(vec![batch]),
        vec![
            ViDailyCount { visit_day: None, num_visits: 1 },
            ViDailyCount { visit_day: Some(day(2020, 8, 1)), num_visits: 2 },
        ]
    );
}

/// Tests the output schema: nullable Date32 day, non-null Int64 count.
#[test]
fn test_count_by_day_output_schema() {
    let out = ViCountByDay::visits().apply(Vec::new()).unwrap();
    let schema = out[0].schema();
    assert_eq!(out[0].num_rows(), 0);
    assert_eq!(schema.field(0).name(), VISIT_DAY);
    assert_eq!(schema.field(0).data_type(), &DataType::Date32);
    assert_eq!(schema.field(1).name(), NUM_VISITS);
    assert_eq!(schema.field(1).data_type(), &DataType::Int64);
    assert!(!schema.field(1).is_nullable());
}

/// Tests that a malformed day string fails through the operator.
#[test]
fn test_count_by_day_rejects_bad_days() {
    let schema = Arc::new(Schema::new(vec![
        Field::new("visitor_id", DataType::Utf8, true),
        Field::new(VISIT_DAY, DataType::Utf8, true),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(StringArray::from(vec!["a"])) as ArrayRef,
            Arc::new(StringArray::from(vec!["08/01/2020"])) as ArrayRef,
        ],
    )
    .unwrap();

    let err = execute_operator(&ViCountByDay::visits(), vec![batch]).unwrap_err();
    assert!(matches!(err, ViError::Operator { ref operator, .. } if operator == "aggregate.count_by_day"));
}
