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

use std::collections::BTreeMap;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Date32Array, Int64Array, RecordBatch};
use arrow::datatypes::{DataType, Field, Schema};
use chrono::NaiveDate;

use crate::errors::{Result, ViError};
use crate::operator::ViOperator;
use crate::record::{date_to_days, visit_days, ViRecordBatches, NUM_VISITS, VISITOR_ID, VISIT_DAY};

/// Groups rows by a day column and counts non-null values of another column.
///
/// Equivalent to `SELECT day, COUNT(counted) FROM input GROUP BY day`. The
/// output is a single batch ordered by day, with the null day (if any) first,
/// so the same input always produces the same bytes downstream.
#[derive(Debug)]
pub struct ViCountByDay {
    key: String,
    counted: String,
    output: String,
}

impl ViCountByDay {
    pub fn new(key: impl Into<String>, counted: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            counted: counted.into(),
            output: output.into(),
        }
    }

    /// `visit_day, COUNT(visitor_id) AS num_visits`.
    pub fn visits() -> Self {
        Self::new(VISIT_DAY, VISITOR_ID, NUM_VISITS)
    }

    fn tally(&self, batches: &[RecordBatch]) -> Result<BTreeMap<Option<NaiveDate>, i64>> {
        let mut counts = BTreeMap::new();
        for batch in batches {
            let days = visit_days(batch, &self.key)?;
            let counted = batch.column_by_name(&self.counted).ok_or_else(|| {
                ViError::schema(format!("missing column '{}'", self.counted))
            })?;
            for (row, day) in days.into_iter().enumerate() {
                let entry = counts.entry(day).or_insert(0i64);
                if counted.is_valid(row) {
                    *entry += 1;
                }
            }
        }
        Ok(counts)
    }
}

impl ViOperator for ViCountByDay {
    fn name(&self) -> &'static str {
        "aggregate.count_by_day"
    }

    fn apply(&self, batches: ViRecordBatches) -> Result<ViRecordBatches> {
        let counts = self.tally(&batches)?;

        let schema = Arc::new(Schema::new(vec![
            Field::new(&self.key, DataType::Date32, true),
            Field::new(&self.output, DataType::Int64, false),
        ]));
        let days: Date32Array = counts.keys().map(|day| day.map(date_to_days)).collect();
        let totals = Int64Array::from(counts.values().copied().collect::<Vec<_>>());

        let batch = RecordBatch::try_new(
            schema,
            vec![Arc::new(days) as ArrayRef, Arc::new(totals) as ArrayRef],
        )?;
        Ok(vec![batch])
    }
}
