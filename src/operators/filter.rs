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

use arrow::array::BooleanArray;
use arrow::compute::filter_record_batch;
use chrono::NaiveDate;

use crate::errors::Result;
use crate::operator::ViOperator;
use crate::record::{visit_days, ViRecordBatches, VISIT_DAY};

/// Keeps rows whose day column is on or after a cutoff date.
///
/// Rows with a null day never pass, matching SQL comparison semantics
/// (`NULL >= '2020-08-01'` is not true). Batches left empty are dropped.
#[derive(Debug)]
pub struct ViFilterOnOrAfter {
    column: String,
    cutoff: NaiveDate,
}

impl ViFilterOnOrAfter {
    /// Creates a filter on an arbitrary day column.
    pub fn new(column: impl Into<String>, cutoff: NaiveDate) -> Self {
        Self {
            column: column.into(),
            cutoff,
        }
    }

    /// Creates a filter on `visit_day`.
    pub fn visit_day(cutoff: NaiveDate) -> Self {
        Self::new(VISIT_DAY, cutoff)
    }

    pub fn cutoff(&self) -> NaiveDate {
        self.cutoff
    }
}

impl ViOperator for ViFilterOnOrAfter {
    fn name(&self) -> &'static str {
        "filter.on_or_after"
    }

    fn apply(&self, batches: ViRecordBatches) -> Result<ViRecordBatches> {
        let mut kept = Vec::with_capacity(batches.len());
        for batch in batches {
            let days = visit_days(&batch, &self.column)?;
            let mask: BooleanArray = days
                .iter()
                .map(|day| Some(matches!(day, Some(d) if *d >= self.cutoff)))
                .collect();
            let filtered = filter_record_batch(&batch, &mask)?;
            if filtered.num_rows() > 0 {
                kept.push(filtered);
            }
        }
        Ok(kept)
    }
}
