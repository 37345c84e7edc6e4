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

//! # Vista Operator Module
//!
//! Operators are the transformation steps of the batch jobs. Each one takes
//! the Arrow batches produced by the previous step and returns new batches,
//! so a job reads as `read -> operator -> ... -> write`.
//!
//! ## Implementing Custom Operators
//!
//! ```rust
//! use vista::operator::ViOperator;
//! use vista::record::ViRecordBatches;
//! use vista::errors::Result;
//!
//! #[derive(Debug)]
//! struct DropEmpty;
//!
//! impl ViOperator for DropEmpty {
//!     fn name(&self) -> &'static str {
//!         "transform.drop_empty"
//!     }
//!
//!     fn apply(&self, batches: ViRecordBatches) -> Result<ViRecordBatches> {
//!         Ok(batches.into_iter().filter(|b| b.num_rows() > 0).collect())
//!     }
//! }
//! ```

use crate::errors::{Result, ViError};
use crate::record::ViRecordBatches;

/// Contract every Vista transformation step fulfills.
///
/// Operators are stateless and deterministic: the same input batches always
/// produce the same output batches, which is what makes re-running a job
/// with unchanged input reproduce its output.
pub trait ViOperator: std::fmt::Debug {
    /// Unique, human-readable name for the operator, used in logs and errors.
    fn name(&self) -> &'static str;

    /// Applies the operator to the incoming batches.
    ///
    /// The operator may return fewer rows (filters), a different schema
    /// (aggregations), or drop batches that became empty.
    fn apply(&self, batches: ViRecordBatches) -> Result<ViRecordBatches>;
}

/// Executes an operator, tagging any failure with the operator's name.
pub fn execute_operator(
    operator: &dyn ViOperator,
    batches: ViRecordBatches,
) -> Result<ViRecordBatches> {
    let rows_in: usize = batches.iter().map(|b| b.num_rows()).sum();
    let output = operator
        .apply(batches)
        .map_err(|err| ViError::operator(operator.name(), err.to_string()))?;
    let rows_out: usize = output.iter().map(|b| b.num_rows()).sum();
    log::debug!("{}: {} rows in, {} rows out", operator.name(), rows_in, rows_out);
    Ok(output)
}
