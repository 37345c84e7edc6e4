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

//! # Vista Error Module
//!
//! This module defines the error type shared by the batch jobs and the
//! sentiment service.
//!
//! ## Error Categories
//!
//! - **Io**: Local filesystem errors
//! - **Storage**: Object store reads, writes, listings and deletes
//! - **Schema**: Missing columns, unsupported column types, undecodable files
//! - **Validation**: Invalid configuration or input
//! - **Operator**: Failures inside a transformation step
//! - **Connection**: Lost or refused connections to an external counter
//! - **Job**: A batch job failed; carries the originating error
//! - **Serde**: Serialization/deserialization errors
//! - **Internal**: Unexpected internal failures
//!
//! ## Usage
//!
//! ```rust
//! use vista::errors::{Result, ViError};
//!
//! fn check(location: &str) -> Result<()> {
//!     if location.is_empty() {
//!         return Err(ViError::validation("location cannot be empty"));
//!     }
//!     Ok(())
//! }
//! ```

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience result type used throughout Vista.
pub type Result<T> = std::result::Result<T, ViError>;

/// Canonical error enumeration for Vista.
#[derive(Debug, Error, Serialize, Deserialize)]
pub enum ViError {
    /// Errors originating from local filesystem IO.
    #[error("io error: {0}")]
    Io(String),

    /// Errors raised by the object store backing a dataset location.
    #[error("storage error at '{location}': {message}")]
    Storage { location: String, message: String },

    /// Errors caused by malformed schema or incompatible data layout.
    #[error("schema error: {message}")]
    Schema { message: String },

    /// Validation errors triggered by invalid parameters or inputs.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Any failure raised by an operator implementation.
    #[error("operator '{operator}' failed: {message}")]
    Operator { operator: String, message: String },

    /// Connection-level failures talking to an external service.
    ///
    /// These are the only errors the counter retry policy retries.
    #[error("connection error: {0}")]
    Connection(String),

    /// A batch job failed. `source` is the error that aborted it.
    #[error("job '{job}' failed: {source}")]
    Job {
        job: String,
        #[source]
        source: Box<ViError>,
    },

    /// Wrapper for serde-style serialization issues.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Catch-all variant for unexpected situations.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<io::Error> for ViError {
    fn from(err: io::Error) -> Self {
        ViError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ViError {
    fn from(err: serde_json::Error) -> Self {
        ViError::Serde(err.to_string())
    }
}

impl From<serde_yaml::Error> for ViError {
    fn from(err: serde_yaml::Error) -> Self {
        ViError::Serde(err.to_string())
    }
}

impl From<arrow::error::ArrowError> for ViError {
    fn from(err: arrow::error::ArrowError) -> Self {
        ViError::Schema {
            message: err.to_string(),
        }
    }
}

impl From<parquet::errors::ParquetError> for ViError {
    fn from(err: parquet::errors::ParquetError) -> Self {
        ViError::Schema {
            message: format!("parquet: {}", err),
        }
    }
}

impl From<csv::Error> for ViError {
    fn from(err: csv::Error) -> Self {
        ViError::Serde(format!("csv: {}", err))
    }
}

impl From<object_store::Error> for ViError {
    fn from(err: object_store::Error) -> Self {
        let location = match &err {
            object_store::Error::NotFound { path, .. } => path.clone(),
            object_store::Error::AlreadyExists { path, .. } => path.clone(),
            _ => String::new(),
        };
        ViError::Storage {
            location,
            message: err.to_string(),
        }
    }
}

impl ViError {
    /// Helper to construct simple validation errors.
    pub fn validation<T: Into<String>>(message: T) -> Self {
        ViError::Validation {
            message: message.into(),
        }
    }

    /// Helper to construct schema errors.
    pub fn schema<T: Into<String>>(message: T) -> Self {
        ViError::Schema {
            message: message.into(),
        }
    }

    /// Helper to construct storage errors bound to a dataset location.
    pub fn storage(location: impl Into<String>, message: impl ToString) -> Self {
        ViError::Storage {
            location: location.into(),
            message: message.to_string(),
        }
    }

    /// Helper to construct operator errors.
    pub fn operator(name: impl Into<String>, message: impl Into<String>) -> Self {
        ViError::Operator {
            operator: name.into(),
            message: message.into(),
        }
    }

    /// Helper to construct connection errors.
    pub fn connection<T: Into<String>>(message: T) -> Self {
        ViError::Connection(message.into())
    }

    /// Wraps the error that aborted a job.
    pub fn job(name: impl Into<String>, source: ViError) -> Self {
        ViError::Job {
            job: name.into(),
            source: Box::new(source),
        }
    }

    /// Helper to construct internal errors.
    pub fn internal<T: Into<String>>(message: T) -> Self {
        ViError::Internal(message.into())
    }

    /// Returns true for connection-kind failures.
    pub fn is_connection(&self) -> bool {
        matches!(self, ViError::Connection(_))
    }
}
