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

//! # Configuration Module
//!
//! Job and server settings. Both load from YAML (`.yaml`, `.yml`) or JSON
//! (`.json`) files; the binaries then apply command line overrides.
//!
//! ```yaml
//! source: s3://jvs-fraud-research/advance_auto_glue_out_by_day
//! destination: s3://jvs-fraud-research/datasets/visit_counts_by_day
//! ```

use std::path::Path;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ViError};
use crate::export::ViCompression;

/// Port the sentiment server listens on by default.
pub const DEFAULT_PORT: u16 = 9000;

fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "yaml" | "yml" => Ok(serde_yaml::from_str(&content)?),
        "json" => Ok(serde_json::from_str(&content)?),
        _ => Err(ViError::validation(format!(
            "unsupported config format: {}",
            path.display()
        ))),
    }
}

fn normalize_location(location: &str) -> String {
    location.trim().trim_end_matches('/').to_string()
}

/// True when `inner` lies below `outer` on a `/` boundary.
fn is_within(inner: &str, outer: &str) -> bool {
    inner
        .strip_prefix(outer)
        .is_some_and(|rest| rest.starts_with('/'))
}

/// Settings shared by the batch jobs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViJobConfig {
    /// Dataset location to read.
    pub source: String,
    /// Dataset location to replace with the job output.
    pub destination: String,
    /// Keep visit days on or after this date (repartition only).
    #[serde(default)]
    pub cutoff: Option<NaiveDate>,
    /// Parquet codec for partitioned output.
    #[serde(default)]
    pub compression: ViCompression,
}

impl ViJobConfig {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            cutoff: None,
            compression: ViCompression::default(),
        }
    }

    pub fn with_cutoff(mut self, cutoff: NaiveDate) -> Self {
        self.cutoff = Some(cutoff);
        self
    }

    pub fn with_compression(mut self, compression: ViCompression) -> Self {
        self.compression = compression;
        self
    }

    /// Locations the daily visit counts have historically been produced with.
    pub fn daily_visits_default() -> Self {
        Self::new(
            "s3://jvs-fraud-research/advance_auto_glue_out_by_day",
            "s3://jvs-fraud-research/datasets/visit_counts_by_day",
        )
    }

    /// Locations and cutoff the visitor logs have historically been repartitioned with.
    pub fn repartition_default() -> Self {
        let cutoff = NaiveDate::from_ymd_opt(2020, 8, 1).unwrap_or_default();
        Self::new(
            "s3://think-training-data-us-east-1-prod-teal/advanceautoparts/main/all-visitors/",
            "s3://jvs-fraud-research/advance_auto_glue_out_by_day",
        )
        .with_cutoff(cutoff)
    }

    /// Loads a job config from a YAML or JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let config: Self = load(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects empty locations and a destination equal to, inside, or
    /// containing the source.
    ///
    /// Writing clears the whole destination, so a parent destination would
    /// delete the input, and a nested one would be read back on the next run.
    pub fn validate(&self) -> Result<()> {
        if self.source.trim().is_empty() {
            return Err(ViError::validation("job source cannot be empty"));
        }
        if self.destination.trim().is_empty() {
            return Err(ViError::validation("job destination cannot be empty"));
        }
        let source = normalize_location(&self.source);
        let destination = normalize_location(&self.destination);
        if source == destination {
            return Err(ViError::validation(format!(
                "job destination '{}' would overwrite its own source",
                self.destination
            )));
        }
        if is_within(&source, &destination) || is_within(&destination, &source) {
            return Err(ViError::validation(format!(
                "job source '{}' and destination '{}' overlap",
                self.source, self.destination
            )));
        }
        Ok(())
    }
}

/// Connection and retry settings for the prediction counter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViCounterConfig {
    /// Redis URL, e.g. `redis://redis:6379`.
    pub url: String,
    #[serde(default = "ViCounterConfig::default_key")]
    pub key: String,
    #[serde(default = "ViCounterConfig::default_retries")]
    pub retries: usize,
    #[serde(default = "ViCounterConfig::default_backoff_ms")]
    pub backoff_ms: u64,
}

impl ViCounterConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            key: Self::default_key(),
            retries: Self::default_retries(),
            backoff_ms: Self::default_backoff_ms(),
        }
    }

    fn default_key() -> String {
        "hits".to_string()
    }

    fn default_retries() -> usize {
        5
    }

    fn default_backoff_ms() -> u64 {
        500
    }
}

/// Settings for the sentiment server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViServerConfig {
    #[serde(default = "ViServerConfig::default_host")]
    pub host: String,
    #[serde(default = "ViServerConfig::default_port")]
    pub port: u16,
    /// Prediction counter; disabled when absent.
    #[serde(default)]
    pub counter: Option<ViCounterConfig>,
}

impl Default for ViServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            counter: None,
        }
    }
}

impl ViServerConfig {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_PORT
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        load(path)
    }

    /// `host:port` to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
