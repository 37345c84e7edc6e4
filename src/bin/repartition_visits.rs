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


//! `repartition-visits`: keeps visits on or after a cutoff and rewrites them
//! as Parquet partitioned by `visit_day`.

use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use vista::{execute_job, ViCompression, ViJobConfig, ViLogConfig, ViRepartitionJob};

/// Repartition visitor logs by visit_day
#[derive(Debug, Parser)]
#[command(name = "repartition-visits", version)]
struct Cli {
    /// YAML or JSON job config; built-in locations and cutoff are used when omitted
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Dataset to read (overrides the config)
    #[arg(long)]
    source: Option<String>,

    /// Location to replace with the partitioned output (overrides the config)
    #[arg(long)]
    destination: Option<String>,

    /// Earliest visit_day to keep, YYYY-MM-DD (overrides the config)
    #[arg(long)]
    cutoff: Option<NaiveDate>,

    /// Parquet codec: snappy, zstd, gzip or none (overrides the config)
    #[arg(long)]
    compression: Option<ViCompression>,

    /// Default log filter; RUST_LOG wins when set
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit one JSON object per log line
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    ViLogConfig::new(cli.log_level.as_str())
        .with_json(cli.log_json)
        .init();

    let mut config = match &cli.config {
        Some(path) => ViJobConfig::from_path(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ViJobConfig::repartition_default(),
    };
    if let Some(source) = cli.source {
        config.source = source;
    }
    if let Some(destination) = cli.destination {
        config.destination = destination;
    }
    if let Some(cutoff) = cli.cutoff {
        config.cutoff = Some(cutoff);
    }
    if let Some(compression) = cli.compression {
        config.compression = compression;
    }

    let report = execute_job(&ViRepartitionJob::new(config)).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
