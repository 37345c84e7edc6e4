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


//! `daily-visits`: counts visits per day into a single CSV file.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use vista::{execute_job, ViDailyVisitsJob, ViJobConfig, ViLogConfig};

/// Count visits per visit_day into part-00000.csv
#[derive(Debug, Parser)]
#[command(name = "daily-visits", version)]
struct Cli {
    /// YAML or JSON job config; built-in locations are used when omitted
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Dataset to read (overrides the config)
    #[arg(long)]
    source: Option<String>,

    /// Location to replace with the counts (overrides the config)
    #[arg(long)]
    destination: Option<String>,

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
        None => ViJobConfig::daily_visits_default(),
    };
    if let Some(source) = cli.source {
        config.source = source;
    }
    if let Some(destination) = cli.destination {
        config.destination = destination;
    }

    let report = execute_job(&ViDailyVisitsJob::new(config)).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
