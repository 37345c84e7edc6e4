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


//! `sentiment-server`: serves `POST /predict` until Ctrl-C.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use vista::service::serve;
use vista::{ViCounterConfig, ViLogConfig, ViServerConfig, ViServiceState};

/// Score text sentiment over HTTP
#[derive(Debug, Parser)]
#[command(name = "sentiment-server", version)]
struct Cli {
    /// YAML or JSON server config
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Interface to bind (overrides the config)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides the config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Count predictions in this Redis instance, e.g. redis://redis:6379
    #[arg(long)]
    redis_url: Option<String>,

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
        Some(path) => ViServerConfig::from_path(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ViServerConfig::default(),
    };
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(url) = cli.redis_url {
        match config.counter.as_mut() {
            Some(counter) => counter.url = url,
            None => config.counter = Some(ViCounterConfig::new(url)),
        }
    }

    let state = ViServiceState::from_config(&config)?;
    serve(&config, state).await?;
    Ok(())
}
