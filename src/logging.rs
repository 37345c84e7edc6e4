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

//! Logger installation for the binaries.
//!
//! The library only emits through the `log` facade. `RUST_LOG` takes
//! precedence over the configured default level.

use std::io::Write;

use serde::{Deserialize, Serialize};

/// Console logger settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViLogConfig {
    /// Default filter, e.g. `info` or `vista=debug`.
    pub level: String,
    /// One JSON object per line instead of the human format.
    pub json: bool,
}

impl Default for ViLogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl ViLogConfig {
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Self::default()
        }
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Installs the global logger. Returns false if one was already set.
    pub fn init(&self) -> bool {
        let env = env_logger::Env::default().default_filter_or(self.level.as_str());
        let mut builder = env_logger::Builder::from_env(env);
        if self.json {
            builder.format(|buf, record| {
                let line = serde_json::json!({
                    "ts": chrono::Utc::now().to_rfc3339(),
                    "level": record.level().to_string(),
                    "target": record.target(),
                    "msg": record.args().to_string(),
                });
                writeln!(buf, "{}", line)
            });
        }
        builder.try_init().is_ok()
    }
}

/// Installs the human-readable logger at `level`.
pub fn init_logging(level: &str) -> bool {
    ViLogConfig::new(level).init()
}
