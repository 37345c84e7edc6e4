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

//! # Sentiment Service Module
//!
//! HTTP scoring of free text with a lexicon sentiment model.
//!
//! ## Module Components
//!
//! - **Sentiment** ([sentiment.rs](sentiment/index.html)): `ViSentimentModel` and the VADER analyzer
//! - **Counter** ([counter.rs](counter/index.html)): Prediction hit counters and their retry policy
//! - **Server** ([server.rs](server/index.html)): The axum router and listener
//!
//! ## Endpoints
//!
//! ```text
//! POST /predict  {"data": "I love this"}
//!   -> 200 {"neg": 0.0, "neu": 0.192, "pos": 0.808, "compound": 0.6369}
//! GET  /health
//!   -> 200 {"status": "ok"}
//! ```

pub mod counter;
pub mod sentiment;
pub mod server;

#[cfg(feature = "redis")]
pub use counter::ViRedisCounter;
pub use counter::{increment_with_retry, ViHitCounter, ViMemoryCounter, ViRetryPolicy};
pub use sentiment::{ViPolarityScores, ViSentimentModel, ViVaderModel};
pub use server::{
    build_router, serve, serve_with_listener, ViPredictRequest, ViServiceState,
    PREDICTION_COUNT_HEADER,
};
