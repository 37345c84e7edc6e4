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

use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use vader_sentiment::SentimentIntensityAnalyzer;

/// The four polarity scores returned for a piece of text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViPolarityScores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    pub compound: f64,
}

/// A loaded sentiment model, shared read-only across requests.
pub trait ViSentimentModel: Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn polarity_scores(&self, text: &str) -> ViPolarityScores;
}

/// Lexicon and rule based VADER analyzer.
pub struct ViVaderModel {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl Debug for ViVaderModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViVaderModel").finish_non_exhaustive()
    }
}

impl Default for ViVaderModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ViVaderModel {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl ViSentimentModel for ViVaderModel {
    fn name(&self) -> &'static str {
        "vader"
    }

    fn polarity_scores(&self, text: &str) -> ViPolarityScores {
        // Blank input carries no sentiment.
        if text.trim().is_empty() {
            return ViPolarityScores::default();
        }
        let scores = self.analyzer.polarity_scores(text);
        let score = |key: &str| scores.get(key).copied().filter(|v| v.is_finite()).unwrap_or(0.0);
        ViPolarityScores {
            neg: score("neg"),
            neu: score("neu"),
            pos: score("pos"),
            compound: score("compound"),
        }
    }
}
