//! Source credibility: how often a publishing domain's sentiment agrees with the
//! price move that followed, learned pairwise and persisted between runs.

mod impact;
mod store;
mod tracker;

pub use impact::{ImpactParams, ImpactRecord, evaluate};
pub use store::{CredibilityStat, CredibilityStore};
pub use tracker::{CredibilityTracker, Observation, PairOutcome};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Three-valued direction of a sentiment or a price move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Positive,
    Negative,
    Neutral,
}

impl Direction {
    /// Sign of a sentiment score.
    pub fn from_sentiment(score: f64) -> Self {
        if score > 0.0 {
            Self::Positive
        } else if score < 0.0 {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    /// Percentage price change with a symmetric deadband (in percent) around zero.
    pub fn from_price_change(pct: f64, deadband_pct: f64) -> Self {
        if pct > deadband_pct {
            Self::Positive
        } else if pct < -deadband_pct {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
