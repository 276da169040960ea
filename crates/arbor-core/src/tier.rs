//! Model capability tiers and score classification.

use crate::thresholds::ThresholdConfig;
use serde::{Deserialize, Serialize};

/// Model capability/cost tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Simple,
    Medium,
    Complex,
}

impl Tier {
    /// Total order used for override comparisons: Simple < Medium < Complex.
    pub fn rank(&self) -> u8 {
        match self {
            Tier::Simple => 1,
            Tier::Medium => 2,
            Tier::Complex => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Simple => "simple",
            Tier::Medium => "medium",
            Tier::Complex => "complex",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a 0-100 complexity score against threshold boundaries.
///
/// Boundaries are inclusive on the lower tier: a score exactly at
/// `simple_max` is still Simple.
pub fn score_to_tier(score: f64, thresholds: &ThresholdConfig) -> Tier {
    if score <= thresholds.simple_max {
        Tier::Simple
    } else if score <= thresholds.medium_max {
        Tier::Medium
    } else {
        Tier::Complex
    }
}
