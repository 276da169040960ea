//! Threshold presets — rollout phases from conservative to aggressive.

use crate::error::{ArborError, Result};
use serde::{Deserialize, Serialize};

/// Tier boundary and confidence thresholds for one routing posture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Minimum analyzer confidence for a Simple classification to stand.
    pub simple_confidence: f64,
    /// Highest score still classified Simple.
    pub simple_max: f64,
    /// Highest score still classified Medium. Must exceed `simple_max`.
    pub medium_max: f64,
    /// Minimum confidence required to downgrade tier mid-conversation.
    pub cache_coherence_confidence: f64,
}

/// Named threshold preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Conservative,
    Moderate,
    Aggressive,
}

impl Preset {
    /// Resolve an admin-facing preset name.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "conservative" => Ok(Preset::Conservative),
            "moderate" => Ok(Preset::Moderate),
            "aggressive" => Ok(Preset::Aggressive),
            other => Err(ArborError::UnknownPreset(other.to_string())),
        }
    }
}

impl ThresholdConfig {
    /// The complete threshold set for a preset. Presets are replaced whole,
    /// never patched field by field.
    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Conservative => Self {
                simple_confidence: 0.9,
                simple_max: 15.0,
                medium_max: 70.0,
                cache_coherence_confidence: 0.9,
            },
            Preset::Moderate => Self {
                simple_confidence: 0.85,
                simple_max: 25.0,
                medium_max: 65.0,
                cache_coherence_confidence: 0.8,
            },
            Preset::Aggressive => Self {
                simple_confidence: 0.7,
                simple_max: 35.0,
                medium_max: 60.0,
                cache_coherence_confidence: 0.7,
            },
        }
    }

    /// Startup-time invariant check: `0 <= simple_max < medium_max <= 100`
    /// and both confidences in [0, 1].
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.simple_max) {
            return Err(ArborError::InvalidThresholds(format!(
                "simple_max out of range: {}",
                self.simple_max
            )));
        }
        if self.simple_max >= self.medium_max || self.medium_max > 100.0 {
            return Err(ArborError::InvalidThresholds(format!(
                "require simple_max < medium_max <= 100, got {} / {}",
                self.simple_max, self.medium_max
            )));
        }
        for (name, v) in [
            ("simple_confidence", self.simple_confidence),
            ("cache_coherence_confidence", self.cache_coherence_confidence),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(ArborError::InvalidThresholds(format!(
                    "{name} out of range: {v}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self::preset(Preset::Moderate)
    }
}
