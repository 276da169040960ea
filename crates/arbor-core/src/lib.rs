//! Arbor core — shared tier model, threshold presets, and model catalog.

pub mod catalog;
pub mod error;
pub mod thresholds;
pub mod tier;

pub use catalog::{ModelCatalog, ProviderTiers};
pub use error::{ArborError, Result};
pub use thresholds::{Preset, ThresholdConfig};
pub use tier::{score_to_tier, Tier};

#[cfg(test)]
mod tests;
