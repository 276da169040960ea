//! Model catalog — per-provider tier tables and the reverse model lookup.
//!
//! The catalog is versioned configuration, not compiled constants: model
//! identifiers change whenever upstream providers add or retire models, so
//! the whole table is serde-loadable from JSON.

use crate::error::{ArborError, Result};
use crate::tier::Tier;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Model identifiers for one provider, one per tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderTiers {
    pub simple: String,
    pub medium: String,
    pub complex: String,
}

impl ProviderTiers {
    pub fn model_for(&self, tier: Tier) -> &str {
        match tier {
            Tier::Simple => &self.simple,
            Tier::Medium => &self.medium,
            Tier::Complex => &self.complex,
        }
    }
}

/// The full provider/model table plus legacy-model aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelCatalog {
    pub default_provider: String,
    pub providers: HashMap<String, ProviderTiers>,
    /// Retired or off-catalog model ids that still need a tier mapping
    /// (e.g. a `current_model` from an old conversation).
    #[serde(default)]
    pub aliases: HashMap<String, Tier>,
}

impl ModelCatalog {
    /// Load a catalog from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: ModelCatalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Startup-time check: the default provider must be mapped, and every
    /// provider row must carry non-empty model ids. A catalog that fails
    /// here is a configuration defect, not a per-request error.
    pub fn validate(&self) -> Result<()> {
        if !self.providers.contains_key(&self.default_provider) {
            return Err(ArborError::MissingDefaultProvider(
                self.default_provider.clone(),
            ));
        }
        for (provider, tiers) in &self.providers {
            for model in [&tiers.simple, &tiers.medium, &tiers.complex] {
                if model.is_empty() {
                    return Err(ArborError::InvalidCatalog(format!(
                        "provider {provider} has an empty model id"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Tier table for a provider, if it is known.
    pub fn tiers_for(&self, provider: &str) -> Option<&ProviderTiers> {
        self.providers.get(provider)
    }

    /// Tier table for the default provider. Valid after `validate()`.
    pub fn default_tiers(&self) -> &ProviderTiers {
        &self.providers[&self.default_provider]
    }

    /// Whether a model id appears anywhere in the catalog.
    pub fn is_known_model(&self, model: &str) -> bool {
        self.aliases.contains_key(model)
            || self.providers.values().any(|t| {
                t.simple == model || t.medium == model || t.complex == model
            })
    }

    /// Reverse lookup: model id to tier. Unknown ids map to Medium, the
    /// conservative middle ground for the coherence comparison.
    pub fn tier_for_model(&self, model: &str) -> Tier {
        if let Some(tier) = self.aliases.get(model) {
            return *tier;
        }
        for tiers in self.providers.values() {
            if tiers.simple == model {
                return Tier::Simple;
            }
            if tiers.medium == model {
                return Tier::Medium;
            }
            if tiers.complex == model {
                return Tier::Complex;
            }
        }
        Tier::Medium
    }
}

impl Default for ModelCatalog {
    fn default() -> Self {
        let providers = HashMap::from([
            (
                "anthropic".to_string(),
                ProviderTiers {
                    simple: "claude-haiku-4.5".into(),
                    medium: "claude-sonnet-4".into(),
                    complex: "claude-opus-4.5".into(),
                },
            ),
            (
                "openai".to_string(),
                ProviderTiers {
                    simple: "gpt-4o-mini".into(),
                    medium: "gpt-4o".into(),
                    complex: "o3".into(),
                },
            ),
            (
                "google".to_string(),
                ProviderTiers {
                    simple: "gemini-2.5-flash".into(),
                    medium: "gemini-2.5-pro".into(),
                    complex: "gemini-3-pro-preview".into(),
                },
            ),
        ]);
        Self {
            default_provider: "anthropic".into(),
            providers,
            aliases: HashMap::from([
                ("claude-3-5-haiku".to_string(), Tier::Simple),
                ("claude-3-5-sonnet".to_string(), Tier::Medium),
                ("gpt-4-turbo".to_string(), Tier::Medium),
            ]),
        }
    }
}
