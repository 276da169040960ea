use crate::catalog::{ModelCatalog, ProviderTiers};
use crate::error::ArborError;
use crate::thresholds::{Preset, ThresholdConfig};
use crate::tier::{score_to_tier, Tier};

fn moderate() -> ThresholdConfig {
    ThresholdConfig::preset(Preset::Moderate)
}

// ========== Tier Classification ==========

#[test]
fn test_tier_boundaries_inclusive() {
    let t = moderate();
    assert_eq!(score_to_tier(25.0, &t), Tier::Simple);
    assert_eq!(score_to_tier(26.0, &t), Tier::Medium);
    assert_eq!(score_to_tier(65.0, &t), Tier::Medium);
    assert_eq!(score_to_tier(66.0, &t), Tier::Complex);
}

#[test]
fn test_tier_extremes() {
    let t = moderate();
    assert_eq!(score_to_tier(0.0, &t), Tier::Simple);
    assert_eq!(score_to_tier(100.0, &t), Tier::Complex);
}

#[test]
fn test_tier_monotone_in_score() {
    let t = moderate();
    let mut last_rank = 0;
    for score in 0..=100 {
        let rank = score_to_tier(score as f64, &t).rank();
        assert!(rank >= last_rank, "tier rank regressed at score {score}");
        last_rank = rank;
    }
}

#[test]
fn test_tier_rank_order() {
    assert!(Tier::Simple.rank() < Tier::Medium.rank());
    assert!(Tier::Medium.rank() < Tier::Complex.rank());
}

// ========== Presets ==========

#[test]
fn test_preset_from_name() {
    assert_eq!(Preset::from_name("moderate").unwrap(), Preset::Moderate);
    assert_eq!(Preset::from_name(" Conservative ").unwrap(), Preset::Conservative);
    assert!(matches!(
        Preset::from_name("reckless"),
        Err(ArborError::UnknownPreset(_))
    ));
}

#[test]
fn test_all_presets_valid() {
    for p in [Preset::Conservative, Preset::Moderate, Preset::Aggressive] {
        ThresholdConfig::preset(p).validate().unwrap();
    }
}

#[test]
fn test_thresholds_reject_inverted_bounds() {
    let bad = ThresholdConfig {
        simple_max: 70.0,
        medium_max: 65.0,
        ..moderate()
    };
    assert!(matches!(
        bad.validate(),
        Err(ArborError::InvalidThresholds(_))
    ));
}

#[test]
fn test_thresholds_reject_out_of_range_confidence() {
    let bad = ThresholdConfig {
        simple_confidence: 1.5,
        ..moderate()
    };
    assert!(bad.validate().is_err());
}

// ========== Model Catalog ==========

#[test]
fn test_catalog_default_valid() {
    ModelCatalog::default().validate().unwrap();
}

#[test]
fn test_reverse_lookup() {
    let c = ModelCatalog::default();
    assert_eq!(c.tier_for_model("claude-haiku-4.5"), Tier::Simple);
    assert_eq!(c.tier_for_model("claude-sonnet-4"), Tier::Medium);
    assert_eq!(c.tier_for_model("o3"), Tier::Complex);
}

#[test]
fn test_reverse_lookup_alias() {
    let c = ModelCatalog::default();
    assert_eq!(c.tier_for_model("claude-3-5-haiku"), Tier::Simple);
}

#[test]
fn test_unknown_model_defaults_to_medium() {
    let c = ModelCatalog::default();
    assert_eq!(c.tier_for_model("some-future-model"), Tier::Medium);
}

#[test]
fn test_missing_default_provider_is_init_failure() {
    let c = ModelCatalog {
        default_provider: "nonexistent".into(),
        ..ModelCatalog::default()
    };
    assert!(matches!(
        c.validate(),
        Err(ArborError::MissingDefaultProvider(_))
    ));
}

#[test]
fn test_empty_model_id_rejected() {
    let mut c = ModelCatalog::default();
    c.providers.insert(
        "broken".into(),
        ProviderTiers {
            simple: "".into(),
            medium: "m".into(),
            complex: "c".into(),
        },
    );
    assert!(matches!(c.validate(), Err(ArborError::InvalidCatalog(_))));
}

#[test]
fn test_catalog_json_round_trip() {
    let c = ModelCatalog::default();
    let json = serde_json::to_string(&c).unwrap();
    let back = ModelCatalog::from_json(&json).unwrap();
    assert_eq!(back.default_provider, c.default_provider);
    assert_eq!(back.tier_for_model("gpt-4o"), Tier::Medium);
}

#[test]
fn test_catalog_from_json_rejects_invalid() {
    let json = r#"{"default_provider":"x","providers":{}}"#;
    assert!(ModelCatalog::from_json(json).is_err());
}

#[test]
fn test_is_known_model() {
    let c = ModelCatalog::default();
    assert!(c.is_known_model("claude-opus-4.5"));
    assert!(c.is_known_model("gpt-4-turbo")); // alias
    assert!(!c.is_known_model("made-up-model"));
}
