//! Routing arbiter — composes the analyzers, then applies the ordered
//! override chain. Every call returns a complete decision; the only
//! permitted mid-conversation downgrade is the confidence-gated coherence
//! branch.

use crate::config::{RouterConfig, SharedConfig};
use crate::context::{analyze_context, RECENT_SPIKE_SCORE, RECENT_WINDOW};
use crate::query::analyze_query;
use crate::types::{
    ComplexityAnalysis, Override, OverrideKind, RoutingContext, RoutingDecision,
};
use arbor_core::{score_to_tier, Preset, Result, Tier};
use std::sync::Arc;
use std::time::Instant;

/// Clamp the merged query + context score to the 0-100 scale.
pub fn combine_scores(query_score: f64, adjustment: f64) -> f64 {
    (query_score + adjustment).clamp(0.0, 100.0)
}

/// Single entry point: analyze the request text, then arbitrate.
pub fn route(query: &str, ctx: &RoutingContext, config: &RouterConfig) -> RoutingDecision {
    let started = Instant::now();
    let analysis = analyze_query(query, &config.scoring, &config.thresholds);
    arbitrate_from(started, analysis, ctx, config)
}

/// Arbitrate from a prebuilt analysis. Seam for callers (and tests) that
/// score text separately from the override chain.
pub fn arbitrate(
    analysis: ComplexityAnalysis,
    ctx: &RoutingContext,
    config: &RouterConfig,
) -> RoutingDecision {
    arbitrate_from(Instant::now(), analysis, ctx, config)
}

fn arbitrate_from(
    started: Instant,
    analysis: ComplexityAnalysis,
    ctx: &RoutingContext,
    config: &RouterConfig,
) -> RoutingDecision {
    // Single bounded substitution; the default provider is guaranteed by
    // startup validation, so no second hop can be needed.
    let (provider, tiers) = match config.catalog.tiers_for(&ctx.provider) {
        Some(tiers) => (ctx.provider.clone(), tiers),
        None => {
            tracing::warn!(
                provider = %ctx.provider,
                default = %config.catalog.default_provider,
                "unknown provider, substituting default"
            );
            (
                config.catalog.default_provider.clone(),
                config.catalog.default_tiers(),
            )
        }
    };

    let context = analyze_context(ctx);
    let final_score = combine_scores(analysis.score, context.adjustment);

    let mut signals = analysis.signals.clone();
    signals.extend(context.signals);

    let classified_tier = score_to_tier(final_score, &config.thresholds);
    let confidence = analysis.confidence;

    let mut tier = classified_tier;
    let mut model = tiers.model_for(tier).to_string();
    let mut overrides: Vec<Override> = Vec::new();
    let mut pinned = false;

    // User-preference pin. Paid plans only; a pin bypasses the heuristic
    // steps below but never the thinking guarantee.
    if let Some(preferred) = &ctx.preferred_model {
        if ctx.user_tier.allows_model_pin() && config.catalog.is_known_model(preferred) {
            pinned = true;
            if *preferred != model {
                overrides.push(Override {
                    kind: OverrideKind::UserPreference,
                    description: format!("user pinned {preferred}"),
                    original_model: model.clone(),
                    overridden_to: preferred.clone(),
                });
                tier = config.catalog.tier_for_model(preferred);
                model = preferred.clone();
            }
        }
    }

    // Extended thinking must never run on the cheapest tier.
    if ctx.thinking_enabled && tier == Tier::Simple {
        let to = tiers.medium.clone();
        overrides.push(Override {
            kind: OverrideKind::Thinking,
            description: "extended thinking requires at least the medium tier".into(),
            original_model: model.clone(),
            overridden_to: to.clone(),
        });
        tracing::debug!(from = %model, to = %to, "thinking override fired");
        tier = Tier::Medium;
        model = to;
    }

    // Low-confidence Simple classifications default to the safer tier.
    if !pinned && tier == Tier::Simple && confidence < config.thresholds.simple_confidence {
        let to = tiers.medium.clone();
        overrides.push(Override {
            kind: OverrideKind::MinimumTier,
            description: format!(
                "confidence {confidence:.2} below simple threshold {:.2}",
                config.thresholds.simple_confidence
            ),
            original_model: model.clone(),
            overridden_to: to.clone(),
        });
        tracing::debug!(confidence, "minimum-tier override fired");
        tier = Tier::Medium;
        model = to;
    }

    // Cache coherence: a mid-conversation downgrade breaks prompt-cache
    // locality, so it must be earned with high confidence and a calm
    // recent-score window.
    if !pinned {
        if let Some(current) = &ctx.current_model {
            if ctx.conversation_turn > 1 {
                let current_tier = config.catalog.tier_for_model(current);
                if tier.rank() < current_tier.rank() {
                    let recent_spike = ctx
                        .recent_complexity_scores
                        .iter()
                        .rev()
                        .take(RECENT_WINDOW)
                        .any(|s| *s > RECENT_SPIKE_SCORE);
                    let allowed = confidence >= config.thresholds.cache_coherence_confidence
                        && !recent_spike;
                    if !allowed {
                        overrides.push(Override {
                            kind: OverrideKind::CacheCoherence,
                            description: format!(
                                "holding {current} to preserve prompt-cache locality"
                            ),
                            original_model: model.clone(),
                            overridden_to: current.clone(),
                        });
                        tracing::debug!(held = %current, "cache-coherence override fired");
                        tier = current_tier;
                        model = current.clone();
                    }
                }
            }
        }
    }

    let reasoning = if overrides.is_empty() {
        format!("{} | no overrides", analysis.reasoning)
    } else {
        let fired: Vec<&str> = overrides.iter().map(|o| o.kind.as_str()).collect();
        format!("{} | overrides: {}", analysis.reasoning, fired.join(", "))
    };

    let complexity = ComplexityAnalysis {
        score: final_score,
        tier: classified_tier,
        confidence,
        signals,
        reasoning: analysis.reasoning,
    };

    RoutingDecision {
        selected_model: model,
        provider,
        tier,
        complexity,
        overrides,
        reasoning,
        routing_time_ms: started.elapsed().as_secs_f64() * 1000.0,
    }
}

/// Engine handle for the surrounding application: owns a swappable
/// configuration and validates it once at construction.
#[derive(Debug)]
pub struct RoutingArbiter {
    config: SharedConfig,
}

impl RoutingArbiter {
    pub fn new(config: RouterConfig) -> Result<Self> {
        Ok(Self {
            config: SharedConfig::new(config)?,
        })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(RouterConfig::default())
    }

    /// Route one request against the current configuration snapshot.
    pub fn route(&self, query: &str, ctx: &RoutingContext) -> RoutingDecision {
        let snapshot = self.config.load();
        route(query, ctx, &snapshot)
    }

    /// Admin surface: switch threshold preset atomically.
    pub fn apply_preset(&self, preset: Preset) -> Result<()> {
        self.config.apply_preset(preset)
    }

    pub fn config(&self) -> Arc<RouterConfig> {
        self.config.load()
    }
}
