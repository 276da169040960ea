use arbor_core::Tier;
use serde::{Deserialize, Serialize};

/// One heuristic rule and whether it fired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub name: String,
    /// Signed contribution to the complexity score. Zero when unmatched.
    pub weight: f64,
    pub matched: bool,
    /// Diagnostic detail, e.g. the keywords that matched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_value: Option<String>,
}

impl Signal {
    pub fn hit(name: &str, weight: f64, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            weight,
            matched: true,
            matched_value: Some(value.into()),
        }
    }

    pub fn miss(name: &str) -> Self {
        Self {
            name: name.to_string(),
            weight: 0.0,
            matched: false,
            matched_value: None,
        }
    }
}

/// Analyzer output for one request. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityAnalysis {
    /// Clamped sum of matched signal weights, 0-100.
    pub score: f64,
    pub tier: Tier,
    /// 0-1 measure of how decisive the classification is.
    pub confidence: f64,
    pub signals: Vec<Signal>,
    pub reasoning: String,
}

/// Subscription level of the requesting user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserTier {
    Free,
    Pro,
    Business,
}

impl UserTier {
    /// Explicit model pins are a paid-plan feature.
    pub fn allows_model_pin(&self) -> bool {
        !matches!(self, UserTier::Free)
    }
}

/// The kind of space the conversation lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaceType {
    Personal,
    Team,
    Engineering,
    Research,
}

/// Phase of task plan mode, when active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanModePhase {
    Gathering,
    Proposing,
    Executing,
}

/// Ambient session facts supplied by the caller. The engine never reads
/// shared state; everything it knows about the session arrives here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingContext {
    pub provider: String,
    pub thinking_enabled: bool,
    pub user_tier: UserTier,
    pub space_type: SpaceType,
    pub area_has_docs: bool,
    pub is_task_plan_mode: bool,
    pub plan_mode_phase: Option<PlanModePhase>,
    /// 1 = first turn of the conversation.
    pub conversation_turn: u32,
    /// Model used on the previous turn, if any.
    pub current_model: Option<String>,
    /// Most recent last; the engine reads at most the last 5.
    pub recent_complexity_scores: Vec<f64>,
    /// Explicit user model pin, honored for paid plans.
    pub preferred_model: Option<String>,
}

impl Default for RoutingContext {
    /// Default context for callers that do not track every field: first
    /// turn, default provider, no plan mode, no history.
    fn default() -> Self {
        Self {
            provider: "anthropic".into(),
            thinking_enabled: false,
            user_tier: UserTier::Free,
            space_type: SpaceType::Personal,
            area_has_docs: false,
            is_task_plan_mode: false,
            plan_mode_phase: None,
            conversation_turn: 1,
            current_model: None,
            recent_complexity_scores: Vec::new(),
            preferred_model: None,
        }
    }
}

/// Which arbitration rule changed the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideKind {
    Thinking,
    CacheCoherence,
    UserPreference,
    MinimumTier,
}

impl OverrideKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverrideKind::Thinking => "thinking",
            OverrideKind::CacheCoherence => "cache_coherence",
            OverrideKind::UserPreference => "user_preference",
            OverrideKind::MinimumTier => "minimum_tier",
        }
    }
}

/// Append-only record of one arbitration step that changed the outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Override {
    pub kind: OverrideKind,
    pub description: String,
    pub original_model: String,
    pub overridden_to: String,
}

/// The sole output artifact. Immutable once returned; the caller (or its
/// analytics collaborator) owns it from here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub selected_model: String,
    /// Provider actually used, after any fallback substitution.
    pub provider: String,
    pub tier: Tier,
    pub complexity: ComplexityAnalysis,
    pub overrides: Vec<Override>,
    pub reasoning: String,
    pub routing_time_ms: f64,
}
