//! Context analyzer — bounded score adjustment from ambient session facts.

use crate::types::{PlanModePhase, RoutingContext, Signal, SpaceType, UserTier};

/// Context can shift the text-derived score but never dominate it.
pub const MAX_ADJUSTMENT: f64 = 15.0;

/// How many trailing entries of `recent_complexity_scores` are considered.
pub const RECENT_WINDOW: usize = 5;

/// A recent score above this marks the conversation as still complex.
pub const RECENT_SPIKE_SCORE: f64 = 60.0;

/// Context analyzer output.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextAdjustment {
    /// Clamped to [-MAX_ADJUSTMENT, MAX_ADJUSTMENT].
    pub adjustment: f64,
    pub signals: Vec<Signal>,
}

fn plan_mode_signal(ctx: &RoutingContext) -> Signal {
    if !ctx.is_task_plan_mode {
        return Signal::miss("plan_mode");
    }
    let (weight, phase) = match ctx.plan_mode_phase {
        Some(PlanModePhase::Proposing) => (10.0, "proposing"),
        Some(PlanModePhase::Executing) => (5.0, "executing"),
        Some(PlanModePhase::Gathering) => (2.0, "gathering"),
        None => (5.0, "active"),
    };
    Signal::hit("plan_mode", weight, phase)
}

fn space_signal(space: SpaceType) -> Signal {
    match space {
        SpaceType::Research => Signal::hit("space_type", 5.0, "research"),
        SpaceType::Engineering => Signal::hit("space_type", 3.0, "engineering"),
        SpaceType::Personal => Signal::hit("space_type", -3.0, "personal"),
        SpaceType::Team => Signal::miss("space_type"),
    }
}

fn recent_trend_signal(scores: &[f64]) -> Signal {
    let window: Vec<f64> = scores.iter().rev().take(RECENT_WINDOW).copied().collect();
    if window.is_empty() {
        return Signal::miss("sustained_complexity");
    }
    let avg = window.iter().sum::<f64>() / window.len() as f64;
    if avg > RECENT_SPIKE_SCORE {
        Signal::hit("sustained_complexity", 5.0, format!("avg {avg:.0}"))
    } else {
        Signal::miss("sustained_complexity")
    }
}

/// Map session context to a bounded score adjustment. Pure, no I/O.
pub fn analyze_context(ctx: &RoutingContext) -> ContextAdjustment {
    let mut signals = vec![plan_mode_signal(ctx), space_signal(ctx.space_type)];

    signals.push(if ctx.area_has_docs {
        Signal::hit("area_docs", 5.0, "reference docs attached")
    } else {
        Signal::miss("area_docs")
    });

    signals.push(if ctx.thinking_enabled {
        Signal::hit("thinking_hint", 5.0, "extended thinking on")
    } else {
        Signal::miss("thinking_hint")
    });

    signals.push(recent_trend_signal(&ctx.recent_complexity_scores));

    signals.push(if ctx.user_tier == UserTier::Free {
        Signal::hit("free_plan", -3.0, "cost-sensitive plan")
    } else {
        Signal::miss("free_plan")
    });

    let raw: f64 = signals.iter().filter(|s| s.matched).map(|s| s.weight).sum();
    ContextAdjustment {
        adjustment: raw.clamp(-MAX_ADJUSTMENT, MAX_ADJUSTMENT),
        signals,
    }
}
