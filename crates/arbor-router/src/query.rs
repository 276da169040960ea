//! Query analyzer — weighted-signal complexity scoring over request text.

use crate::config::ScoringConfig;
use crate::types::{ComplexityAnalysis, Signal};
use arbor_core::{score_to_tier, ThresholdConfig};

/// Confidence reported for empty/whitespace-only requests. High on purpose:
/// an empty turn is decisively trivial and must not get bumped to Medium by
/// the minimum-confidence override.
const EMPTY_QUERY_CONFIDENCE: f64 = 0.9;

/// Signals below this magnitude are treated as baseline, not direction votes.
const AGREEMENT_MIN_WEIGHT: f64 = 5.0;

const BOUNDARY_BLEND: f64 = 0.55;
const AGREEMENT_BLEND: f64 = 0.45;

fn keyword_signal(
    text: &str,
    keywords: &[String],
    name: &str,
    min_matches: usize,
    weight: f64,
) -> Signal {
    let matches: Vec<&str> = keywords
        .iter()
        .filter(|kw| text.contains(kw.to_lowercase().as_str()))
        .map(|kw| kw.as_str())
        .collect();
    if matches.len() >= min_matches {
        let top: Vec<&str> = matches.iter().take(3).copied().collect();
        Signal::hit(name, weight, top.join(", "))
    } else {
        Signal::miss(name)
    }
}

fn length_signal(words: usize, config: &ScoringConfig) -> Signal {
    let weight = (words as f64 * config.word_weight).min(config.word_cap);
    Signal::hit("length", weight, format!("{words} words"))
}

fn multi_step_signal(text: &str, weight: f64) -> Signal {
    let patterns = [r"(?i)\bfirst\b.*\bthen\b", r"(?i)\bstep \d", r"(?m)^\s*\d+[.)]\s"];
    let hits = patterns
        .iter()
        .filter(|p| regex::Regex::new(p).map(|r| r.is_match(text)).unwrap_or(false))
        .count();
    if hits > 0 {
        Signal::hit("multi_step", weight, "enumerated instructions")
    } else {
        Signal::miss("multi_step")
    }
}

fn multi_question_signal(text: &str, config: &ScoringConfig) -> Signal {
    let count = text.matches('?').count();
    if count > config.multi_question_min {
        Signal::hit("multi_question", config.multi_question_weight, format!("{count} questions"))
    } else {
        Signal::miss("multi_question")
    }
}

fn lookup_signal(lower: &str, config: &ScoringConfig) -> Signal {
    let trimmed = lower.trim_start();
    for prefix in &config.lookup_prefixes {
        if trimmed.starts_with(prefix.as_str()) {
            return Signal::hit("fact_lookup", config.lookup_weight, prefix.clone());
        }
    }
    Signal::miss("fact_lookup")
}

fn greeting_signal(lower: &str, words: usize, config: &ScoringConfig) -> Signal {
    if words <= config.greeting_max_words {
        for kw in &config.greeting_keywords {
            if lower.contains(kw.as_str()) {
                return Signal::hit("greeting", config.greeting_weight, kw.clone());
            }
        }
    }
    Signal::miss("greeting")
}

fn reasoning_signal(lower: &str, config: &ScoringConfig) -> Signal {
    let matches: Vec<&str> = config
        .reasoning_keywords
        .iter()
        .filter(|kw| lower.contains(kw.as_str()))
        .map(|kw| kw.as_str())
        .collect();
    match matches.len() {
        0 => Signal::miss("deep_reasoning"),
        1 => Signal::hit("deep_reasoning", config.reasoning_weight, matches[0]),
        _ => {
            let top: Vec<&str> = matches.iter().take(3).copied().collect();
            Signal::hit("deep_reasoning", config.reasoning_strong_weight, top.join(", "))
        }
    }
}

fn boundary_confidence(score: f64, thresholds: &ThresholdConfig, steepness: f64) -> f64 {
    let distance = (score - thresholds.simple_max)
        .abs()
        .min((score - thresholds.medium_max).abs());
    1.0 / (1.0 + (-steepness * distance).exp())
}

fn agreement_confidence(signals: &[Signal]) -> f64 {
    let mut pos = 0usize;
    let mut neg = 0usize;
    for s in signals.iter().filter(|s| s.matched) {
        if s.weight >= AGREEMENT_MIN_WEIGHT {
            pos += 1;
        } else if s.weight <= -AGREEMENT_MIN_WEIGHT {
            neg += 1;
        }
    }
    if pos + neg == 0 {
        0.6
    } else {
        pos.max(neg) as f64 / (pos + neg) as f64
    }
}

fn compose_reasoning(score: f64, signals: &[Signal]) -> String {
    let mut strong: Vec<&Signal> = signals
        .iter()
        .filter(|s| s.matched && s.weight.abs() >= AGREEMENT_MIN_WEIGHT)
        .collect();
    if strong.is_empty() {
        return format!("score={score:.0} | no strong signals");
    }
    strong.sort_by(|a, b| {
        b.weight
            .abs()
            .partial_cmp(&a.weight.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let names: Vec<&str> = strong.iter().map(|s| s.name.as_str()).collect();
    format!(
        "score={score:.0} | dominant: {} | signals: {}",
        strong[0].name,
        names.join(", ")
    )
}

/// Score request text against the heuristic catalogue.
///
/// Pure and deterministic: same text, same output. Runs in time linear in
/// the text length; no I/O.
pub fn analyze_query(
    text: &str,
    config: &ScoringConfig,
    thresholds: &ThresholdConfig,
) -> ComplexityAnalysis {
    if text.trim().is_empty() {
        return ComplexityAnalysis {
            score: 0.0,
            tier: score_to_tier(0.0, thresholds),
            confidence: EMPTY_QUERY_CONFIDENCE,
            signals: vec![Signal::miss("empty_query")],
            reasoning: "empty query | score=0".into(),
        };
    }

    let lower = text.to_lowercase();
    let words = text.split_whitespace().count();

    let mut signals = vec![
        length_signal(words, config),
        keyword_signal(&lower, &config.code_keywords, "code", 1, config.code_weight),
        keyword_signal(&lower, &config.structured_keywords, "structured_data", 1, config.structured_weight),
        reasoning_signal(&lower, config),
        keyword_signal(&lower, &config.technical_keywords, "technical_terms", 1, config.technical_weight),
        keyword_signal(&lower, &config.domain_keywords, "domain_specific", 1, config.domain_weight),
        keyword_signal(&lower, &config.creative_keywords, "creative", 1, config.creative_weight),
        keyword_signal(&lower, &config.constraint_keywords, "constraints", 2, config.constraint_weight),
        multi_step_signal(&lower, config.multi_step_weight),
        multi_question_signal(text, config),
        lookup_signal(&lower, config),
        greeting_signal(&lower, words, config),
    ];

    if words > config.long_form_words {
        signals.push(Signal::hit("long_form", config.long_form_weight, format!("{words} words")));
    } else {
        signals.push(Signal::miss("long_form"));
    }

    let raw: f64 = signals.iter().filter(|s| s.matched).map(|s| s.weight).sum();
    let score = raw.clamp(0.0, 100.0);
    let tier = score_to_tier(score, thresholds);

    let boundary = boundary_confidence(score, thresholds, config.confidence_steepness);
    let agreement = agreement_confidence(&signals);
    let confidence = (BOUNDARY_BLEND * boundary + AGREEMENT_BLEND * agreement).clamp(0.0, 1.0);

    let reasoning = compose_reasoning(score, &signals);

    ComplexityAnalysis {
        score,
        tier,
        confidence,
        signals,
        reasoning,
    }
}
