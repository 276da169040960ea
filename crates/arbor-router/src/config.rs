//! Routing configuration — scoring weights, thresholds, catalog, and the
//! atomic swap handle for runtime preset changes.

use arbor_core::{ModelCatalog, Preset, Result, ThresholdConfig};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, LazyLock, RwLock};

fn s(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Query-analyzer keyword groups and rule weights. Serde-loadable so the
/// heuristic catalogue can be tuned without a rebuild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Per-word contribution of the length signal and its cap.
    pub word_weight: f64,
    pub word_cap: f64,
    /// Extra weight once a request crosses long-form territory.
    pub long_form_words: usize,
    pub long_form_weight: f64,

    pub code_keywords: Vec<String>,
    pub code_weight: f64,
    pub structured_keywords: Vec<String>,
    pub structured_weight: f64,
    pub reasoning_keywords: Vec<String>,
    pub reasoning_weight: f64,
    /// Weight when two or more reasoning keywords agree.
    pub reasoning_strong_weight: f64,
    pub technical_keywords: Vec<String>,
    pub technical_weight: f64,
    pub domain_keywords: Vec<String>,
    pub domain_weight: f64,
    pub creative_keywords: Vec<String>,
    pub creative_weight: f64,
    pub constraint_keywords: Vec<String>,
    pub constraint_weight: f64,

    /// Single-fact-lookup phrasings that suppress the score.
    pub lookup_prefixes: Vec<String>,
    pub lookup_weight: f64,
    pub greeting_keywords: Vec<String>,
    pub greeting_weight: f64,
    /// A greeting only suppresses when the whole request is this short.
    pub greeting_max_words: usize,

    pub multi_step_weight: f64,
    pub multi_question_weight: f64,
    /// '?' occurrences above this count mark a multi-question request.
    pub multi_question_min: usize,

    /// Steepness of the logistic boundary-distance confidence curve,
    /// on the 0-100 score scale.
    pub confidence_steepness: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            word_weight: 0.4,
            word_cap: 25.0,
            long_form_words: 150,
            long_form_weight: 10.0,
            code_keywords: s(&[
                "```", "function", "class", "import", "def ", "select ", "async",
                "await", "const ", "fn ", "struct", "regex", "stack trace",
            ]),
            code_weight: 20.0,
            structured_keywords: s(&[
                "json", "yaml", "xml", "csv", "schema", "table", "spreadsheet",
            ]),
            structured_weight: 8.0,
            reasoning_keywords: s(&[
                "prove", "derive", "analyze", "architecture", "trade-off",
                "tradeoff", "design", "optimize", "evaluate", "compare",
                "step by step", "in depth", "strategy", "synthesize",
            ]),
            reasoning_weight: 10.0,
            reasoning_strong_weight: 20.0,
            technical_keywords: s(&[
                "algorithm", "database", "distributed", "concurrency",
                "kubernetes", "encryption", "migration", "refactor",
                "integration", "pipeline", "api",
            ]),
            technical_weight: 12.0,
            domain_keywords: s(&[
                "quantum", "genomics", "fpga", "compliance", "actuarial",
                "cryptography", "litigation", "pharmacokinetics",
            ]),
            domain_weight: 10.0,
            creative_keywords: s(&[
                "story", "poem", "brainstorm", "compose", "draft", "imagine",
            ]),
            creative_weight: 8.0,
            constraint_keywords: s(&[
                "at most", "at least", "within", "no more than", "exactly",
                "maximum", "minimum", "must not",
            ]),
            constraint_weight: 8.0,
            lookup_prefixes: s(&[
                "what is", "what's", "who is", "when did", "when was",
                "where is", "define", "translate", "capital of", "yes or no",
                "how many",
            ]),
            lookup_weight: -25.0,
            greeting_keywords: s(&["hello", "hi", "hey", "thanks", "thank you", "ok"]),
            greeting_weight: -15.0,
            greeting_max_words: 4,
            multi_step_weight: 18.0,
            multi_question_weight: 10.0,
            multi_question_min: 3,
            confidence_steepness: 0.12,
        }
    }
}

/// One immutable routing configuration snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouterConfig {
    pub thresholds: ThresholdConfig,
    pub scoring: ScoringConfig,
    pub catalog: ModelCatalog,
}

impl RouterConfig {
    pub fn with_preset(preset: Preset) -> Self {
        Self {
            thresholds: ThresholdConfig::preset(preset),
            ..Self::default()
        }
    }

    /// Startup-time validation. Catalog and threshold defects fail here,
    /// never inside `route()`.
    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()?;
        self.catalog.validate()?;
        Ok(())
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            thresholds: ThresholdConfig::default(),
            scoring: ScoringConfig::default(),
            catalog: ModelCatalog::default(),
        }
    }
}

/// The default config instance.
pub static ROUTER_CONFIG: LazyLock<RouterConfig> = LazyLock::new(RouterConfig::default);

/// Atomically swappable configuration handle.
///
/// `load()` hands out an `Arc` snapshot; a `route()` call holds exactly one
/// snapshot for its whole execution, so a concurrent preset switch is never
/// observed partially.
#[derive(Debug)]
pub struct SharedConfig {
    inner: RwLock<Arc<RouterConfig>>,
}

impl SharedConfig {
    pub fn new(config: RouterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            inner: RwLock::new(Arc::new(config)),
        })
    }

    /// Current snapshot.
    pub fn load(&self) -> Arc<RouterConfig> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Replace the whole configuration. The old snapshot stays valid for
    /// calls already holding it.
    pub fn replace(&self, config: RouterConfig) -> Result<()> {
        config.validate()?;
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Arc::new(config);
        Ok(())
    }

    /// Swap in a named threshold preset, keeping scoring and catalog.
    pub fn apply_preset(&self, preset: Preset) -> Result<()> {
        let current = self.load();
        self.replace(RouterConfig {
            thresholds: ThresholdConfig::preset(preset),
            scoring: current.scoring.clone(),
            catalog: current.catalog.clone(),
        })
    }
}
