//! Arbor router — multi-signal model-tier arbitration with an audited
//! override chain.

pub mod arbiter;
pub mod config;
pub mod context;
pub mod query;
pub mod types;

pub use arbiter::{arbitrate, combine_scores, route, RoutingArbiter};
pub use config::{RouterConfig, ScoringConfig, SharedConfig, ROUTER_CONFIG};
pub use context::{analyze_context, ContextAdjustment, MAX_ADJUSTMENT};
pub use query::analyze_query;
pub use types::*;
