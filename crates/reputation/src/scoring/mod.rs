//! Reputation scoring core.
//!
//! A pure pipeline from three loosely shaped provider payloads to a score
//! breakdown, a badge set, and a title:
//!
//! 1. [`metrics`] normalizes each payload into a flat [`MetricRecord`],
//!    defaulting anything missing or mistyped.
//! 2. [`weights`] turns records into capped per-domain sub-scores.
//! 3. [`badges`] checks each catalog badge against its threshold triple.
//! 4. [`titles`] picks the first title whose required badges were all awarded.
//! 5. [`ReputationEngine`] runs the steps behind a single failure boundary.
//!
//! Nothing here performs I/O or keeps state between calls.

pub mod badges;
mod engine;
pub mod metrics;
mod rules;
pub mod titles;
pub mod weights;

#[cfg(test)]
mod tests;

pub use badges::{
    assign, BadgeAward, BadgeDefinition, BadgeInput, BadgeThresholdTable, BadgeTier,
    ThresholdError, Thresholds, BADGE_CATALOG,
};
pub use engine::{evaluate, DomainPayloads, Evaluation, EvaluationError, ReputationEngine};
pub use metrics::{DomainMetrics, MetricKey, MetricRecord, MetricValue, SourceDomain};
pub use rules::{ScoringRules, ScoringRulesError};
pub use titles::{resolve_title, TitleRule, DEFAULT_TITLE};
pub use weights::{score, DomainRule, ScoreBreakdown, ScoreDomain, WeightTable};
