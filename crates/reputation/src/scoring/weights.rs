use super::metrics::{DomainMetrics, MetricRecord, SourceDomain};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Weighted view over one or more source domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreDomain {
    Social,
    Crypto,
    Nft,
    Community,
    Messaging,
}

impl ScoreDomain {
    pub const ALL: [ScoreDomain; 5] = [
        ScoreDomain::Social,
        ScoreDomain::Crypto,
        ScoreDomain::Nft,
        ScoreDomain::Community,
        ScoreDomain::Messaging,
    ];

    /// Source records whose metrics feed this score.
    pub fn sources(&self) -> &'static [SourceDomain] {
        match self {
            ScoreDomain::Social => &[SourceDomain::Social],
            ScoreDomain::Crypto | ScoreDomain::Nft => &[SourceDomain::Wallet],
            ScoreDomain::Community => &[SourceDomain::Social, SourceDomain::Messaging],
            ScoreDomain::Messaging => &[SourceDomain::Messaging],
        }
    }
}

/// Metric name to weight. Names without a matching metric are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightTable(BTreeMap<String, f64>);

impl WeightTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, metric: &str, weight: f64) -> Self {
        self.0.insert(metric.to_string(), weight);
        self
    }

    pub fn weight(&self, metric: &str) -> Option<f64> {
        self.0.get(metric).copied()
    }
}

impl<'a> FromIterator<(&'a str, f64)> for WeightTable {
    fn from_iter<T: IntoIterator<Item = (&'a str, f64)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(metric, weight)| (metric.to_string(), weight))
                .collect(),
        )
    }
}

/// Weights and optional upper bound for a single score domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainRule {
    pub weights: WeightTable,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cap: Option<f64>,
}

/// Weighted sum of the record's metrics, clamped to `cap` after summation.
///
/// Iteration follows the record's key order, so identical inputs always sum in
/// the same order and produce bit-identical results.
pub fn score(metrics: &MetricRecord, weights: &WeightTable, cap: Option<f64>) -> f64 {
    let sum = metrics
        .iter()
        .filter_map(|(key, value)| {
            weights
                .weight(key.name())
                .map(|weight| value.as_f64() * weight)
        })
        .fold(0.0, |total, contribution| total + contribution);

    // `f64::min` would hide a NaN sum behind the cap.
    match cap {
        Some(cap) if !sum.is_nan() => sum.min(cap),
        _ => sum,
    }
}

/// Per-domain sub-scores (after capping) and their sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub social_score: f64,
    pub crypto_score: f64,
    pub nft_score: f64,
    pub community_score: f64,
    pub messaging_score: f64,
    pub total_score: f64,
}

impl ScoreBreakdown {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn domain(&self, domain: ScoreDomain) -> f64 {
        match domain {
            ScoreDomain::Social => self.social_score,
            ScoreDomain::Crypto => self.crypto_score,
            ScoreDomain::Nft => self.nft_score,
            ScoreDomain::Community => self.community_score,
            ScoreDomain::Messaging => self.messaging_score,
        }
    }

    fn set(&mut self, domain: ScoreDomain, value: f64) {
        let slot = match domain {
            ScoreDomain::Social => &mut self.social_score,
            ScoreDomain::Crypto => &mut self.crypto_score,
            ScoreDomain::Nft => &mut self.nft_score,
            ScoreDomain::Community => &mut self.community_score,
            ScoreDomain::Messaging => &mut self.messaging_score,
        };
        *slot = value;
    }
}

/// Score every domain that has a rule; domains without one score zero.
pub(crate) fn score_domains(
    metrics: &DomainMetrics,
    rules: &BTreeMap<ScoreDomain, DomainRule>,
) -> ScoreBreakdown {
    let mut breakdown = ScoreBreakdown::zero();
    let mut total = 0.0;

    for domain in ScoreDomain::ALL {
        let Some(rule) = rules.get(&domain) else {
            continue;
        };
        let record = MetricRecord::merged(
            domain
                .sources()
                .iter()
                .map(|source| metrics.record(*source)),
        );
        let value = score(&record, &rule.weights, rule.cap);
        breakdown.set(domain, value);
        total += value;
    }

    breakdown.total_score = total;
    breakdown
}
