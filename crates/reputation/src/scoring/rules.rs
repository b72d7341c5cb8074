use super::badges::{self, BadgeThresholdTable};
use super::titles::{standard_titles, TitleRule, DEFAULT_TITLE};
use super::weights::{DomainRule, ScoreDomain, WeightTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Complete tuning for an evaluation: weights, caps, badge cutoffs, titles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRules {
    pub domains: BTreeMap<ScoreDomain, DomainRule>,
    pub thresholds: BadgeThresholdTable,
    pub titles: Vec<TitleRule>,
    #[serde(default = "default_title")]
    pub default_title: String,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self::standard()
    }
}

impl ScoringRules {
    /// Canonical tables. Totals sum the per-domain sub-scores after capping.
    pub fn standard() -> Self {
        let mut domains = BTreeMap::new();
        domains.insert(
            ScoreDomain::Social,
            DomainRule {
                weights: WeightTable::from_iter([
                    ("followers", 0.001),
                    ("retweets", 0.005),
                    ("quotes", 0.005),
                    ("replies", 0.002),
                    ("engagement", 0.0001),
                    ("verified", 5.0),
                    ("statuses", 0.001),
                    ("subscriptions", 2.0),
                    ("accountAge", 0.1),
                    ("media", 0.01),
                    ("pinned", 5.0),
                    ("friends", 0.001),
                    ("listed", 0.01),
                    ("superFollow", 5.0),
                ]),
                cap: Some(50.0),
            },
        );
        domains.insert(
            ScoreDomain::Crypto,
            DomainRule {
                weights: WeightTable::from_iter([
                    ("activeChains", 5.0),
                    ("nativeBalance", 10.0),
                    ("tokenHoldings", 2.0),
                    ("defiPositions", 5.0),
                    ("web3Domains", 5.0),
                    ("transactionCount", 0.01),
                    ("uniqueTokenInteractions", 1.0),
                ]),
                cap: Some(40.0),
            },
        );
        domains.insert(
            ScoreDomain::Nft,
            DomainRule {
                weights: WeightTable::from_iter([("nftHoldings", 5.0)]),
                cap: Some(30.0),
            },
        );
        domains.insert(
            ScoreDomain::Community,
            DomainRule {
                weights: WeightTable::from_iter([("subscriptions", 2.0), ("groupCount", 2.0)]),
                cap: Some(20.0),
            },
        );
        domains.insert(
            ScoreDomain::Messaging,
            DomainRule {
                weights: WeightTable::from_iter([
                    ("groupCount", 2.0),
                    ("messageCount", 0.1),
                    ("pinnedMessages", 5.0),
                    ("mediaMessages", 2.0),
                    ("hashtags", 1.0),
                    ("polls", 2.0),
                    ("leadership", 5.0),
                    ("botInteractions", 1.0),
                    ("stickerMessages", 0.5),
                    ("gifMessages", 0.5),
                    ("mentionCount", 1.0),
                ]),
                cap: Some(15.0),
            },
        );

        Self {
            domains,
            thresholds: BadgeThresholdTable::standard(),
            titles: standard_titles(),
            default_title: default_title(),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, ScoringRulesError> {
        let rules: Self = serde_json::from_str(raw).map_err(ScoringRulesError::Format)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn from_path(path: &Path) -> Result<Self, ScoringRulesError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ScoringRulesError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Reject references to badges outside the catalog so thresholds and title
    /// requirements cannot drift from the badges that actually exist.
    pub fn validate(&self) -> Result<(), ScoringRulesError> {
        if self.default_title.trim().is_empty() {
            return Err(ScoringRulesError::EmptyDefaultTitle);
        }

        if let Some(name) = self
            .thresholds
            .names()
            .find(|name| badges::definition(name).is_none())
        {
            return Err(ScoringRulesError::UnknownBadge {
                badge: name.to_string(),
                context: "thresholds".to_string(),
            });
        }

        for rule in &self.titles {
            if rule.required.is_empty() {
                return Err(ScoringRulesError::EmptyTitleRequirement {
                    title: rule.title.clone(),
                });
            }
            if let Some(name) = rule
                .required
                .iter()
                .find(|name| badges::definition(name).is_none())
            {
                return Err(ScoringRulesError::UnknownBadge {
                    badge: name.clone(),
                    context: format!("title '{}'", rule.title),
                });
            }
        }

        for (domain, rule) in &self.domains {
            if let Some(cap) = rule.cap {
                if !cap.is_finite() {
                    return Err(ScoringRulesError::InvalidCap { domain: *domain });
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScoringRulesError {
    #[error("unable to read scoring rules from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid scoring rules document: {0}")]
    Format(serde_json::Error),
    #[error("unknown badge '{badge}' referenced by {context}")]
    UnknownBadge { badge: String, context: String },
    #[error("title '{title}' has no required badges")]
    EmptyTitleRequirement { title: String },
    #[error("cap for {domain:?} must be a finite number")]
    InvalidCap { domain: ScoreDomain },
    #[error("default title must not be empty")]
    EmptyDefaultTitle,
}
