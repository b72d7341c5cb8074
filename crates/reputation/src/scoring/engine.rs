use super::badges::{assign_badges, definition, BadgeAward};
use super::metrics::{
    extract_messaging, extract_social, extract_wallet, DomainMetrics, SourceDomain,
};
use super::rules::ScoringRules;
use super::titles::resolve_title;
use super::weights::{score_domains, ScoreBreakdown, ScoreDomain};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, error, warn};

/// Raw provider payloads for one evaluation. Missing members read as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainPayloads {
    #[serde(default)]
    pub social: Value,
    #[serde(default)]
    pub wallet: Value,
    #[serde(default)]
    pub messaging_groups: Value,
    #[serde(default)]
    pub messaging_messages: Value,
}

/// Scores, awarded badges, and title for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub scores: ScoreBreakdown,
    pub badges: BTreeMap<String, BadgeAward>,
    pub title: String,
}

impl Evaluation {
    /// Zero scores, no badges, default title.
    pub fn fallback(default_title: &str) -> Self {
        Self {
            scores: ScoreBreakdown::zero(),
            badges: BTreeMap::new(),
            title: default_title.to_string(),
        }
    }

    /// Awarded badge names whose input comes from `domain`.
    pub fn badges_from(&self, domain: SourceDomain) -> Vec<&str> {
        self.badges
            .keys()
            .filter(|name| definition(name).map(|badge| badge.domain) == Some(domain))
            .map(String::as_str)
            .collect()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    #[error("{domain:?} score is not a finite number")]
    NonFiniteScore { domain: ScoreDomain },
    #[error("total score is not a finite number")]
    NonFiniteTotal,
}

/// Stateless evaluator applying a fixed rule set to raw payloads.
#[derive(Debug, Clone, Default)]
pub struct ReputationEngine {
    rules: ScoringRules,
}

impl ReputationEngine {
    pub fn new(rules: ScoringRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    /// Run the full pipeline. Never fails: any internal error or panic yields
    /// [`Evaluation::fallback`].
    pub fn evaluate(&self, payloads: &DomainPayloads, as_of: DateTime<Utc>) -> Evaluation {
        match panic::catch_unwind(AssertUnwindSafe(|| self.try_evaluate(payloads, as_of))) {
            Ok(Ok(evaluation)) => evaluation,
            Ok(Err(err)) => {
                warn!(error = %err, "evaluation degraded to fallback result");
                Evaluation::fallback(&self.rules.default_title)
            }
            Err(_) => {
                error!("evaluation panicked; returning fallback result");
                Evaluation::fallback(&self.rules.default_title)
            }
        }
    }

    fn try_evaluate(
        &self,
        payloads: &DomainPayloads,
        as_of: DateTime<Utc>,
    ) -> Result<Evaluation, EvaluationError> {
        let metrics = DomainMetrics {
            social: extract_social(&payloads.social, as_of),
            wallet: extract_wallet(&payloads.wallet),
            messaging: extract_messaging(&payloads.messaging_groups, &payloads.messaging_messages),
        };

        let scores = score_domains(&metrics, &self.rules.domains);
        if let Some(domain) = ScoreDomain::ALL
            .into_iter()
            .find(|domain| !scores.domain(*domain).is_finite())
        {
            return Err(EvaluationError::NonFiniteScore { domain });
        }
        if !scores.total_score.is_finite() {
            return Err(EvaluationError::NonFiniteTotal);
        }

        let badges = assign_badges(&metrics, &self.rules.thresholds);
        let title = resolve_title(&badges, &self.rules.titles, &self.rules.default_title);

        debug!(
            total = scores.total_score,
            badges = badges.len(),
            %title,
            "evaluation complete"
        );

        Ok(Evaluation {
            scores,
            badges,
            title,
        })
    }
}

/// Evaluate with the standard rules. Account age is measured at `as_of`.
pub fn evaluate(
    social: &Value,
    wallet: &Value,
    messaging_groups: &Value,
    messaging_messages: &Value,
    as_of: DateTime<Utc>,
) -> Evaluation {
    let payloads = DomainPayloads {
        social: social.clone(),
        wallet: wallet.clone(),
        messaging_groups: messaging_groups.clone(),
        messaging_messages: messaging_messages.clone(),
    };
    ReputationEngine::default().evaluate(&payloads, as_of)
}
