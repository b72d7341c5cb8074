use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{EvaluationRequest, UserId};
use crate::scoring::{Evaluation, SourceDomain};

/// Score given to a linked wallet that has never been the primary wallet.
pub const DEFAULT_WALLET_SCORE: f64 = 10.0;

/// Stored score for one linked wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletScore {
    pub address: String,
    pub score: f64,
    pub last_updated: DateTime<Utc>,
}

/// Awarded badge names grouped by the source they were earned from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainBadges {
    pub social: Vec<String>,
    pub wallet: Vec<String>,
    pub messaging: Vec<String>,
}

impl DomainBadges {
    pub fn from_evaluation(evaluation: &Evaluation) -> Self {
        let names = |domain| {
            evaluation
                .badges_from(domain)
                .into_iter()
                .map(str::to_string)
                .collect()
        };
        Self {
            social: names(SourceDomain::Social),
            wallet: names(SourceDomain::Wallet),
            messaging: names(SourceDomain::Messaging),
        }
    }
}

/// Persisted summary of a user's latest evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub user_id: UserId,
    pub email: Option<String>,
    pub social_score: f64,
    pub messaging_score: f64,
    pub total_score: f64,
    pub wallets: Vec<WalletScore>,
    pub badges: Vec<String>,
    #[serde(default)]
    pub domain_badges: DomainBadges,
    pub last_score_update: DateTime<Utc>,
}

impl ScoreRecord {
    pub fn new(user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            email: None,
            social_score: 0.0,
            messaging_score: 0.0,
            total_score: 0.0,
            wallets: Vec::new(),
            badges: Vec::new(),
            domain_badges: DomainBadges::default(),
            last_score_update: now,
        }
    }

    /// Fold an evaluation into the record.
    ///
    /// The primary wallet takes the crypto plus NFT score. Other wallets named
    /// by the request are added at [`DEFAULT_WALLET_SCORE`] when new and left
    /// untouched when already stored.
    pub fn apply(
        &mut self,
        request: &EvaluationRequest,
        evaluation: &Evaluation,
        now: DateTime<Utc>,
    ) {
        let scores = &evaluation.scores;
        self.social_score = scores.social_score;
        self.messaging_score = scores.messaging_score;
        self.total_score = scores.total_score;
        self.badges = evaluation.badges.keys().cloned().collect();
        self.domain_badges = DomainBadges::from_evaluation(evaluation);
        self.last_score_update = now;
        if let Some(email) = request.email() {
            self.email = Some(email.to_string());
        }

        let primary = request.primary_wallet();
        for address in request.wallets() {
            let is_primary = primary == Some(address);
            match self.wallet_mut(address) {
                Some(wallet) if is_primary => {
                    wallet.score = scores.crypto_score + scores.nft_score;
                    wallet.last_updated = now;
                }
                Some(_) => {}
                None => self.wallets.push(WalletScore {
                    address: address.to_string(),
                    score: if is_primary {
                        scores.crypto_score + scores.nft_score
                    } else {
                        DEFAULT_WALLET_SCORE
                    },
                    last_updated: now,
                }),
            }
        }
    }

    pub fn wallet(&self, address: &str) -> Option<&WalletScore> {
        self.wallets
            .iter()
            .find(|wallet| wallet.address.eq_ignore_ascii_case(address))
    }

    fn wallet_mut(&mut self, address: &str) -> Option<&mut WalletScore> {
        self.wallets
            .iter_mut()
            .find(|wallet| wallet.address.eq_ignore_ascii_case(address))
    }

    pub fn summary_view(&self) -> ScoreSummaryView {
        ScoreSummaryView {
            user_id: self.user_id.clone(),
            social_score: self.social_score,
            messaging_score: self.messaging_score,
            total_score: self.total_score,
            wallets: self.wallets.clone(),
            badges: self.badges.clone(),
            domain_badges: self.domain_badges.clone(),
            last_score_update: Some(self.last_score_update),
        }
    }
}

/// Storage abstraction so the service can be exercised in isolation.
pub trait ScoreRepository: Send + Sync {
    fn fetch(&self, user_id: &UserId) -> Result<Option<ScoreRecord>, RepositoryError>;
    fn save(&self, record: ScoreRecord) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Externally visible score summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSummaryView {
    pub user_id: UserId,
    pub social_score: f64,
    pub messaging_score: f64,
    pub total_score: f64,
    pub wallets: Vec<WalletScore>,
    pub badges: Vec<String>,
    pub domain_badges: DomainBadges,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_score_update: Option<DateTime<Utc>>,
}

impl ScoreSummaryView {
    /// Zero-valued summary for users that have never been scored.
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            social_score: 0.0,
            messaging_score: 0.0,
            total_score: 0.0,
            wallets: Vec::new(),
            badges: Vec::new(),
            domain_badges: DomainBadges::default(),
            last_score_update: None,
        }
    }
}
