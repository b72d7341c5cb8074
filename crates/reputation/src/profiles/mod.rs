//! Collaborators around the scoring core: request validation, payload
//! collection, score persistence, and the HTTP surface.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
pub mod sources;

#[cfg(test)]
mod tests;

pub use domain::{EvaluationRequest, RequestError, UserId};
pub use repository::{
    DomainBadges, RepositoryError, ScoreRecord, ScoreRepository, ScoreSummaryView, WalletScore,
    DEFAULT_WALLET_SCORE,
};
pub use router::{reputation_router, ScoreRequest};
pub use service::{ReputationService, ReputationServiceError};
pub use sources::{collect_payloads, MessagingPayloads, ProfileSources, SourceError};
