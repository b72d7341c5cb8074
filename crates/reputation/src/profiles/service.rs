use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::domain::{EvaluationRequest, RequestError, UserId};
use super::repository::{RepositoryError, ScoreRecord, ScoreRepository, ScoreSummaryView};
use super::sources::{collect_payloads, ProfileSources};
use crate::scoring::{DomainPayloads, Evaluation, ReputationEngine};

/// Service composing payload collection, the scoring engine, and persistence.
pub struct ReputationService<S, R> {
    sources: Arc<S>,
    repository: Arc<R>,
    engine: Arc<ReputationEngine>,
}

impl<S, R> ReputationService<S, R>
where
    S: ProfileSources + 'static,
    R: ScoreRepository + 'static,
{
    pub fn new(sources: Arc<S>, repository: Arc<R>, engine: ReputationEngine) -> Self {
        Self {
            sources,
            repository,
            engine: Arc::new(engine),
        }
    }

    pub fn engine(&self) -> &ReputationEngine {
        &self.engine
    }

    /// Validate, collect payloads, evaluate, and persist. Persistence failures
    /// are logged and do not fail the evaluation.
    pub async fn evaluate(
        &self,
        request: EvaluationRequest,
    ) -> Result<Evaluation, ReputationServiceError> {
        self.evaluate_at(request, Utc::now()).await
    }

    pub async fn evaluate_at(
        &self,
        request: EvaluationRequest,
        as_of: DateTime<Utc>,
    ) -> Result<Evaluation, ReputationServiceError> {
        request.validate()?;

        let payloads = collect_payloads(self.sources.as_ref(), &request).await;
        let evaluation = self.engine.evaluate(&payloads, as_of);

        if let Err(err) = self.persist(&request, &evaluation, as_of) {
            warn!(
                user = request.user_id.as_str(),
                error = %err,
                "failed to persist evaluation"
            );
        }

        info!(
            user = request.user_id.as_str(),
            total = evaluation.scores.total_score,
            badges = evaluation.badges.len(),
            title = %evaluation.title,
            "profile evaluated"
        );
        Ok(evaluation)
    }

    /// Score caller-supplied payloads without touching sources or storage.
    pub fn score_payloads(&self, payloads: &DomainPayloads, as_of: DateTime<Utc>) -> Evaluation {
        self.engine.evaluate(payloads, as_of)
    }

    /// Stored summary for a user, or a zero-valued summary when none exists.
    pub fn summary(&self, user_id: &UserId) -> Result<ScoreSummaryView, ReputationServiceError> {
        let record = self.repository.fetch(user_id)?;
        Ok(record
            .map(|record| record.summary_view())
            .unwrap_or_else(|| ScoreSummaryView::empty(user_id.clone())))
    }

    fn persist(
        &self,
        request: &EvaluationRequest,
        evaluation: &Evaluation,
        now: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let mut record = self
            .repository
            .fetch(&request.user_id)?
            .unwrap_or_else(|| ScoreRecord::new(request.user_id.clone(), now));
        record.apply(request, evaluation, now);
        self.repository.save(record)
    }
}

/// Error raised by the reputation service.
#[derive(Debug, thiserror::Error)]
pub enum ReputationServiceError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
