use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use super::domain::{EvaluationRequest, UserId};
use super::repository::ScoreRepository;
use super::service::{ReputationService, ReputationServiceError};
use super::sources::ProfileSources;
use crate::scoring::DomainPayloads;

/// Raw payloads plus an optional evaluation instant.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoreRequest {
    #[serde(flatten)]
    pub payloads: DomainPayloads,
    #[serde(default)]
    pub as_of: Option<DateTime<Utc>>,
}

/// Router builder exposing the evaluation and summary endpoints.
pub fn reputation_router<S, R>(service: Arc<ReputationService<S, R>>) -> Router
where
    S: ProfileSources + 'static,
    R: ScoreRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/reputation/evaluate",
            post(evaluate_handler::<S, R>),
        )
        .route("/api/v1/reputation/score", post(score_handler::<S, R>))
        .route("/api/v1/reputation/:user_id", get(summary_handler::<S, R>))
        .with_state(service)
}

pub(crate) async fn evaluate_handler<S, R>(
    State(service): State<Arc<ReputationService<S, R>>>,
    axum::Json(request): axum::Json<EvaluationRequest>,
) -> Response
where
    S: ProfileSources + 'static,
    R: ScoreRepository + 'static,
{
    match service.evaluate(request).await {
        Ok(evaluation) => (StatusCode::OK, axum::Json(evaluation)).into_response(),
        Err(ReputationServiceError::Request(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn score_handler<S, R>(
    State(service): State<Arc<ReputationService<S, R>>>,
    axum::Json(request): axum::Json<ScoreRequest>,
) -> Response
where
    S: ProfileSources + 'static,
    R: ScoreRepository + 'static,
{
    let as_of = request.as_of.unwrap_or_else(Utc::now);
    let evaluation = service.score_payloads(&request.payloads, as_of);
    (StatusCode::OK, axum::Json(evaluation)).into_response()
}

pub(crate) async fn summary_handler<S, R>(
    State(service): State<Arc<ReputationService<S, R>>>,
    Path(user_id): Path<String>,
) -> Response
where
    S: ProfileSources + 'static,
    R: ScoreRepository + 'static,
{
    match service.summary(&UserId(user_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
