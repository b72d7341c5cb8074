use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use reputation::profiles::{
    reputation_router, ProfileSources, ReputationService, ScoreRepository,
};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_reputation_routes<S, R>(service: Arc<ReputationService<S, R>>) -> axum::Router
where
    S: ProfileSources + 'static,
    R: ScoreRepository + 'static,
{
    reputation_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::tests::{fixture_root, write_fixture};
    use crate::infra::{FixtureSources, InMemoryScoreRepository};
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use reputation::scoring::ReputationEngine;
    use serde_json::{json, Value};
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tower::ServiceExt;

    fn app_state(ready: bool) -> AppState {
        let recorder = PrometheusBuilder::new().build_recorder();
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(recorder.handle()),
        }
    }

    fn app(root: Option<PathBuf>, state: AppState) -> axum::Router {
        let service = Arc::new(ReputationService::new(
            Arc::new(FixtureSources::new(root)),
            Arc::new(InMemoryScoreRepository::default()),
            ReputationEngine::default(),
        ));
        with_reputation_routes(service).layer(Extension(state))
    }

    async fn read_json_body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        serde_json::from_slice(&bytes).expect("valid json")
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn readiness_tracks_the_shared_flag() {
        let state = app_state(false);
        let response = readiness_endpoint(Extension(state.clone()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        state.readiness.store(true, Ordering::Release);
        let response = readiness_endpoint(Extension(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn metrics_endpoint_serves_prometheus_text() {
        let response = app(None, app_state(true))
            .oneshot(
                Request::get("/metrics")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
    }

    #[tokio::test]
    async fn evaluate_route_reads_fixture_payloads() {
        let root = fixture_root("routes");
        write_fixture(
            &root,
            "wallet",
            "0xfeed",
            &json!({
                "Active Chains Result": { "activeChains": ["ethereum", "polygon"] },
                "Wallet NFTs Result": [{}, {}, {}, {}]
            }),
        );
        let router = app(Some(root.clone()), app_state(true));

        let response = router
            .clone()
            .oneshot(
                Request::post("/api/v1/reputation/evaluate")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({
                            "user_id": "user-7",
                            "social_handle": "missing-handle",
                            "wallet_addresses": ["0xfeed"]
                        })
                        .to_string(),
                    ))
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["scores"]["cryptoScore"], 10.0);
        assert_eq!(payload["scores"]["nftScore"], 20.0);
        assert_eq!(payload["scores"]["socialScore"], 0.0);

        let response = router
            .oneshot(
                Request::get("/api/v1/reputation/user-7")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");
        let summary = read_json_body(response).await;
        assert_eq!(summary["wallets"][0]["address"], "0xfeed");
        assert_eq!(summary["wallets"][0]["score"], 30.0);

        std::fs::remove_dir_all(root).ok();
    }
}
