use crate::cli::ServeArgs;
use crate::infra::{AppState, FixtureSources, InMemoryScoreRepository};
use crate::routes::with_reputation_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use reputation::config::AppConfig;
use reputation::error::AppError;
use reputation::profiles::ReputationService;
use reputation::scoring::ReputationEngine;
use reputation::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let rules = config.scoring.rules()?;
    if config.sources.fixture_dir.is_none() {
        warn!("APP_FIXTURE_DIR not set; profile evaluations will use empty payloads");
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let sources = Arc::new(FixtureSources::new(config.sources.fixture_dir.clone()));
    let repository = Arc::new(InMemoryScoreRepository::default());
    let service = Arc::new(ReputationService::new(
        sources,
        repository,
        ReputationEngine::new(rules),
    ));

    let app = with_reputation_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        rules = ?config.scoring.rules_path,
        "reputation service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
