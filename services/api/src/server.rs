use crate::cli::ServeArgs;
use crate::infra::{seed_sample_jobs, AppState, InMemoryCandidateStore, TracingChannel};
use crate::routes::with_candidate_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

use staffroom::config::AppConfig;
use staffroom::error::AppError;
use staffroom::telemetry;
use staffroom::workflows::candidates::{CandidatePipelineService, DispatchConfig};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(InMemoryCandidateStore::default());
    if args.seed_demo {
        seed_sample_jobs(&store);
        info!("seeded sample postings");
    }
    let channel = Arc::new(TracingChannel);
    let service = Arc::new(CandidatePipelineService::new(
        store,
        channel,
        DispatchConfig {
            sender: config.notify.sender.clone(),
        },
    ));

    let app = with_candidate_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "candidate pipeline service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
