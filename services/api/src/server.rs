use crate::cli::ServeArgs;
use crate::infra::{region_dataset, AppState};
use crate::routes::app_router;
use axum_prometheus::PrometheusMetricLayer;
use health_risk::config::AppConfig;
use health_risk::error::AppError;
use health_risk::narrative::NarrativeService;
use health_risk::telemetry;
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
    if let Some(path) = args.regions.take() {
        config.data.regions_path = Some(path);
    }

    telemetry::init(&config.telemetry)?;

    if config.narrative.api_key.is_none() {
        warn!("GEMINI_API_KEY not set; narrative endpoints will return fallback text");
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let regions = region_dataset(&config);
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        regions: regions.clone(),
        narrative: NarrativeService::from_config(&config.narrative)?,
    };

    let app = app_router(app_state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        regions = %regions.describe(),
        model = %config.narrative.model,
        "regional health risk service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
