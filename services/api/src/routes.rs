use crate::infra::AppState;
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use health_risk::error::AppError;
use health_risk::narrative::NarrativeText;
use health_risk::regions::ProcessedRegion;
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum NarrativeKind {
    Explanation,
    Alert,
    NationalSummary,
}

#[derive(Debug, Serialize)]
pub(crate) struct NarrativeResponse {
    pub(crate) region_name: Option<String>,
    pub(crate) kind: NarrativeKind,
    pub(crate) text: String,
    pub(crate) degraded: bool,
    pub(crate) generated_at: DateTime<Utc>,
}

impl NarrativeResponse {
    fn new(region_name: Option<String>, kind: NarrativeKind, narrative: NarrativeText) -> Self {
        Self {
            region_name,
            kind,
            text: narrative.text,
            degraded: narrative.degraded,
            generated_at: Utc::now(),
        }
    }
}

pub(crate) fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/regions", get(regions_endpoint))
        .route(
            "/api/regions/:region_name/explanation",
            get(region_explanation_endpoint),
        )
        .route("/api/regions/:region_name/alert", get(region_alert_endpoint))
        .route("/api/summary", get(national_summary_endpoint))
        .layer(Extension(state))
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

pub(crate) async fn regions_endpoint(
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<ProcessedRegion>>, AppError> {
    let regions = state.regions.load_processed_regions()?;
    Ok(Json(regions))
}

pub(crate) async fn region_explanation_endpoint(
    Extension(state): Extension<AppState>,
    Path(region_name): Path<String>,
) -> Result<Json<NarrativeResponse>, AppError> {
    let region = state.regions.find_region(&region_name)?;
    let narrative = NarrativeText::resolve(state.narrative.region_explanation(&region).await)?;

    Ok(Json(NarrativeResponse::new(
        Some(region.region_name),
        NarrativeKind::Explanation,
        narrative,
    )))
}

pub(crate) async fn region_alert_endpoint(
    Extension(state): Extension<AppState>,
    Path(region_name): Path<String>,
) -> Result<Json<NarrativeResponse>, AppError> {
    let region = state.regions.find_region(&region_name)?;
    let narrative = NarrativeText::resolve(state.narrative.alert_message(&region).await)?;

    Ok(Json(NarrativeResponse::new(
        Some(region.region_name),
        NarrativeKind::Alert,
        narrative,
    )))
}

pub(crate) async fn national_summary_endpoint(
    Extension(state): Extension<AppState>,
) -> Result<Json<NarrativeResponse>, AppError> {
    let regions = state.regions.load_processed_regions()?;
    let narrative = NarrativeText::resolve(state.narrative.national_summary(&regions).await)?;

    Ok(Json(NarrativeResponse::new(
        None,
        NarrativeKind::NationalSummary,
        narrative,
    )))
}
