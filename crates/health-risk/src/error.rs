use crate::config::ConfigError;
use crate::narrative::NarrativeError;
use crate::regions::RegionDataError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

/// Body returned whenever region data cannot be produced. The underlying cause
/// is logged and never exposed to callers.
pub const REGION_DATA_FAILURE: &str = "Failed to process region data";

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Regions(RegionDataError),
    Narrative(NarrativeError),
    Serialization(serde_json::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Regions(err) => write!(f, "region data error: {}", err),
            AppError::Narrative(err) => write!(f, "narrative error: {}", err),
            AppError::Serialization(err) => write!(f, "serialization error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Regions(err) => Some(err),
            AppError::Narrative(err) => Some(err),
            AppError::Serialization(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Regions(RegionDataError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, "region not found".to_string())
            }
            AppError::Regions(err) => {
                tracing::error!(error = %err, "error processing regions");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    REGION_DATA_FAILURE.to_string(),
                )
            }
            AppError::Narrative(NarrativeError::InvalidInput { reason }) => {
                (StatusCode::BAD_REQUEST, reason.to_string())
            }
            AppError::Narrative(NarrativeError::Generation(_))
            | AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Serialization(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<RegionDataError> for AppError {
    fn from(value: RegionDataError) -> Self {
        Self::Regions(value)
    }
}

impl From<NarrativeError> for AppError {
    fn from(value: NarrativeError) -> Self {
        Self::Narrative(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn region_failures_hide_the_cause() {
        let err = AppError::from(RegionDataError::DataUnavailable {
            reason: "/srv/data/regions.json: permission denied".to_string(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body, json!({ "error": REGION_DATA_FAILURE }));
    }

    #[tokio::test]
    async fn unknown_region_maps_to_not_found() {
        let err = AppError::from(RegionDataError::NotFound {
            region_name: "Atlantis".to_string(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn empty_summary_input_is_a_bad_request() {
        let err = AppError::from(NarrativeError::InvalidInput {
            reason: "at least one region is required",
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "at least one region is required");
    }

    #[tokio::test]
    async fn serialization_failures_are_server_errors() {
        let cause = serde_json::from_str::<serde_json::Value>("{").expect_err("truncated json");
        let err = AppError::from(cause);
        assert!(err.to_string().starts_with("serialization error"));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
