//! Report endpoints
//!
//! - `GET /health` - liveness, no authentication
//! - `GET /reports` - zip with both partner workbooks
//! - `GET /reports-json` - base records as JSON
//! - `GET /reports-iqvia` - IQVIA sheets as JSON
//! - `GET /reports-closeup` - CLOSEUP sheets as JSON

use super::AppState;
use crate::domain::{ReportError, ReportFormat};
use crate::log_error_with_context;
use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

const INTERNAL_ERROR: &str = "Error interno del servidor";

/// Failure modes of a report endpoint
#[derive(Debug)]
pub enum ApiError {
    /// The period has no data
    NoData(&'static str),
    Report(ReportError),
}

impl From<ReportError> for ApiError {
    fn from(error: ReportError) -> Self {
        ApiError::Report(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NoData(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
            }
            ApiError::Report(ReportError::UnsupportedFormat(format)) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": format!("Formato no soportado: {format}") })),
            )
                .into_response(),
            ApiError::Report(error) => {
                log_error_with_context!(&error, "Report request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": INTERNAL_ERROR })),
                )
                    .into_response()
            }
        }
    }
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn reports_archive(State(state): State<AppState>) -> Result<Response, ApiError> {
    let archive = state
        .coordinator
        .build_archive()
        .await?
        .ok_or(ApiError::NoData("No hay datos para generar los reportes."))?;

    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", archive.name))
        .map_err(|e| ReportError::Packaging(format!("invalid archive name: {e}")))?;

    tracing::debug!(
        archive = %archive.name,
        files = archive.entry_count(),
        bytes = archive.byte_len(),
        "Sending report archive"
    );

    Ok((
        [
            (CONTENT_TYPE, HeaderValue::from_static("application/zip")),
            (CONTENT_DISPOSITION, disposition),
        ],
        archive.bytes,
    )
        .into_response())
}

pub async fn reports_json(State(state): State<AppState>) -> Result<Response, ApiError> {
    let base = state.coordinator.base_records().await?;
    if base.is_empty() {
        return Err(ApiError::NoData("No hay datos para generar el reporte."));
    }
    Ok(Json(base).into_response())
}

pub async fn reports_iqvia(State(state): State<AppState>) -> Result<Response, ApiError> {
    format_report(&state, ReportFormat::Iqvia, "No hay datos para generar el reporte IQVIA.").await
}

pub async fn reports_closeup(State(state): State<AppState>) -> Result<Response, ApiError> {
    format_report(
        &state,
        ReportFormat::Closeup,
        "No hay datos para generar el reporte CLOSEUP.",
    )
    .await
}

async fn format_report(
    state: &AppState,
    format: ReportFormat,
    no_data: &'static str,
) -> Result<Response, ApiError> {
    let bundle = state.coordinator.report_bundle(format).await?;
    if bundle.is_empty() {
        return Err(ApiError::NoData(no_data));
    }
    Ok(Json(bundle).into_response())
}
