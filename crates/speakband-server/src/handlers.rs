use std::sync::Arc;

use axum::{extract::State, Json};

use crate::dto::{
    AnalyzeBatchRequest, AnalyzeBatchResponse, AnalyzeRequest, AnalyzeResponse, HealthResponse,
};
use crate::error::ApiError;
use crate::state::AppState;

pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let report = state.analyzer.analyze(&req.text).await?;
    Ok(Json(AnalyzeResponse::from(report)))
}

pub async fn analyze_batch(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeBatchRequest>,
) -> Result<Json<AnalyzeBatchResponse>, ApiError> {
    let report = state.analyzer.run_test(&req.into()).await?;
    Ok(Json(AnalyzeBatchResponse::from(report)))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
