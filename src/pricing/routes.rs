//! Pricing route handlers

use axum::{extract::State, routing::post, Json, Router};

use crate::error::Result;
use crate::AppState;

use super::requests::EstimateRequest;
use super::responses::EstimateResponse;
use super::services;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/pricing/estimate", post(estimate))
}

/// Quick estimate endpoint
async fn estimate(
    State(state): State<AppState>,
    Json(request): Json<EstimateRequest>,
) -> Result<Json<EstimateResponse>> {
    let response = services::estimate(&state, &request).await?;
    Ok(Json(response))
}
