//! Quote route handlers

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::error::Result;
use crate::AppState;

use super::requests::{AcceptQuoteRequest, ClientQuery, CreateQuoteRequest, RejectQuoteRequest};
use super::responses::{QuoteResponse, QuoteSummary};
use super::services;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/quotes", post(create).get(list))
        .route("/api/quotes/:id", get(view))
        .route("/api/quotes/:id/accept", post(accept))
        .route("/api/quotes/:id/reject", post(reject))
}

/// Create a formal quote
async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateQuoteRequest>,
) -> Result<Json<QuoteResponse>> {
    let response = services::create_quote(&state, &request).await?;
    Ok(Json(response))
}

/// Client read of a quote; first read of a sent quote marks it viewed
async fn view(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ClientQuery>,
) -> Result<Json<QuoteResponse>> {
    let response = services::view_quote(&state, id, query.client_id).await?;
    Ok(Json(response))
}

/// List a client's quotes
async fn list(
    State(state): State<AppState>,
    Query(query): Query<ClientQuery>,
) -> Result<Json<Vec<QuoteSummary>>> {
    let response = services::list_quotes(&state, query.client_id).await?;
    Ok(Json(response))
}

/// Accept a delivered quote
async fn accept(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AcceptQuoteRequest>,
) -> Result<Json<QuoteResponse>> {
    let response = services::accept_quote(&state, id, request.client_id).await?;
    Ok(Json(response))
}

/// Reject a delivered quote with an optional reason
async fn reject(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RejectQuoteRequest>,
) -> Result<Json<QuoteResponse>> {
    let response =
        services::reject_quote(&state, id, request.client_id, request.reason).await?;
    Ok(Json(response))
}
