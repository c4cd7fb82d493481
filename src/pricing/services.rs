//! Pricing service functions with database access.
//!
//! These functions resolve the rate catalog and client preferences, then
//! hand off to the pure calculators.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::db;
use crate::error::{AppError, Result};
use crate::AppState;

use super::calculators;
use super::models::RateTemplate;
use super::queries;
use super::requests::EstimateRequest;
use super::responses::EstimateResponse;

/// Compute a quick estimate for a client request.
///
/// Fails with `TemplateNotFound` when no active template covers the
/// project type; that surfaces to the client as "not available for this
/// project type" and is never retried.
pub async fn estimate(state: &AppState, request: &EstimateRequest) -> Result<EstimateResponse> {
    let template = resolve_template(state, &request.project_type).await?;
    let currency = preferred_currency(state, request.client_id).await?;

    let breakdown = calculators::compute_price(
        &template,
        &request.selection(),
        &currency,
        &state.settings.currency_rates,
    );

    info!(
        project_type = %request.project_type,
        total_price = breakdown.total_price,
        currency = %breakdown.currency,
        "Estimate computed"
    );

    Ok(EstimateResponse::new(request.project_type.clone(), breakdown))
}

/// Fetch the active template for a project type, trying the cache first
pub async fn resolve_template(state: &AppState, project_type: &str) -> Result<Arc<RateTemplate>> {
    if let Some(cached) = state.cache.templates.get(project_type).await {
        return Ok(cached);
    }

    let template = queries::find_active_template(&state.db, project_type)
        .await?
        .ok_or_else(|| AppError::TemplateNotFound(project_type.to_string()))?;

    let template = Arc::new(template);
    state
        .cache
        .templates
        .insert(project_type.to_string(), template.clone())
        .await;

    Ok(template)
}

/// Preferred display currency for a client, cached
pub async fn preferred_currency(state: &AppState, client_id: Uuid) -> Result<String> {
    if let Some(cached) = state.cache.currencies.get(&client_id).await {
        return Ok(cached);
    }

    let code = db::get_preferred_currency(&state.db, client_id).await?;
    state.cache.currencies.insert(client_id, code.clone()).await;

    Ok(code)
}
