//! Quote lifecycle services.
//!
//! Creation assembles pricing and milestones into a fully-formed quote;
//! the remaining functions drive its state machine through guarded
//! conditional updates.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use tracing::info;
use uuid::Uuid;

use crate::db;
use crate::error::{AppError, Result};
use crate::pricing::calculators::{compute_price, round_unit, split_into_milestones};
use crate::pricing::services::{preferred_currency, resolve_template};
use crate::AppState;

use super::models::{
    CostLine, ProjectDetails, Quote, QuotePricing, QuoteStatus, QuoteTimeline, TaxLine,
};
use super::queries;
use super::requests::CreateQuoteRequest;
use super::responses::{QuoteResponse, QuoteSummary};

/// Create and persist a formal quote.
///
/// Prices the request like an estimate, then applies caller-supplied
/// add-ons and discounts plus the configured tax, splits the adjusted
/// total into milestones, and persists the result under a fresh quote
/// number.
pub async fn create_quote(state: &AppState, request: &CreateQuoteRequest) -> Result<QuoteResponse> {
    let template = resolve_template(state, &request.project_type).await?;
    let currency = preferred_currency(state, request.client_id).await?;

    let breakdown = compute_price(
        &template,
        &request.selection(),
        &currency,
        &state.settings.currency_rates,
    );

    let add_ons: Vec<CostLine> = request
        .add_ons
        .iter()
        .map(|line| CostLine {
            label: line.label.clone(),
            amount: line.amount,
        })
        .collect();
    let discounts: Vec<CostLine> = request
        .discounts
        .iter()
        .map(|line| CostLine {
            label: line.label.clone(),
            amount: line.amount,
        })
        .collect();

    let adjusted = breakdown.total_price + add_ons.iter().map(|l| l.amount).sum::<i64>()
        - discounts.iter().map(|l| l.amount).sum::<i64>();
    let tax_amount = round_unit(Decimal::from(adjusted) * state.settings.tax_rate);
    let taxes = vec![TaxLine {
        label: "GST".to_string(),
        rate: state.settings.tax_rate,
        amount: tax_amount,
    }];
    let total_amount = adjusted + tax_amount;

    let milestones = split_into_milestones(total_amount, breakdown.estimated_days);

    let now = Utc::now();
    let quote_number = next_quote_number(state, now).await?;

    // Callers may create straight to `sent`; anything else starts as draft.
    let status = match request.status.as_deref() {
        Some("sent") => QuoteStatus::Sent,
        _ => QuoteStatus::Draft,
    };

    let quote = Quote {
        id: Uuid::new_v4(),
        quote_number,
        client_id: request.client_id,
        project_details: Json(ProjectDetails {
            title: request.title.clone(),
            description: request.description.clone(),
            project_type: request.project_type.clone(),
            features: request.features.clone(),
            design_type: request.design_type,
            complexity: request.complexity,
        }),
        timeline: Json(QuoteTimeline {
            estimated_days: breakdown.estimated_days,
            deadline: request.deadline,
            urgency: request.timeline,
        }),
        pricing: Json(QuotePricing {
            breakdown,
            add_ons,
            discounts,
            taxes,
            total_amount,
        }),
        milestones: Json(milestones.to_vec()),
        terms: request.terms.clone().unwrap_or_else(default_terms),
        status: status.as_str().to_string(),
        rejection_reason: None,
        valid_until: now + Duration::days(state.settings.quote_validity_days),
        sent_at: (status == QuoteStatus::Sent).then_some(now),
        viewed_at: None,
        responded_at: None,
        created_at: now,
    };

    queries::insert_quote(&state.db, &quote).await?;
    info!(
        quote_number = %quote.quote_number,
        total_amount,
        status = %status,
        "Quote created"
    );

    Ok(QuoteResponse::from_quote(quote, now))
}

/// Client read of a quote.
///
/// The first read of a `sent` quote marks it `viewed` and stamps
/// `viewed_at` once; later reads leave both untouched.
pub async fn view_quote(state: &AppState, id: Uuid, client_id: Uuid) -> Result<QuoteResponse> {
    let now = Utc::now();
    let mut quote = queries::get_client_quote(&state.db, id, client_id)
        .await?
        .ok_or(AppError::NotFound)?;

    if quote.stored_status() == QuoteStatus::Sent {
        let updated = queries::mark_viewed(&state.db, id, client_id, now).await?;
        if updated > 0 {
            quote.status = QuoteStatus::Viewed.as_str().to_string();
            quote.viewed_at = Some(now);
        } else {
            // Lost the race to a concurrent read; pick up its result.
            quote = queries::get_client_quote(&state.db, id, client_id)
                .await?
                .ok_or(AppError::NotFound)?;
        }
    }

    Ok(QuoteResponse::from_quote(quote, now))
}

/// List a client's quotes as summaries
pub async fn list_quotes(state: &AppState, client_id: Uuid) -> Result<Vec<QuoteSummary>> {
    let now = Utc::now();
    let quotes = queries::list_client_quotes(&state.db, client_id).await?;

    Ok(quotes
        .iter()
        .map(|quote| QuoteSummary::from_quote(quote, now))
        .collect())
}

/// Accept a delivered quote
pub async fn accept_quote(state: &AppState, id: Uuid, client_id: Uuid) -> Result<QuoteResponse> {
    decide(state, id, client_id, QuoteStatus::Accepted, None, "accept").await
}

/// Reject a delivered quote, keeping the stated reason
pub async fn reject_quote(
    state: &AppState,
    id: Uuid,
    client_id: Uuid,
    reason: Option<String>,
) -> Result<QuoteResponse> {
    decide(state, id, client_id, QuoteStatus::Rejected, reason, "reject").await
}

async fn decide(
    state: &AppState,
    id: Uuid,
    client_id: Uuid,
    new_status: QuoteStatus,
    reason: Option<String>,
    action: &'static str,
) -> Result<QuoteResponse> {
    let now = Utc::now();
    let updated = queries::record_decision(
        &state.db,
        id,
        client_id,
        new_status.as_str(),
        reason.as_deref(),
        now,
    )
    .await?;

    if updated == 0 {
        // Guard failed: report the current state without having touched it.
        let quote = queries::get_client_quote(&state.db, id, client_id)
            .await?
            .ok_or(AppError::NotFound)?;
        return Err(AppError::InvalidTransition {
            action,
            status: quote.stored_status().to_string(),
        });
    }

    let quote = queries::get_client_quote(&state.db, id, client_id)
        .await?
        .ok_or(AppError::NotFound)?;
    info!(
        quote_number = %quote.quote_number,
        status = %new_status,
        "Quote decision recorded"
    );

    Ok(QuoteResponse::from_quote(quote, now))
}

/// Build the next quote number from an atomically reserved sequence
async fn next_quote_number(state: &AppState, now: DateTime<Utc>) -> Result<String> {
    let sequence = db::next_quote_sequence(&state.db).await?;
    Ok(format!("WN-Q-{}-{:04}", now.timestamp_millis(), sequence))
}

fn default_terms() -> String {
    "Payment is due per milestone on delivery acceptance. This quote is valid \
     until the date shown; scope changes are quoted separately."
        .to_string()
}
