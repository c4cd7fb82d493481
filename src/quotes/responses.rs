//! Response DTOs for quote API endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::pricing::calculators::Milestone;

use super::models::{ProjectDetails, Quote, QuotePricing, QuoteStatus, QuoteTimeline};

/// Full quote representation returned to clients
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub id: Uuid,
    pub quote_number: String,
    pub client_id: Uuid,
    pub project_details: ProjectDetails,
    pub timeline: QuoteTimeline,
    pub pricing: QuotePricing,
    pub milestones: Vec<Milestone>,
    pub terms: String,
    /// Effective status: reads as `expired` past the validity date
    pub status: QuoteStatus,
    pub rejection_reason: Option<String>,
    pub valid_until: DateTime<Utc>,
    pub sent_at: Option<DateTime<Utc>>,
    pub viewed_at: Option<DateTime<Utc>>,
    pub responded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl QuoteResponse {
    pub fn from_quote(quote: Quote, now: DateTime<Utc>) -> Self {
        let status = quote.effective_status(now);
        Self {
            id: quote.id,
            quote_number: quote.quote_number,
            client_id: quote.client_id,
            project_details: quote.project_details.0,
            timeline: quote.timeline.0,
            pricing: quote.pricing.0,
            milestones: quote.milestones.0,
            terms: quote.terms,
            status,
            rejection_reason: quote.rejection_reason,
            valid_until: quote.valid_until,
            sent_at: quote.sent_at,
            viewed_at: quote.viewed_at,
            responded_at: quote.responded_at,
            created_at: quote.created_at,
        }
    }
}

/// Summary row for quote listings
#[derive(Debug, Serialize)]
pub struct QuoteSummary {
    pub id: Uuid,
    pub quote_number: String,
    pub title: String,
    pub total_amount: i64,
    pub currency: String,
    pub status: QuoteStatus,
    pub valid_until: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl QuoteSummary {
    pub fn from_quote(quote: &Quote, now: DateTime<Utc>) -> Self {
        Self {
            id: quote.id,
            quote_number: quote.quote_number.clone(),
            title: quote.project_details.0.title.clone(),
            total_amount: quote.pricing.0.total_amount,
            currency: quote.pricing.0.breakdown.currency.clone(),
            status: quote.effective_status(now),
            valid_until: quote.valid_until,
            created_at: quote.created_at,
        }
    }
}
