//! Persisted quote models and lifecycle states.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::pricing::calculators::{Milestone, PriceBreakdown};
use crate::pricing::models::{Complexity, DesignTier, TimelineTier};

/// Quote lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    Draft,
    Sent,
    Viewed,
    Accepted,
    Rejected,
    Expired,
}

impl QuoteStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Viewed => "viewed",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Expired => "expired",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "draft" => Some(Self::Draft),
            "sent" => Some(Self::Sent),
            "viewed" => Some(Self::Viewed),
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            "expired" => Some(Self::Expired),
            _ => None,
        }
    }

    /// A client may decide only on a quote that has been delivered
    pub fn can_respond(self) -> bool {
        matches!(self, Self::Sent | Self::Viewed)
    }
}

impl std::fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Project description captured on the quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDetails {
    pub title: String,
    pub description: String,
    pub project_type: String,
    pub features: Vec<String>,
    pub design_type: DesignTier,
    pub complexity: Complexity,
}

/// Delivery timeline captured on the quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteTimeline {
    pub estimated_days: i64,
    pub deadline: Option<DateTime<Utc>>,
    pub urgency: TimelineTier,
}

/// Caller-supplied pricing adjustment line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostLine {
    pub label: String,
    pub amount: i64,
}

/// Tax applied to the adjusted total
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxLine {
    pub label: String,
    pub rate: Decimal,
    pub amount: i64,
}

/// Full pricing block persisted with the quote.
///
/// `total_amount` is the milestone-split figure: breakdown total plus
/// add-ons, minus discounts, plus tax.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotePricing {
    pub breakdown: PriceBreakdown,
    pub add_ons: Vec<CostLine>,
    pub discounts: Vec<CostLine>,
    pub taxes: Vec<TaxLine>,
    pub total_amount: i64,
}

/// Quote row from quotes
#[derive(Debug, Clone, FromRow)]
pub struct Quote {
    pub id: Uuid,
    pub quote_number: String,
    pub client_id: Uuid,
    pub project_details: Json<ProjectDetails>,
    pub timeline: Json<QuoteTimeline>,
    pub pricing: Json<QuotePricing>,
    pub milestones: Json<Vec<Milestone>>,
    pub terms: String,
    pub status: String,
    pub rejection_reason: Option<String>,
    pub valid_until: DateTime<Utc>,
    pub sent_at: Option<DateTime<Utc>>,
    pub viewed_at: Option<DateTime<Utc>>,
    pub responded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Quote {
    /// Stored lifecycle status, tolerating unknown values as draft
    pub fn stored_status(&self) -> QuoteStatus {
        QuoteStatus::parse(&self.status).unwrap_or(QuoteStatus::Draft)
    }

    /// Status as presented to clients.
    ///
    /// A quote past its validity window reads as expired. This is purely a
    /// read-time view; the stored status is never rewritten by the clock.
    pub fn effective_status(&self, now: DateTime<Utc>) -> QuoteStatus {
        if now > self.valid_until {
            QuoteStatus::Expired
        } else {
            self.stored_status()
        }
    }
}
