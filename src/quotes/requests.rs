//! Request DTOs for quote API endpoints.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::pricing::calculators::PriceSelection;
use crate::pricing::models::{Complexity, DesignTier, TimelineTier};
use crate::pricing::requests::{de_complexity, de_design, de_timeline};

/// Request to create a formal quote
#[derive(Debug, Deserialize)]
pub struct CreateQuoteRequest {
    pub client_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub project_type: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default, deserialize_with = "de_complexity")]
    pub complexity: Complexity,
    #[serde(default, deserialize_with = "de_timeline")]
    pub timeline: TimelineTier,
    #[serde(default, deserialize_with = "de_design")]
    pub design_type: DesignTier,
    #[serde(default)]
    pub custom_requirements: Vec<String>,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub add_ons: Vec<CostLineRequest>,
    #[serde(default)]
    pub discounts: Vec<CostLineRequest>,
    #[serde(default)]
    pub terms: Option<String>,
    /// `draft` or `sent`; anything else is created as a draft
    #[serde(default)]
    pub status: Option<String>,
}

impl CreateQuoteRequest {
    pub fn selection(&self) -> PriceSelection {
        PriceSelection {
            features: self.features.clone(),
            complexity: self.complexity,
            timeline: self.timeline,
            design: self.design_type,
            custom_requirement_count: self.custom_requirements.len() as u32,
        }
    }
}

/// Pricing adjustment line in a creation request
#[derive(Debug, Deserialize)]
pub struct CostLineRequest {
    pub label: String,
    pub amount: i64,
}

/// Client acceptance of a quote
#[derive(Debug, Deserialize)]
pub struct AcceptQuoteRequest {
    pub client_id: Uuid,
}

/// Client rejection of a quote
#[derive(Debug, Deserialize)]
pub struct RejectQuoteRequest {
    pub client_id: Uuid,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Query parameters identifying the requesting client
#[derive(Debug, Deserialize)]
pub struct ClientQuery {
    pub client_id: Uuid,
}
