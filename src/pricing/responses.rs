//! Response DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

use super::calculators::{AppliedMultipliers, PriceBreakdown, SelectedFeature};

/// Quick-estimate response
#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub project_type: String,
    pub base_price: Decimal,
    pub selected_features: Vec<SelectedFeature>,
    pub multipliers: AppliedMultipliers,
    pub custom_requirements: u32,
    pub custom_cost: Decimal,
    pub total_price: i64,
    pub currency: String,
    pub estimated_hours: Decimal,
    pub estimated_days: i64,
    pub breakdown: PriceBreakdown,
}

impl EstimateResponse {
    pub fn new(project_type: String, breakdown: PriceBreakdown) -> Self {
        Self {
            project_type,
            base_price: breakdown.base_price,
            selected_features: breakdown.selected_features.clone(),
            multipliers: breakdown.multipliers.clone(),
            custom_requirements: breakdown.custom_requirement_count,
            custom_cost: breakdown.custom_cost,
            total_price: breakdown.total_price,
            currency: breakdown.currency.clone(),
            estimated_hours: breakdown.estimated_hours,
            estimated_days: breakdown.estimated_days,
            breakdown,
        }
    }
}
