//! Request DTOs for pricing API endpoints.

use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use super::calculators::PriceSelection;
use super::models::{Complexity, DesignTier, TimelineTier};

/// Request for a quick price estimate
#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    pub client_id: Uuid,
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
}

impl EstimateRequest {
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

// Tier names are parsed fail-open at the request boundary: an unrecognized
// name degrades to the tier default instead of rejecting the request, so
// stale client option lists keep working.

pub(crate) fn de_complexity<'de, D>(deserializer: D) -> Result<Complexity, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Complexity::from_name(&String::deserialize(deserializer)?))
}

pub(crate) fn de_timeline<'de, D>(deserializer: D) -> Result<TimelineTier, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(TimelineTier::from_name(&String::deserialize(deserializer)?))
}

pub(crate) fn de_design<'de, D>(deserializer: D) -> Result<DesignTier, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(DesignTier::from_name(&String::deserialize(deserializer)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_request_defaults() {
        let request: EstimateRequest = serde_json::from_str(
            r#"{
                "client_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
                "project_type": "website"
            }"#,
        )
        .unwrap();

        assert_eq!(request.complexity, Complexity::Medium);
        assert_eq!(request.timeline, TimelineTier::Normal);
        assert_eq!(request.design_type, DesignTier::Custom);
        assert!(request.features.is_empty());
        assert!(request.custom_requirements.is_empty());
    }

    #[test]
    fn test_unknown_tier_names_fall_back() {
        let request: EstimateRequest = serde_json::from_str(
            r#"{
                "client_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
                "project_type": "website",
                "complexity": "galactic",
                "timeline": "yesterday",
                "design_type": "artisanal"
            }"#,
        )
        .unwrap();

        assert_eq!(request.complexity, Complexity::Medium);
        assert_eq!(request.timeline, TimelineTier::Normal);
        assert_eq!(request.design_type, DesignTier::Custom);
    }

    #[test]
    fn test_selection_counts_custom_requirements() {
        let request: EstimateRequest = serde_json::from_str(
            r#"{
                "client_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
                "project_type": "website",
                "custom_requirements": ["sso", "audit log"]
            }"#,
        )
        .unwrap();

        assert_eq!(request.selection().custom_requirement_count, 2);
    }
}
