//! Rate catalog models and pricing tiers.
//!
//! Templates are stored with JSONB feature and multiplier tables and
//! decoded into typed records here. Tier names arriving from clients are
//! parsed fail-open: unrecognized names degrade to the tier default so a
//! stale option list never breaks an estimate.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Project complexity tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    #[default]
    Medium,
    Complex,
    Enterprise,
}

impl Complexity {
    /// Parse a tier name, falling back to the default for unknown values
    pub fn from_name(name: &str) -> Self {
        match name {
            "simple" => Self::Simple,
            "medium" => Self::Medium,
            "complex" => Self::Complex,
            "enterprise" => Self::Enterprise,
            _ => Self::default(),
        }
    }

    /// Productive hours per working day at this tier.
    ///
    /// More complex projects lose more of each day to coordination, so
    /// fewer estimate-hours fit into a day.
    pub fn hours_per_day(self) -> Decimal {
        match self {
            Self::Simple => Decimal::from(8),
            Self::Medium => Decimal::from(6),
            Self::Complex => Decimal::from(4),
            Self::Enterprise => Decimal::from(3),
        }
    }
}

/// Delivery timeline tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineTier {
    Rush,
    #[default]
    Normal,
    Flexible,
}

impl TimelineTier {
    pub fn from_name(name: &str) -> Self {
        match name {
            "rush" => Self::Rush,
            "normal" => Self::Normal,
            "flexible" => Self::Flexible,
            _ => Self::default(),
        }
    }
}

/// Design work tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesignTier {
    Template,
    #[default]
    Custom,
    Premium,
}

impl DesignTier {
    pub fn from_name(name: &str) -> Self {
        match name {
            "template" => Self::Template,
            "custom" => Self::Custom,
            "premium" => Self::Premium,
            _ => Self::default(),
        }
    }
}

/// Multiplier table keyed by complexity tier.
///
/// A tier missing from the table multiplies by 1.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplexityMultipliers {
    pub simple: Option<Decimal>,
    pub medium: Option<Decimal>,
    pub complex: Option<Decimal>,
    pub enterprise: Option<Decimal>,
}

impl ComplexityMultipliers {
    pub fn for_tier(&self, tier: Complexity) -> Decimal {
        match tier {
            Complexity::Simple => self.simple,
            Complexity::Medium => self.medium,
            Complexity::Complex => self.complex,
            Complexity::Enterprise => self.enterprise,
        }
        .unwrap_or(Decimal::ONE)
    }
}

/// Multiplier table keyed by timeline tier
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineMultipliers {
    pub rush: Option<Decimal>,
    pub normal: Option<Decimal>,
    pub flexible: Option<Decimal>,
}

impl TimelineMultipliers {
    pub fn for_tier(&self, tier: TimelineTier) -> Decimal {
        match tier {
            TimelineTier::Rush => self.rush,
            TimelineTier::Normal => self.normal,
            TimelineTier::Flexible => self.flexible,
        }
        .unwrap_or(Decimal::ONE)
    }
}

/// Multiplier table keyed by design tier
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignMultipliers {
    pub template: Option<Decimal>,
    pub custom: Option<Decimal>,
    pub premium: Option<Decimal>,
}

impl DesignMultipliers {
    pub fn for_tier(&self, tier: DesignTier) -> Decimal {
        match tier {
            DesignTier::Template => self.template,
            DesignTier::Custom => self.custom,
            DesignTier::Premium => self.premium,
        }
        .unwrap_or(Decimal::ONE)
    }
}

/// One optional feature in a rate template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureRate {
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub estimated_hours: Decimal,
    #[serde(default)]
    pub is_required: bool,
}

/// Rate template row from rate_templates
#[derive(Debug, Clone, FromRow)]
pub struct RateTemplate {
    pub id: Uuid,
    pub project_type: String,
    pub base_price: Decimal,
    pub features: Json<Vec<FeatureRate>>,
    pub complexity_multipliers: Json<ComplexityMultipliers>,
    pub timeline_multipliers: Json<TimelineMultipliers>,
    pub design_multipliers: Json<DesignMultipliers>,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

impl RateTemplate {
    /// Look up a feature by name (names are unique within a template)
    pub fn feature(&self, name: &str) -> Option<&FeatureRate> {
        self.features.0.iter().find(|f| f.name == name)
    }
}
