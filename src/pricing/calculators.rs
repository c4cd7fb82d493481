//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no database access.
//! The order of operations inside `compute_price` is load-bearing:
//! feature summation, then the tier multipliers, then the custom
//! requirement surcharge, then currency conversion and rounding.
//! Reordering changes rounding outcomes.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::CurrencyRates;
use crate::pricing::models::{Complexity, DesignTier, RateTemplate, TimelineTier};

/// Baseline engineering hours before any feature is added
const BASE_HOURS: i64 = 40;

/// Round a monetary amount to the nearest whole currency unit.
///
/// Midpoints round away from zero.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use worknest_pricing::pricing::round_unit;
///
/// assert_eq!(round_unit(dec!(2.5)), 3);
/// assert_eq!(round_unit(dec!(2.4)), 2);
/// assert_eq!(round_unit(dec!(-2.5)), -3);
/// ```
pub fn round_unit(amount: Decimal) -> i64 {
    amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
}

/// Convert an amount in the base currency to a display currency.
///
/// Unrecognized codes convert at 1:1 (see `CurrencyRates::rate_for`).
pub fn convert_currency(amount: Decimal, currency: &str, rates: &CurrencyRates) -> Decimal {
    amount * rates.rate_for(currency)
}

/// Normalized pricing inputs after tier parsing
#[derive(Debug, Clone)]
pub struct PriceSelection {
    pub features: Vec<String>,
    pub complexity: Complexity,
    pub timeline: TimelineTier,
    pub design: DesignTier,
    pub custom_requirement_count: u32,
}

/// A template feature matched by the selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedFeature {
    pub name: String,
    pub price: Decimal,
    pub estimated_hours: Decimal,
}

/// The multipliers resolved for a computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppliedMultipliers {
    pub complexity: Decimal,
    pub timeline: Decimal,
    pub design: Decimal,
}

/// Transient result of a price computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub base_price: Decimal,
    pub selected_features: Vec<SelectedFeature>,
    pub multipliers: AppliedMultipliers,
    pub custom_requirement_count: u32,
    /// Surcharge for custom requirements, in the base currency
    pub custom_cost: Decimal,
    /// Price after multipliers and surcharge, before currency conversion
    pub subtotal: Decimal,
    pub currency: String,
    /// Converted and rounded to whole currency units
    pub total_price: i64,
    pub estimated_hours: Decimal,
    pub estimated_days: i64,
}

/// Compute a full price breakdown for a selection against a template.
///
/// Feature names that do not match the template are dropped silently;
/// clients may hold stale feature lists. Timeline and design tiers scale
/// the price but not the hours: deadline pressure and design polish change
/// what the work costs, not how long it takes.
pub fn compute_price(
    template: &RateTemplate,
    selection: &PriceSelection,
    currency: &str,
    rates: &CurrencyRates,
) -> PriceBreakdown {
    let mut price = template.base_price;
    let mut hours = Decimal::from(BASE_HOURS);
    let mut selected = Vec::new();

    for name in &selection.features {
        if let Some(feature) = template.feature(name) {
            price += feature.price;
            hours += feature.estimated_hours;
            selected.push(SelectedFeature {
                name: feature.name.clone(),
                price: feature.price,
                estimated_hours: feature.estimated_hours,
            });
        }
    }

    let complexity_mult = template.complexity_multipliers.for_tier(selection.complexity);
    let timeline_mult = template.timeline_multipliers.for_tier(selection.timeline);
    let design_mult = template.design_multipliers.for_tier(selection.design);

    price = price * complexity_mult * timeline_mult * design_mult;
    hours *= complexity_mult;

    // 10% of the running price per custom requirement
    let custom_cost =
        price * Decimal::new(1, 1) * Decimal::from(selection.custom_requirement_count);
    price += custom_cost;

    let total_price = round_unit(convert_currency(price, currency, rates));

    let estimated_days = (hours / selection.complexity.hours_per_day())
        .ceil()
        .to_i64()
        .unwrap_or(0);

    PriceBreakdown {
        base_price: template.base_price,
        selected_features: selected,
        multipliers: AppliedMultipliers {
            complexity: complexity_mult,
            timeline: timeline_mult,
            design: design_mult,
        },
        custom_requirement_count: selection.custom_requirement_count,
        custom_cost,
        subtotal: price,
        currency: currency.to_string(),
        total_price,
        estimated_hours: hours,
        estimated_days,
    }
}

/// One payment/delivery phase of a quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    pub title: String,
    pub description: String,
    pub deliverables: Vec<String>,
    pub estimated_days: i64,
    pub amount: i64,
}

/// Split a quoted total and duration into the three standard phases.
///
/// Amount shares (0.30 / 0.40 / 0.30) are rounded to the nearest unit
/// independently, so their sum may differ from `total` by at most one
/// unit. Day shares (0.20 / 0.50 / 0.30) are rounded up independently and
/// may exceed `estimated_days` by up to two days; that slack is kept, not
/// normalized away.
pub fn split_into_milestones(total: i64, estimated_days: i64) -> [Milestone; 3] {
    let phases = [
        (
            "Kickoff & Planning",
            "Requirements workshop, project setup and delivery plan",
            vec![
                "Signed scope document",
                "Delivery plan",
                "Repository and environment setup",
            ],
            Decimal::new(30, 2),
            Decimal::new(20, 2),
        ),
        (
            "Design & Development",
            "Design sign-off and implementation of the agreed scope",
            vec![
                "Approved designs",
                "Feature-complete build",
                "Demo recordings",
            ],
            Decimal::new(40, 2),
            Decimal::new(50, 2),
        ),
        (
            "Testing & Deployment",
            "Stabilization, acceptance testing and production launch",
            vec![
                "Acceptance test report",
                "Production deployment",
                "Handover documentation",
            ],
            Decimal::new(30, 2),
            Decimal::new(30, 2),
        ),
    ];

    phases.map(|(title, description, deliverables, amount_share, day_share)| Milestone {
        title: title.to_string(),
        description: description.to_string(),
        deliverables: deliverables.into_iter().map(String::from).collect(),
        estimated_days: (Decimal::from(estimated_days) * day_share)
            .ceil()
            .to_i64()
            .unwrap_or(0),
        amount: round_unit(Decimal::from(total) * amount_share),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::models::{
        ComplexityMultipliers, DesignMultipliers, FeatureRate, TimelineMultipliers,
    };
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use sqlx::types::Json;
    use uuid::Uuid;

    fn template(
        base_price: Decimal,
        features: Vec<FeatureRate>,
        complexity: ComplexityMultipliers,
        timeline: TimelineMultipliers,
        design: DesignMultipliers,
    ) -> RateTemplate {
        RateTemplate {
            id: Uuid::new_v4(),
            project_type: "website".to_string(),
            base_price,
            features: Json(features),
            complexity_multipliers: Json(complexity),
            timeline_multipliers: Json(timeline),
            design_multipliers: Json(design),
            is_active: true,
            updated_at: Utc::now(),
        }
    }

    fn feature(name: &str, price: Decimal, estimated_hours: Decimal) -> FeatureRate {
        FeatureRate {
            name: name.to_string(),
            price,
            estimated_hours,
            is_required: false,
        }
    }

    fn selection(features: &[&str]) -> PriceSelection {
        PriceSelection {
            features: features.iter().map(|s| s.to_string()).collect(),
            complexity: Complexity::Medium,
            timeline: TimelineTier::Normal,
            design: DesignTier::Custom,
            custom_requirement_count: 0,
        }
    }

    fn rates() -> CurrencyRates {
        CurrencyRates::default()
    }

    // ==================== round_unit tests ====================

    #[test]
    fn test_round_unit_nearest_integer() {
        assert_eq!(round_unit(dec!(148.14)), 148);
        assert_eq!(round_unit(dec!(148.5)), 149);
        assert_eq!(round_unit(dec!(148.49)), 148);
        assert_eq!(round_unit(dec!(0)), 0);
    }

    // ==================== convert_currency tests ====================

    #[test]
    fn test_convert_currency_known_rates() {
        assert_eq!(convert_currency(dec!(100000), "USD", &rates()), dec!(1200));
        assert_eq!(convert_currency(dec!(100000), "EUR", &rates()), dec!(1100));
        assert_eq!(convert_currency(dec!(100000), "GBP", &rates()), dec!(950));
        assert_eq!(convert_currency(dec!(100000), "INR", &rates()), dec!(100000));
    }

    #[test]
    fn test_convert_currency_unknown_code_is_identity() {
        assert_eq!(convert_currency(dec!(5000), "JPY", &rates()), dec!(5000));
    }

    // ==================== compute_price tests ====================

    #[test]
    fn test_compute_price_worked_example() {
        // (10000 + 2000) * 1.5 * 1 * 1.5 = 27000
        let template = template(
            dec!(10000),
            vec![feature("auth", dec!(2000), dec!(10))],
            ComplexityMultipliers {
                medium: Some(dec!(1.5)),
                ..Default::default()
            },
            TimelineMultipliers {
                normal: Some(dec!(1)),
                ..Default::default()
            },
            DesignMultipliers {
                custom: Some(dec!(1.5)),
                ..Default::default()
            },
        );

        let breakdown = compute_price(&template, &selection(&["auth"]), "INR", &rates());

        assert_eq!(breakdown.total_price, 27000);
        assert_eq!(breakdown.estimated_hours, dec!(75)); // (40 + 10) * 1.5
        assert_eq!(breakdown.estimated_days, 13); // ceil(75 / 6)
        assert_eq!(breakdown.custom_cost, dec!(0));
        assert_eq!(breakdown.selected_features.len(), 1);
        assert_eq!(breakdown.multipliers.complexity, dec!(1.5));
    }

    #[test]
    fn test_compute_price_unmatched_feature_ignored() {
        let template = template(
            dec!(10000),
            vec![feature("auth", dec!(2000), dec!(10))],
            ComplexityMultipliers::default(),
            TimelineMultipliers::default(),
            DesignMultipliers::default(),
        );

        let with_unknown =
            compute_price(&template, &selection(&["nonexistent"]), "INR", &rates());
        let with_none = compute_price(&template, &selection(&[]), "INR", &rates());

        assert_eq!(with_unknown.total_price, with_none.total_price);
        assert_eq!(with_unknown.estimated_hours, with_none.estimated_hours);
        assert!(with_unknown.selected_features.is_empty());
    }

    #[test]
    fn test_compute_price_missing_tier_multiplier_defaults_to_one() {
        // Empty multiplier tables: every tier resolves to 1.
        let template = template(
            dec!(8000),
            vec![],
            ComplexityMultipliers::default(),
            TimelineMultipliers::default(),
            DesignMultipliers::default(),
        );

        let mut sel = selection(&[]);
        sel.complexity = Complexity::Enterprise;
        sel.timeline = TimelineTier::Rush;
        sel.design = DesignTier::Premium;

        let breakdown = compute_price(&template, &sel, "INR", &rates());
        assert_eq!(breakdown.total_price, 8000);
        assert_eq!(breakdown.multipliers.timeline, dec!(1));
    }

    #[test]
    fn test_compute_price_custom_requirement_surcharge() {
        let template = template(
            dec!(1000),
            vec![],
            ComplexityMultipliers::default(),
            TimelineMultipliers::default(),
            DesignMultipliers::default(),
        );

        let mut sel = selection(&[]);
        sel.custom_requirement_count = 2;

        // 1000 * 0.1 * 2 = 200 surcharge
        let breakdown = compute_price(&template, &sel, "INR", &rates());
        assert_eq!(breakdown.custom_cost, dec!(200));
        assert_eq!(breakdown.total_price, 1200);
    }

    #[test]
    fn test_compute_price_hours_unaffected_by_timeline_and_design() {
        let template = template(
            dec!(10000),
            vec![feature("auth", dec!(2000), dec!(10))],
            ComplexityMultipliers::default(),
            TimelineMultipliers {
                rush: Some(dec!(1.5)),
                ..Default::default()
            },
            DesignMultipliers {
                premium: Some(dec!(2)),
                ..Default::default()
            },
        );

        let mut sel = selection(&["auth"]);
        sel.timeline = TimelineTier::Rush;
        sel.design = DesignTier::Premium;

        let breakdown = compute_price(&template, &sel, "INR", &rates());
        assert_eq!(breakdown.estimated_hours, dec!(50)); // 40 + 10, no scaling
        assert_eq!(breakdown.total_price, 36000); // 12000 * 1.5 * 2
    }

    #[test]
    fn test_compute_price_currency_conversion_and_rounding() {
        let template = template(
            dec!(12345),
            vec![],
            ComplexityMultipliers::default(),
            TimelineMultipliers::default(),
            DesignMultipliers::default(),
        );

        // 12345 * 0.012 = 148.14 -> 148
        let breakdown = compute_price(&template, &selection(&[]), "USD", &rates());
        assert_eq!(breakdown.total_price, 148);
        assert_eq!(breakdown.subtotal, dec!(12345)); // pre-conversion
        assert_eq!(breakdown.currency, "USD");
    }

    #[test]
    fn test_compute_price_estimated_days_by_complexity() {
        let template = template(
            dec!(5000),
            vec![],
            ComplexityMultipliers::default(),
            TimelineMultipliers::default(),
            DesignMultipliers::default(),
        );

        for (tier, expected_days) in [
            (Complexity::Simple, 5),     // ceil(40 / 8)
            (Complexity::Medium, 7),     // ceil(40 / 6)
            (Complexity::Complex, 10),   // ceil(40 / 4)
            (Complexity::Enterprise, 14), // ceil(40 / 3)
        ] {
            let mut sel = selection(&[]);
            sel.complexity = tier;
            let breakdown = compute_price(&template, &sel, "INR", &rates());
            assert_eq!(breakdown.estimated_days, expected_days, "{:?}", tier);
        }
    }

    #[test]
    fn test_compute_price_total_at_least_base_for_all_tiers() {
        let template = template(
            dec!(10000),
            vec![feature("auth", dec!(2000), dec!(10))],
            ComplexityMultipliers {
                simple: Some(dec!(1)),
                medium: Some(dec!(1.5)),
                complex: Some(dec!(2)),
                enterprise: Some(dec!(3)),
            },
            TimelineMultipliers {
                rush: Some(dec!(1.5)),
                normal: Some(dec!(1)),
                flexible: Some(dec!(1)),
            },
            DesignMultipliers {
                template: Some(dec!(1)),
                custom: Some(dec!(1.5)),
                premium: Some(dec!(2)),
            },
        );

        for complexity in [
            Complexity::Simple,
            Complexity::Medium,
            Complexity::Complex,
            Complexity::Enterprise,
        ] {
            for timeline in [TimelineTier::Rush, TimelineTier::Normal, TimelineTier::Flexible] {
                for design in [DesignTier::Template, DesignTier::Custom, DesignTier::Premium] {
                    let sel = PriceSelection {
                        features: vec!["auth".to_string()],
                        complexity,
                        timeline,
                        design,
                        custom_requirement_count: 1,
                    };
                    let breakdown = compute_price(&template, &sel, "INR", &rates());
                    assert!(
                        Decimal::from(breakdown.total_price) >= template.base_price,
                        "{:?}/{:?}/{:?}",
                        complexity,
                        timeline,
                        design
                    );
                }
            }
        }
    }

    #[test]
    fn test_compute_price_is_deterministic() {
        let template = template(
            dec!(10000),
            vec![feature("auth", dec!(2000), dec!(10))],
            ComplexityMultipliers {
                medium: Some(dec!(1.5)),
                ..Default::default()
            },
            TimelineMultipliers::default(),
            DesignMultipliers::default(),
        );

        let mut sel = selection(&["auth"]);
        sel.custom_requirement_count = 3;

        let first = compute_price(&template, &sel, "USD", &rates());
        let second = compute_price(&template, &sel, "USD", &rates());
        assert_eq!(first.total_price, second.total_price);
        assert_eq!(first.estimated_days, second.estimated_days);
        assert_eq!(first.custom_cost, second.custom_cost);
    }

    // ==================== split_into_milestones tests ====================

    #[test]
    fn test_milestones_fixed_phases() {
        let milestones = split_into_milestones(10000, 30);

        assert_eq!(milestones[0].title, "Kickoff & Planning");
        assert_eq!(milestones[1].title, "Design & Development");
        assert_eq!(milestones[2].title, "Testing & Deployment");

        assert_eq!(milestones[0].amount, 3000);
        assert_eq!(milestones[1].amount, 4000);
        assert_eq!(milestones[2].amount, 3000);

        assert_eq!(milestones[0].estimated_days, 6); // ceil(30 * 0.2)
        assert_eq!(milestones[1].estimated_days, 15); // ceil(30 * 0.5)
        assert_eq!(milestones[2].estimated_days, 9); // ceil(30 * 0.3)

        assert_eq!(milestones[0].deliverables.len(), 3);
    }

    #[test]
    fn test_milestone_amounts_sum_within_one_unit() {
        for total in (0i64..=2000).chain([27001, 31860, 99999]) {
            let milestones = split_into_milestones(total, 13);
            let sum: i64 = milestones.iter().map(|m| m.amount).sum();
            assert!(
                (sum - total).abs() <= 1,
                "total {} split to {}",
                total,
                sum
            );
        }
    }

    #[test]
    fn test_milestone_days_slack_bounded() {
        for days in 0i64..=120 {
            let milestones = split_into_milestones(10000, days);
            let sum: i64 = milestones.iter().map(|m| m.estimated_days).sum();
            assert!(sum >= days, "days {} shrank to {}", days, sum);
            assert!(sum <= days + 2, "days {} grew to {}", days, sum);
        }
    }

    #[test]
    fn test_milestones_zero_total() {
        let milestones = split_into_milestones(0, 0);
        assert!(milestones.iter().all(|m| m.amount == 0));
        assert!(milestones.iter().all(|m| m.estimated_days == 0));
    }
}
