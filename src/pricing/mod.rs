//! Pricing engine module for WorkNest.
//!
//! Computes price estimates for custom software engagements. All math
//! lives in pure calculator functions; this module is called by the
//! platform backend via HTTP/JSON.

pub mod calculators;
pub mod models;
pub mod queries;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{
    compute_price, convert_currency, round_unit, split_into_milestones, Milestone,
    PriceBreakdown, PriceSelection,
};
pub use routes::router;
