//! Quote lifecycle module for WorkNest.
//!
//! Persists formal quotes assembled from the pricing engine and enforces
//! their state machine: draft/sent -> viewed -> accepted/rejected, with
//! lazy expiry on read.

pub mod models;
pub mod queries;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use models::{Quote, QuoteStatus};
pub use routes::router;
