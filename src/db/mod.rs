//! Platform record access

pub mod queries;

pub use queries::{get_preferred_currency, next_quote_sequence};
