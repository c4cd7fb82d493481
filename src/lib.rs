//! WorkNest pricing and quotation engine.
//!
//! Computes cost estimates and binding quotes for custom software
//! engagements brokered on the WorkNest platform. The platform backend
//! calls this service via HTTP/JSON; PostgreSQL holds the rate catalog
//! and persisted quotes.

pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod pricing;
pub mod quotes;

use std::sync::Arc;

use sqlx::PgPool;

use cache::AppCache;
use config::Settings;

/// Shared state for route handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: AppCache,
    pub settings: Arc<Settings>,
}
