//! In-memory caching using moka
//!
//! Rate templates change rarely relative to estimate traffic, so the
//! engine serves them from an in-process cache with modest TTLs. Client
//! currency preferences are cached the same way.

use moka::future::Cache;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};
use uuid::Uuid;

use crate::pricing::models::RateTemplate;
use crate::pricing::queries;

/// Application cache holding rate templates and currency preferences
#[derive(Clone)]
pub struct AppCache {
    /// Active rate templates (project_type -> RateTemplate)
    pub templates: Cache<String, Arc<RateTemplate>>,
    /// Preferred display currency per client (client_id -> code)
    pub currencies: Cache<Uuid, String>,
}

impl AppCache {
    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self {
            // Rate templates: 100 entries, 10 min TTL, 5 min idle
            templates: Cache::builder()
                .max_capacity(100)
                .time_to_live(Duration::from_secs(10 * 60))
                .time_to_idle(Duration::from_secs(5 * 60))
                .build(),

            // Currency preferences: 10k entries, 15 min TTL
            currencies: Cache::builder()
                .max_capacity(10_000)
                .time_to_live(Duration::from_secs(15 * 60))
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            templates_size: self.templates.entry_count(),
            currencies_size: self.currencies.entry_count(),
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.templates.invalidate_all();
        self.currencies.invalidate_all();
        info!("All caches invalidated");
    }

    /// Invalidate a single template after an operator edit
    pub async fn invalidate_template(&self, project_type: &str) {
        self.templates.invalidate(project_type).await;
        info!("Cache invalidated for project type: {}", project_type);
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub templates_size: u64,
    pub currencies_size: u64,
}

/// Start background cache warmer
///
/// Warms the cache on startup and refreshes every 10 minutes.
pub async fn start_cache_warmer(cache: AppCache, db: PgPool) {
    // Initial warm-up
    warm_cache(&cache, &db).await;

    // Periodic refresh every 10 minutes
    let mut interval = interval(Duration::from_secs(10 * 60));
    loop {
        interval.tick().await;
        warm_cache(&cache, &db).await;
    }
}

/// Warm the cache with all active rate templates
async fn warm_cache(cache: &AppCache, db: &PgPool) {
    info!("Starting cache warm-up...");

    match queries::get_active_templates(db).await {
        Ok(templates) => {
            for template in templates {
                cache
                    .templates
                    .insert(template.project_type.clone(), Arc::new(template))
                    .await;
            }
        }
        Err(e) => warn!("Failed to warm template cache: {}", e),
    }

    info!("Cache warm-up complete. Stats: {:?}", cache.stats());
}
