//! Database queries for the rate catalog.
//!
//! Templates are operator-maintained and read-only here. Inactive
//! templates are invisible to the engine.

use sqlx::PgPool;

use crate::error::Result;

use super::models::RateTemplate;

/// Find the active rate template for a project type
pub async fn find_active_template(
    pool: &PgPool,
    project_type: &str,
) -> Result<Option<RateTemplate>> {
    let template = sqlx::query_as::<_, RateTemplate>(
        r#"
        SELECT
            id, project_type, base_price, features,
            complexity_multipliers, timeline_multipliers, design_multipliers,
            is_active, updated_at
        FROM rate_templates
        WHERE project_type = $1
          AND is_active = true
        ORDER BY updated_at DESC
        LIMIT 1
        "#,
    )
    .bind(project_type)
    .fetch_optional(pool)
    .await?;

    Ok(template)
}

/// Get all active templates (for cache warming)
pub async fn get_active_templates(pool: &PgPool) -> Result<Vec<RateTemplate>> {
    let templates = sqlx::query_as::<_, RateTemplate>(
        r#"
        SELECT
            id, project_type, base_price, features,
            complexity_multipliers, timeline_multipliers, design_multipliers,
            is_active, updated_at
        FROM rate_templates
        WHERE is_active = true
        ORDER BY project_type, updated_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(templates)
}
