//! Database queries for persisted quotes.
//!
//! Lifecycle transitions are conditional updates guarded on the stored
//! status. Concurrent transitions on one quote serialize in the store:
//! whichever statement matches the guard first wins, the loser affects
//! zero rows and never mutates state.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;

use super::models::Quote;

const QUOTE_COLUMNS: &str = r#"
    id, quote_number, client_id,
    project_details, timeline, pricing, milestones,
    terms, status, rejection_reason,
    valid_until, sent_at, viewed_at, responded_at, created_at
"#;

/// Insert a fully-formed quote
pub async fn insert_quote(pool: &PgPool, quote: &Quote) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO quotes (
            id, quote_number, client_id,
            project_details, timeline, pricing, milestones,
            terms, status, rejection_reason,
            valid_until, sent_at, viewed_at, responded_at, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
        "#,
    )
    .bind(quote.id)
    .bind(&quote.quote_number)
    .bind(quote.client_id)
    .bind(&quote.project_details)
    .bind(&quote.timeline)
    .bind(&quote.pricing)
    .bind(&quote.milestones)
    .bind(&quote.terms)
    .bind(&quote.status)
    .bind(&quote.rejection_reason)
    .bind(quote.valid_until)
    .bind(quote.sent_at)
    .bind(quote.viewed_at)
    .bind(quote.responded_at)
    .bind(quote.created_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get a quote owned by a client
pub async fn get_client_quote(
    pool: &PgPool,
    id: Uuid,
    client_id: Uuid,
) -> Result<Option<Quote>> {
    let quote = sqlx::query_as::<_, Quote>(&format!(
        r#"
        SELECT {QUOTE_COLUMNS}
        FROM quotes
        WHERE id = $1 AND client_id = $2
        "#
    ))
    .bind(id)
    .bind(client_id)
    .fetch_optional(pool)
    .await?;

    Ok(quote)
}

/// List a client's quotes, newest first
pub async fn list_client_quotes(pool: &PgPool, client_id: Uuid) -> Result<Vec<Quote>> {
    let quotes = sqlx::query_as::<_, Quote>(&format!(
        r#"
        SELECT {QUOTE_COLUMNS}
        FROM quotes
        WHERE client_id = $1
        ORDER BY created_at DESC
        "#
    ))
    .bind(client_id)
    .fetch_all(pool)
    .await?;

    Ok(quotes)
}

/// Record the first client view of a sent quote.
///
/// Guarded on `status = 'sent'` so `viewed_at` is written exactly once,
/// even under concurrent reads. Returns the number of affected rows.
pub async fn mark_viewed(
    pool: &PgPool,
    id: Uuid,
    client_id: Uuid,
    now: DateTime<Utc>,
) -> Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE quotes
        SET status = 'viewed', viewed_at = $3
        WHERE id = $1 AND client_id = $2 AND status = 'sent'
        "#,
    )
    .bind(id)
    .bind(client_id)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Apply an accept/reject decision if the quote is still open.
///
/// Guarded on the delivered statuses; a zero row count means the quote was
/// not in `sent` or `viewed` and nothing changed.
pub async fn record_decision(
    pool: &PgPool,
    id: Uuid,
    client_id: Uuid,
    new_status: &str,
    reason: Option<&str>,
    now: DateTime<Utc>,
) -> Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE quotes
        SET status = $3, rejection_reason = $4, responded_at = $5
        WHERE id = $1 AND client_id = $2 AND status IN ('sent', 'viewed')
        "#,
    )
    .bind(id)
    .bind(client_id)
    .bind(new_status)
    .bind(reason)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
