//! Database queries for platform-owned records.
//!
//! Client profiles and the quote number sequence live in tables owned by
//! the platform backend; this service only reads the former and reserves
//! from the latter.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;

/// Preferred display currency for a client, defaulting to INR
pub async fn get_preferred_currency(pool: &PgPool, client_id: Uuid) -> Result<String> {
    let code: Option<Option<String>> = sqlx::query_scalar(
        r#"
        SELECT preferred_currency
        FROM client_profiles
        WHERE client_id = $1
        "#,
    )
    .bind(client_id)
    .fetch_optional(pool)
    .await?;

    Ok(code.flatten().unwrap_or_else(|| "INR".to_string()))
}

/// Reserve the next quote sequence number.
///
/// Backed by a Postgres sequence, so concurrent quote creations can never
/// be handed the same number.
pub async fn next_quote_sequence(pool: &PgPool) -> Result<i64> {
    let sequence: i64 = sqlx::query_scalar(r#"SELECT nextval('quote_number_seq')"#)
        .fetch_one(pool)
        .await?;

    Ok(sequence)
}
