use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{InvoiceActivity, RecentActivity};

/// Appends an invoice activity. Does not touch `recent_activities`.
pub async fn insert_invoice_activity(
    pool: &PgPool,
    activity: &InvoiceActivity,
) -> Result<Uuid, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO invoice_activities (activity_id, invoice_id, user_id, title, description)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING activity_id
        "#,
    )
    .bind(activity.activity_id)
    .bind(activity.invoice_id)
    .bind(activity.user_id)
    .bind(&activity.title)
    .bind(&activity.description)
    .fetch_one(pool)
    .await
}

/// A user's activity feed, newest first.
pub async fn recent_activities(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<RecentActivity>, sqlx::Error> {
    sqlx::query_as::<_, RecentActivity>(
        r#"
        SELECT activity_id, user_id, title, description, created_at
        FROM recent_activities
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Activities one user recorded against one invoice, newest first.
pub async fn invoice_activities(
    pool: &PgPool,
    user_id: Uuid,
    invoice_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<InvoiceActivity>, sqlx::Error> {
    sqlx::query_as::<_, InvoiceActivity>(
        r#"
        SELECT activity_id, invoice_id, user_id, title, description, created_at
        FROM invoice_activities
        WHERE user_id = $1 AND invoice_id = $2
        ORDER BY created_at DESC
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(user_id)
    .bind(invoice_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}
