//! Database operations for the `feedback` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use wavewatch_core::NewFeedback;

use crate::DbError;

const FEEDBACK_COLUMNS: &str = "id, public_id, overall_satisfaction, response_time, usability, \
     comments, issue_type, carrier, network_type, location, signal_strength, \
     download_speed, upload_speed, latency, submitted_at";

/// A row from the `feedback` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FeedbackRow {
    pub id: i64,
    pub public_id: Uuid,
    pub overall_satisfaction: i16,
    pub response_time: i16,
    pub usability: i16,
    pub comments: Option<String>,
    pub issue_type: Option<String>,
    pub carrier: String,
    pub network_type: Option<String>,
    pub location: String,
    pub signal_strength: Option<i32>,
    pub download_speed: Option<f64>,
    pub upload_speed: Option<f64>,
    pub latency: Option<i32>,
    pub submitted_at: DateTime<Utc>,
}

/// Insert a feedback submission and return the stored row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails, including CHECK violations
/// for out-of-range ratings.
pub async fn insert_feedback(pool: &PgPool, feedback: &NewFeedback) -> Result<FeedbackRow, DbError> {
    let sql = format!(
        "INSERT INTO feedback \
             (public_id, overall_satisfaction, response_time, usability, comments, issue_type, \
              carrier, network_type, location, signal_strength, download_speed, upload_speed, latency) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
         RETURNING {FEEDBACK_COLUMNS}"
    );

    let row = sqlx::query_as::<_, FeedbackRow>(&sql)
        .bind(Uuid::new_v4())
        .bind(feedback.overall_satisfaction)
        .bind(feedback.response_time)
        .bind(feedback.usability)
        .bind(feedback.comments.as_deref())
        .bind(feedback.issue_type.as_deref())
        .bind(feedback.carrier.trim())
        .bind(feedback.network_type.as_deref())
        .bind(feedback.location.trim())
        .bind(feedback.signal_strength)
        .bind(feedback.download_speed)
        .bind(feedback.upload_speed)
        .bind(feedback.latency)
        .fetch_one(pool)
        .await?;

    tracing::debug!(id = row.id, carrier = %row.carrier, "stored feedback");

    Ok(row)
}

/// List feedback newest first, optionally restricted to one carrier
/// (exact, case-insensitive).
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_feedback(
    pool: &PgPool,
    carrier: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<FeedbackRow>, DbError> {
    let rows = if let Some(carrier) = carrier {
        let sql = format!(
            "SELECT {FEEDBACK_COLUMNS} FROM feedback \
             WHERE LOWER(carrier) = LOWER($1) \
             ORDER BY submitted_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, FeedbackRow>(&sql)
            .bind(carrier.trim())
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
    } else {
        let sql = format!(
            "SELECT {FEEDBACK_COLUMNS} FROM feedback \
             ORDER BY submitted_at DESC, id DESC \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, FeedbackRow>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
    };

    Ok(rows)
}
