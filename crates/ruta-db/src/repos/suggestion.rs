use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SuggestionRow {
    pub suggestion_id: Uuid,
    pub landmark_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub submitted_by: Uuid,
    pub status: String,
    pub submitted_at: DateTime<Utc>,
}

/// Suggestion joined with the submitting user's public fields
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SuggestionWithSubmitterRow {
    pub suggestion_id: Uuid,
    pub landmark_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub submitted_by: Uuid,
    pub status: String,
    pub submitted_at: DateTime<Utc>,
    pub submitter_name: String,
    pub submitter_email: String,
}

const SUGGESTION_COLUMNS: &str = "suggestion_id, landmark_name, latitude, longitude, \
                                  submitted_by, status, submitted_at";

pub struct SuggestionRepo;

impl SuggestionRepo {
    pub async fn create(
        pool: &PgPool,
        landmark_name: &str,
        latitude: f64,
        longitude: f64,
        submitted_by: Uuid,
    ) -> Result<SuggestionRow> {
        let row = sqlx::query_as::<_, SuggestionRow>(&format!(
            "INSERT INTO suggestion (suggestion_id, landmark_name, latitude, longitude, submitted_by) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {SUGGESTION_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(landmark_name)
        .bind(latitude)
        .bind(longitude)
        .bind(submitted_by)
        .fetch_one(pool)
        .await
        .context("Failed to create suggestion")?;
        Ok(row)
    }

    pub async fn list_with_submitter(pool: &PgPool) -> Result<Vec<SuggestionWithSubmitterRow>> {
        let rows = sqlx::query_as::<_, SuggestionWithSubmitterRow>(
            "SELECT s.suggestion_id, s.landmark_name, s.latitude, s.longitude, s.submitted_by, \
             s.status, s.submitted_at, u.full_name AS submitter_name, u.email AS submitter_email \
             FROM suggestion s JOIN app_user u ON u.user_id = s.submitted_by \
             ORDER BY s.submitted_at ASC",
        )
        .fetch_all(pool)
        .await
        .context("Failed to list suggestions")?;
        Ok(rows)
    }

    /// Overwrite the review status. Returns the updated row, or None when the
    /// id is unknown. Terminal states may be overwritten again; the update is
    /// idempotent on the target status.
    pub async fn set_status(
        pool: &PgPool,
        suggestion_id: Uuid,
        status: &str,
    ) -> Result<Option<SuggestionRow>> {
        let row = sqlx::query_as::<_, SuggestionRow>(&format!(
            "UPDATE suggestion SET status = $2 WHERE suggestion_id = $1 RETURNING {SUGGESTION_COLUMNS}"
        ))
        .bind(suggestion_id)
        .bind(status)
        .fetch_optional(pool)
        .await
        .context("Failed to update suggestion status")?;
        Ok(row)
    }

    pub async fn count_pending(pool: &PgPool) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM suggestion WHERE status = 'pending'")
                .fetch_one(pool)
                .await
                .context("Failed to count pending suggestions")?;
        Ok(count)
    }
}
