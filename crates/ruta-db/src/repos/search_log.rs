use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

/// Append-only search history. Written as a side effect of destination
/// resolution and never read back by the application.
pub struct SearchLogRepo;

impl SearchLogRepo {
    pub async fn append(
        pool: &PgPool,
        user_id: Uuid,
        destination: &str,
        suggested_route: &str,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO search_log (log_id, user_id, destination, suggested_route) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(destination)
        .bind(suggested_route)
        .execute(pool)
        .await
        .context("Failed to append search log")?;
        Ok(())
    }
}
