use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

/// Append-only chat history. Written as a side effect of the chat relay and
/// never read back by the application.
pub struct ChatLogRepo;

impl ChatLogRepo {
    pub async fn append(
        pool: &PgPool,
        user_id: Uuid,
        question: &str,
        ai_response: &str,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO chat_log (log_id, user_id, question, ai_response) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(question)
        .bind(ai_response)
        .execute(pool)
        .await
        .context("Failed to append chat log")?;
        Ok(())
    }
}
