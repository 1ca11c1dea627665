use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub user_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub is_verified: bool,
    pub verification_token: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct UserRepo;

impl UserRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        full_name: &str,
        email: &str,
        password_hash: &str,
        role: &str,
        verification_token: Option<&str>,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO app_user (user_id, full_name, email, password_hash, role, is_verified, verification_token) \
             VALUES ($1, $2, $3, $4, $5, FALSE, $6)",
        )
        .bind(user_id)
        .bind(full_name)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .bind(verification_token)
        .execute(pool)
        .await
        .context("Failed to create user")?;
        Ok(())
    }

    pub async fn get_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT user_id, full_name, email, password_hash, role, is_verified, verification_token, created_at \
             FROM app_user WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(pool)
        .await
        .context("Failed to get user by email")?;
        Ok(row)
    }

    pub async fn get_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT user_id, full_name, email, password_hash, role, is_verified, verification_token, created_at \
             FROM app_user WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .context("Failed to get user by id")?;
        Ok(row)
    }

    pub async fn get_by_verification_token(pool: &PgPool, token: &str) -> Result<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT user_id, full_name, email, password_hash, role, is_verified, verification_token, created_at \
             FROM app_user WHERE verification_token = $1",
        )
        .bind(token)
        .fetch_optional(pool)
        .await
        .context("Failed to get user by verification token")?;
        Ok(row)
    }

    /// Mark the account verified and clear the one-shot token
    pub async fn mark_verified(pool: &PgPool, user_id: Uuid) -> Result<()> {
        sqlx::query(
            "UPDATE app_user SET is_verified = TRUE, verification_token = NULL WHERE user_id = $1",
        )
        .bind(user_id)
        .execute(pool)
        .await
        .context("Failed to mark user verified")?;
        Ok(())
    }

    pub async fn set_verification_token(pool: &PgPool, user_id: Uuid, token: &str) -> Result<()> {
        sqlx::query("UPDATE app_user SET verification_token = $2 WHERE user_id = $1")
            .bind(user_id)
            .bind(token)
            .execute(pool)
            .await
            .context("Failed to set verification token")?;
        Ok(())
    }

    pub async fn admin_exists(pool: &PgPool) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM app_user WHERE role = 'admin')")
                .fetch_one(pool)
                .await
                .context("Failed to check for admin user")?;
        Ok(exists)
    }

    pub async fn count_commuters(pool: &PgPool) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM app_user WHERE role = 'commuter'")
                .fetch_one(pool)
                .await
                .context("Failed to count commuter users")?;
        Ok(count)
    }
}
