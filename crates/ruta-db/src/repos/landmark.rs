use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LandmarkRow {
    pub landmark_id: Uuid,
    pub name: String,
    pub category: String,
    pub near_route: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewLandmark {
    pub name: String,
    pub category: String,
    pub near_route: String,
    pub latitude: f64,
    pub longitude: f64,
}

const LANDMARK_COLUMNS: &str =
    "landmark_id, name, category, near_route, latitude, longitude, created_at";

pub struct LandmarkRepo;

impl LandmarkRepo {
    pub async fn create(pool: &PgPool, landmark: &NewLandmark) -> Result<LandmarkRow> {
        let row = sqlx::query_as::<_, LandmarkRow>(&format!(
            "INSERT INTO landmark (landmark_id, name, category, near_route, latitude, longitude) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {LANDMARK_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&landmark.name)
        .bind(&landmark.category)
        .bind(&landmark.near_route)
        .bind(landmark.latitude)
        .bind(landmark.longitude)
        .fetch_one(pool)
        .await
        .context("Failed to create landmark")?;
        Ok(row)
    }

    /// All landmarks in insertion order. Searches rely on this ordering for
    /// first-match resolution.
    pub async fn list(pool: &PgPool) -> Result<Vec<LandmarkRow>> {
        let rows = sqlx::query_as::<_, LandmarkRow>(&format!(
            "SELECT {LANDMARK_COLUMNS} FROM landmark ORDER BY created_at ASC"
        ))
        .fetch_all(pool)
        .await
        .context("Failed to list landmarks")?;
        Ok(rows)
    }

    /// Landmarks whose soft route reference matches the given name exactly
    pub async fn list_by_route(pool: &PgPool, route_name: &str) -> Result<Vec<LandmarkRow>> {
        let rows = sqlx::query_as::<_, LandmarkRow>(&format!(
            "SELECT {LANDMARK_COLUMNS} FROM landmark WHERE near_route = $1 ORDER BY created_at ASC"
        ))
        .bind(route_name)
        .fetch_all(pool)
        .await
        .context("Failed to list landmarks by route")?;
        Ok(rows)
    }

    pub async fn count(pool: &PgPool) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM landmark")
            .fetch_one(pool)
            .await
            .context("Failed to count landmarks")?;
        Ok(count)
    }
}
