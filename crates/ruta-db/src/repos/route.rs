use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use ruta_common::models::catalog::Coordinate;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RouteRow {
    pub route_id: Uuid,
    pub route_name: String,
    pub vehicle_type: String,
    pub start_point: String,
    pub end_point: String,
    pub fare: f64,
    pub estimated_time: i32,
    pub route_status: String,
    pub landmarks: Vec<String>,
    pub coordinates: Json<Vec<Coordinate>>,
    pub created_at: DateTime<Utc>,
}

/// Fields for creating or replacing a route
#[derive(Debug, Clone)]
pub struct NewRoute {
    pub route_name: String,
    pub vehicle_type: String,
    pub start_point: String,
    pub end_point: String,
    pub fare: f64,
    pub estimated_time: i32,
    pub route_status: String,
    pub landmarks: Vec<String>,
    pub coordinates: Vec<Coordinate>,
}

const ROUTE_COLUMNS: &str = "route_id, route_name, vehicle_type, start_point, end_point, fare, \
                             estimated_time, route_status, landmarks, coordinates, created_at";

pub struct RouteRepo;

impl RouteRepo {
    pub async fn create(pool: &PgPool, route: &NewRoute) -> Result<RouteRow> {
        let row = sqlx::query_as::<_, RouteRow>(&format!(
            "INSERT INTO route (route_id, route_name, vehicle_type, start_point, end_point, fare, \
             estimated_time, route_status, landmarks, coordinates) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING {ROUTE_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&route.route_name)
        .bind(&route.vehicle_type)
        .bind(&route.start_point)
        .bind(&route.end_point)
        .bind(route.fare)
        .bind(route.estimated_time)
        .bind(&route.route_status)
        .bind(&route.landmarks)
        .bind(Json(&route.coordinates))
        .fetch_one(pool)
        .await
        .context("Failed to create route")?;
        Ok(row)
    }

    /// All routes in insertion order. Searches rely on this ordering for
    /// first-match resolution.
    pub async fn list(pool: &PgPool) -> Result<Vec<RouteRow>> {
        let rows = sqlx::query_as::<_, RouteRow>(&format!(
            "SELECT {ROUTE_COLUMNS} FROM route ORDER BY created_at ASC"
        ))
        .fetch_all(pool)
        .await
        .context("Failed to list routes")?;
        Ok(rows)
    }

    pub async fn get(pool: &PgPool, route_id: Uuid) -> Result<Option<RouteRow>> {
        let row = sqlx::query_as::<_, RouteRow>(&format!(
            "SELECT {ROUTE_COLUMNS} FROM route WHERE route_id = $1"
        ))
        .bind(route_id)
        .fetch_optional(pool)
        .await
        .context("Failed to get route")?;
        Ok(row)
    }

    pub async fn update(
        pool: &PgPool,
        route_id: Uuid,
        route: &NewRoute,
    ) -> Result<Option<RouteRow>> {
        let row = sqlx::query_as::<_, RouteRow>(&format!(
            "UPDATE route SET route_name = $2, vehicle_type = $3, start_point = $4, \
             end_point = $5, fare = $6, estimated_time = $7, route_status = $8, \
             landmarks = $9, coordinates = $10 WHERE route_id = $1 RETURNING {ROUTE_COLUMNS}"
        ))
        .bind(route_id)
        .bind(&route.route_name)
        .bind(&route.vehicle_type)
        .bind(&route.start_point)
        .bind(&route.end_point)
        .bind(route.fare)
        .bind(route.estimated_time)
        .bind(&route.route_status)
        .bind(&route.landmarks)
        .bind(Json(&route.coordinates))
        .fetch_optional(pool)
        .await
        .context("Failed to update route")?;
        Ok(row)
    }

    pub async fn delete(pool: &PgPool, route_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM route WHERE route_id = $1")
            .bind(route_id)
            .execute(pool)
            .await
            .context("Failed to delete route")?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count_active(pool: &PgPool) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM route WHERE route_status = 'active'")
                .fetch_one(pool)
                .await
                .context("Failed to count active routes")?;
        Ok(count)
    }

    pub async fn count(pool: &PgPool) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM route")
            .fetch_one(pool)
            .await
            .context("Failed to count routes")?;
        Ok(count)
    }
}
