use crate::state::AppState;
use crate::web::api::middleware::AdminUser;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use ruta_common::models::catalog::{Coordinate, RouteStatus, VehicleType};
use ruta_db::{NewRoute, RouteRepo, RouteRow};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

/// Request body shared by create and update (update is a full replace)
#[derive(Debug, Deserialize)]
pub struct RoutePayload {
    pub route_name: String,
    pub vehicle_type: VehicleType,
    pub start_point: String,
    pub end_point: String,
    pub fare: f64,
    pub estimated_time: i32,
    #[serde(default)]
    pub route_status: RouteStatus,
    #[serde(default)]
    pub landmarks: Vec<String>,
    #[serde(default)]
    pub coordinates: Vec<Coordinate>,
}

impl RoutePayload {
    fn into_new_route(self) -> NewRoute {
        NewRoute {
            route_name: self.route_name,
            vehicle_type: self.vehicle_type.as_str().to_string(),
            start_point: self.start_point,
            end_point: self.end_point,
            fare: self.fare,
            estimated_time: self.estimated_time,
            route_status: self.route_status.as_str().to_string(),
            landmarks: self.landmarks,
            coordinates: self.coordinates,
        }
    }
}

fn route_json(route: &RouteRow) -> serde_json::Value {
    json!({
        "id": route.route_id,
        "route_name": route.route_name,
        "vehicle_type": route.vehicle_type,
        "start_point": route.start_point,
        "end_point": route.end_point,
        "fare": route.fare,
        "estimated_time": route.estimated_time,
        "route_status": route.route_status,
        "landmarks": route.landmarks,
        "coordinates": route.coordinates.0,
        "created_at": route.created_at,
    })
}

/// POST /api/routes
#[tracing::instrument(skip(state, req))]
pub async fn create_route(
    State(state): State<Arc<AppState>>,
    _auth: AdminUser,
    Json(req): Json<RoutePayload>,
) -> impl IntoResponse {
    match RouteRepo::create(&state.pool, &req.into_new_route()).await {
        Ok(route) => (StatusCode::CREATED, Json(route_json(&route))).into_response(),
        Err(e) => {
            tracing::error!("Failed to create route: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response()
        }
    }
}

/// GET /api/routes
#[tracing::instrument(skip(state))]
pub async fn list_routes(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match RouteRepo::list(&state.pool).await {
        Ok(routes) => {
            let body: Vec<serde_json::Value> = routes.iter().map(route_json).collect();
            Json(body).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to list routes: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response()
        }
    }
}

/// GET /api/routes/:id
#[tracing::instrument(skip(state))]
pub async fn get_route(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let route_id = match id.parse::<Uuid>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Invalid route ID"})),
            )
                .into_response();
        }
    };

    match RouteRepo::get(&state.pool, route_id).await {
        Ok(Some(route)) => Json(route_json(&route)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Route not found"})),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to get route: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response()
        }
    }
}

/// PUT /api/routes/:id
#[tracing::instrument(skip(state, req))]
pub async fn update_route(
    State(state): State<Arc<AppState>>,
    _auth: AdminUser,
    Path(id): Path<String>,
    Json(req): Json<RoutePayload>,
) -> impl IntoResponse {
    let route_id = match id.parse::<Uuid>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Invalid route ID"})),
            )
                .into_response();
        }
    };

    match RouteRepo::update(&state.pool, route_id, &req.into_new_route()).await {
        Ok(Some(route)) => Json(route_json(&route)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Route not found"})),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to update route: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response()
        }
    }
}

/// DELETE /api/routes/:id
#[tracing::instrument(skip(state))]
pub async fn delete_route(
    State(state): State<Arc<AppState>>,
    _auth: AdminUser,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let route_id = match id.parse::<Uuid>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Invalid route ID"})),
            )
                .into_response();
        }
    };

    match RouteRepo::delete(&state.pool, route_id).await {
        Ok(true) => Json(json!({"message": "Route deleted successfully"})).into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Route not found"})),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to delete route: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response()
        }
    }
}
