use crate::resolver::{self, ResolveError};
use crate::state::AppState;
use crate::web::api::middleware::CommuterUser;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use ruta_db::{LandmarkRepo, RouteRepo, SearchLogRepo};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub destination: String,
}

/// POST /api/search
///
/// Resolves a free-text destination to the first matching route and returns
/// boarding instructions. Matching happens over the full catalogs in store
/// order; no ranking is applied.
#[tracing::instrument(skip(state, req), fields(destination = %req.destination))]
pub async fn search_destination(
    State(state): State<Arc<AppState>>,
    auth: CommuterUser,
    Json(req): Json<SearchRequest>,
) -> impl IntoResponse {
    let destination = req.destination.trim();
    if destination.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Destination is required"})),
        )
            .into_response();
    }

    let landmarks = match LandmarkRepo::list(&state.pool).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to load landmarks: {:#}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response();
        }
    };

    let routes = match RouteRepo::list(&state.pool).await {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Failed to load routes: {:#}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response();
        }
    };

    let resolution = match resolver::resolve(destination, &landmarks, &routes) {
        Ok(r) => r,
        Err(ResolveError::NotFound) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({"error": "Destination not found. Please try another landmark."})),
            )
                .into_response();
        }
        Err(ResolveError::RouteUnavailable) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Route is currently unavailable."})),
            )
                .into_response();
        }
    };

    // Best-effort history entry; a failed write never fails the search
    if let Ok(user_id) = auth.0.sub.parse::<Uuid>() {
        if let Err(e) = SearchLogRepo::append(
            &state.pool,
            user_id,
            destination,
            &resolution.route.route_name,
        )
        .await
        {
            tracing::warn!("Failed to append search log: {:#}", e);
        }
    }

    let route = resolution.route;
    Json(json!({
        "route_name": route.route_name,
        "vehicle_type": route.vehicle_type,
        "fare": route.fare,
        "estimated_time": route.estimated_time,
        "landmarks": route.landmarks,
        "coordinates": route.coordinates.0,
        "instructions": resolution.instructions,
    }))
    .into_response()
}
