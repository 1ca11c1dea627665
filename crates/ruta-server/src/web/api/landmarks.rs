use crate::state::AppState;
use crate::web::api::middleware::AdminUser;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use ruta_common::models::catalog::LandmarkCategory;
use ruta_db::{LandmarkRepo, LandmarkRow, NewLandmark};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct CreateLandmarkRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub category: LandmarkCategory,
    pub near_route: String,
    pub latitude: f64,
    pub longitude: f64,
}

fn landmark_json(landmark: &LandmarkRow) -> serde_json::Value {
    json!({
        "id": landmark.landmark_id,
        "name": landmark.name,
        "type": landmark.category,
        "near_route": landmark.near_route,
        "latitude": landmark.latitude,
        "longitude": landmark.longitude,
        "created_at": landmark.created_at,
    })
}

/// POST /api/landmarks
#[tracing::instrument(skip(state, req))]
pub async fn create_landmark(
    State(state): State<Arc<AppState>>,
    _auth: AdminUser,
    Json(req): Json<CreateLandmarkRequest>,
) -> impl IntoResponse {
    let new_landmark = NewLandmark {
        name: req.name,
        category: req.category.as_str().to_string(),
        near_route: req.near_route,
        latitude: req.latitude,
        longitude: req.longitude,
    };

    match LandmarkRepo::create(&state.pool, &new_landmark).await {
        Ok(landmark) => (StatusCode::CREATED, Json(landmark_json(&landmark))).into_response(),
        Err(e) => {
            tracing::error!("Failed to create landmark: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response()
        }
    }
}

/// GET /api/landmarks
#[tracing::instrument(skip(state))]
pub async fn list_landmarks(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match LandmarkRepo::list(&state.pool).await {
        Ok(landmarks) => {
            let body: Vec<serde_json::Value> = landmarks.iter().map(landmark_json).collect();
            Json(body).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to list landmarks: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response()
        }
    }
}

/// GET /api/landmarks/route/:routeName
///
/// near_route is a free-text reference, so the match is by exact name and an
/// unknown route simply yields an empty list.
#[tracing::instrument(skip(state))]
pub async fn list_landmarks_by_route(
    State(state): State<Arc<AppState>>,
    Path(route_name): Path<String>,
) -> impl IntoResponse {
    match LandmarkRepo::list_by_route(&state.pool, &route_name).await {
        Ok(landmarks) => {
            let body: Vec<serde_json::Value> = landmarks.iter().map(landmark_json).collect();
            Json(body).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to list landmarks by route: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response()
        }
    }
}
