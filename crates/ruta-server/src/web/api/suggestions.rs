use crate::state::AppState;
use crate::web::api::middleware::{AdminUser, CommuterUser};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use ruta_common::models::catalog::SuggestionStatus;
use ruta_db::{SuggestionRepo, SuggestionRow};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct SubmitSuggestionRequest {
    pub landmark_name: String,
    pub latitude: f64,
    pub longitude: f64,
}

fn suggestion_json(s: &SuggestionRow) -> serde_json::Value {
    json!({
        "id": s.suggestion_id,
        "landmark_name": s.landmark_name,
        "latitude": s.latitude,
        "longitude": s.longitude,
        "submitted_by": s.submitted_by,
        "status": s.status,
        "submitted_at": s.submitted_at,
    })
}

/// POST /api/suggestions
#[tracing::instrument(skip(state, req))]
pub async fn submit_suggestion(
    State(state): State<Arc<AppState>>,
    auth: CommuterUser,
    Json(req): Json<SubmitSuggestionRequest>,
) -> impl IntoResponse {
    let user_id: Uuid = match auth.0.sub.parse() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Invalid user ID in token"})),
            )
                .into_response();
        }
    };

    match SuggestionRepo::create(
        &state.pool,
        &req.landmark_name,
        req.latitude,
        req.longitude,
        user_id,
    )
    .await
    {
        Ok(suggestion) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "Suggestion submitted successfully",
                "suggestion": suggestion_json(&suggestion),
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to create suggestion: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response()
        }
    }
}

/// GET /api/suggestions
#[tracing::instrument(skip(state))]
pub async fn list_suggestions(
    State(state): State<Arc<AppState>>,
    _auth: AdminUser,
) -> impl IntoResponse {
    match SuggestionRepo::list_with_submitter(&state.pool).await {
        Ok(suggestions) => {
            let body: Vec<serde_json::Value> = suggestions
                .iter()
                .map(|s| {
                    json!({
                        "id": s.suggestion_id,
                        "landmark_name": s.landmark_name,
                        "latitude": s.latitude,
                        "longitude": s.longitude,
                        "status": s.status,
                        "submitted_at": s.submitted_at,
                        "submitted_by": {
                            "id": s.submitted_by,
                            "full_name": s.submitter_name,
                            "email": s.submitter_email,
                        },
                    })
                })
                .collect();
            Json(body).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to list suggestions: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response()
        }
    }
}

/// Shared status transition for approve/reject. The update is a plain
/// overwrite: re-approving an approved suggestion is allowed and idempotent.
async fn set_status(state: &AppState, id: &str, status: SuggestionStatus) -> Response {
    let suggestion_id = match id.parse::<Uuid>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Invalid suggestion ID"})),
            )
                .into_response();
        }
    };

    match SuggestionRepo::set_status(&state.pool, suggestion_id, status.as_str()).await {
        Ok(Some(suggestion)) => Json(suggestion_json(&suggestion)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Suggestion not found"})),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to update suggestion: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response()
        }
    }
}

/// PUT /api/suggestions/:id/approve
#[tracing::instrument(skip(state))]
pub async fn approve_suggestion(
    State(state): State<Arc<AppState>>,
    _auth: AdminUser,
    Path(id): Path<String>,
) -> impl IntoResponse {
    set_status(&state, &id, SuggestionStatus::Approved).await
}

/// PUT /api/suggestions/:id/reject
#[tracing::instrument(skip(state))]
pub async fn reject_suggestion(
    State(state): State<Arc<AppState>>,
    _auth: AdminUser,
    Path(id): Path<String>,
) -> impl IntoResponse {
    set_status(&state, &id, SuggestionStatus::Rejected).await
}
