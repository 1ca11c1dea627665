use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use ruta_db::{LandmarkRepo, RouteRepo, SuggestionRepo, UserRepo};
use serde_json::json;
use std::sync::Arc;

/// GET /api/stats/dashboard
///
/// Aggregate counts for the admin dashboard. Routes only count active ones;
/// users only count commuters.
#[tracing::instrument(skip(state))]
pub async fn dashboard(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let counts = tokio::try_join!(
        RouteRepo::count_active(&state.pool),
        LandmarkRepo::count(&state.pool),
        SuggestionRepo::count_pending(&state.pool),
        UserRepo::count_commuters(&state.pool),
    );

    match counts {
        Ok((routes, landmarks, pending, users)) => Json(json!({
            "routes": routes,
            "landmarks": landmarks,
            "pendingSuggestions": pending,
            "users": users,
        }))
        .into_response(),
        Err(e) => {
            tracing::error!("Failed to load dashboard stats: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response()
        }
    }
}
