use crate::state::AppState;
use crate::web::api::middleware::AuthUser;
use axum::{Json, extract::State, response::IntoResponse};
use ruta_db::ChatLogRepo;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub landmarks: Vec<String>,
}

/// POST /api/chat
///
/// Relays a location question to the completion service verbatim. The client
/// never fails, so there is no error path here beyond logging.
#[tracing::instrument(skip(state, req))]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(req): Json<ChatRequest>,
) -> impl IntoResponse {
    let reply = state
        .ai
        .ask(&req.message, req.lat, req.lng, &req.landmarks)
        .await;

    // Best-effort history entry; a failed write never fails the chat
    if let Ok(user_id) = auth.0.sub.parse::<Uuid>() {
        if let Err(e) = ChatLogRepo::append(&state.pool, user_id, &req.message, &reply).await {
            tracing::warn!("Failed to append chat log: {:#}", e);
        }
    }

    Json(json!({"reply": reply}))
}
