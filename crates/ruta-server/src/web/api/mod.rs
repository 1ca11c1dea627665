pub mod auth;
pub mod chat;
pub mod landmarks;
pub mod middleware;
pub mod routes;
pub mod search;
pub mod stats;
pub mod suggestions;

use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

pub fn build_api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        // Account lifecycle
        .route("/auth/register", post(auth::register))
        .route("/auth/verify", get(auth::verify_email))
        .route("/auth/login", post(auth::login))
        .route("/auth/resend-verification", post(auth::resend_verification))
        // Destination search (commuter)
        .route("/search", post(search::search_destination))
        // Landmark suggestions
        .route(
            "/suggestions",
            post(suggestions::submit_suggestion).get(suggestions::list_suggestions),
        )
        .route("/suggestions/{id}/approve", put(suggestions::approve_suggestion))
        .route("/suggestions/{id}/reject", put(suggestions::reject_suggestion))
        // Route catalog (reads are public, writes admin-only)
        .route("/routes", post(routes::create_route).get(routes::list_routes))
        .route(
            "/routes/{id}",
            get(routes::get_route)
                .put(routes::update_route)
                .delete(routes::delete_route),
        )
        // Landmark catalog
        .route(
            "/landmarks",
            post(landmarks::create_landmark).get(landmarks::list_landmarks),
        )
        .route("/landmarks/route/{route_name}", get(landmarks::list_landmarks_by_route))
        // AI chat relay
        .route("/chat", post(chat::chat))
        // Dashboard counts (unauthenticated, see DESIGN notes)
        .route("/stats/dashboard", get(stats::dashboard))
        .with_state(state)
}
