use crate::auth::{
    create_access_token, generate_verification_token, hash_password, verify_password,
};
use crate::mailer::verification_url;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use ruta_common::models::auth::Role;
use ruta_db::UserRepo;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyQuery {
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct ResendRequest {
    pub email: String,
}

/// POST /api/auth/register
///
/// Creates an unverified commuter account and mails a verification link.
/// Registration never produces an admin.
#[tracing::instrument(skip(state, req), fields(email = %req.email))]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> impl IntoResponse {
    match UserRepo::get_by_email(&state.pool, &req.email).await {
        Ok(Some(_)) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Email already exists"})),
            )
                .into_response();
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!("DB error during registration: {:#}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response();
        }
    }

    let password_hash = match hash_password(&req.password) {
        Ok(h) => h,
        Err(e) => {
            tracing::error!("Failed to hash password: {:#}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response();
        }
    };

    let verification_token = generate_verification_token();

    if let Err(e) = UserRepo::create(
        &state.pool,
        Uuid::new_v4(),
        &req.full_name,
        &req.email,
        &password_hash,
        Role::Commuter.as_str(),
        Some(verification_token.as_str()),
    )
    .await
    {
        tracing::error!("Failed to create user: {:#}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Internal server error"})),
        )
            .into_response();
    }

    let url = verification_url(&state.config.public_base_url, &verification_token);
    let sent = match &state.mailer {
        Some(mailer) => mailer.send_verification(&req.email, &url).await,
        None => Err(anyhow::anyhow!("Mail is not configured")),
    };

    if let Err(e) = sent {
        // The account exists but cannot be verified; surface that distinctly
        // instead of a generic failure. The user row is kept so the mail can
        // be resent later.
        tracing::error!("Failed to send verification mail: {:#}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "User registered, but failed to send verification email. Please contact support or try again."
            })),
        )
            .into_response();
    }

    (
        StatusCode::CREATED,
        Json(json!({"message": "Check your email to verify your account"})),
    )
        .into_response()
}

/// GET /api/auth/verify?token=
#[tracing::instrument(skip(state, query))]
pub async fn verify_email(
    State(state): State<Arc<AppState>>,
    Query(query): Query<VerifyQuery>,
) -> impl IntoResponse {
    if query.token.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Invalid token"})),
        )
            .into_response();
    }

    let user = match UserRepo::get_by_verification_token(&state.pool, &query.token).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Invalid or expired token"})),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!("DB error during verification: {:#}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response();
        }
    };

    if let Err(e) = UserRepo::mark_verified(&state.pool, user.user_id).await {
        tracing::error!("Failed to mark user verified: {:#}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Internal server error"})),
        )
            .into_response();
    }

    Json(json!({"message": "Email verified successfully. You can now login."})).into_response()
}

/// POST /api/auth/login
#[tracing::instrument(skip(state, req), fields(email = %req.email))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    let user = match UserRepo::get_by_email(&state.pool, &req.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Invalid credentials"})),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!("DB error during login: {:#}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response();
        }
    };

    if !user.is_verified {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Please verify your email first"})),
        )
            .into_response();
    }

    match verify_password(&req.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Invalid credentials"})),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!("Password verification error: {:#}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response();
        }
    }

    let role = match user.role.as_str() {
        "admin" => Role::Admin,
        _ => Role::Commuter,
    };

    let token = match create_access_token(user.user_id, role, &state.config.auth.jwt_secret) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("Failed to create access token: {:#}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response();
        }
    };

    Json(json!({
        "token": token,
        "user": {
            "id": user.user_id,
            "full_name": user.full_name,
            "email": user.email,
            "role": user.role,
        }
    }))
    .into_response()
}

/// POST /api/auth/resend-verification
#[tracing::instrument(skip(state, req), fields(email = %req.email))]
pub async fn resend_verification(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ResendRequest>,
) -> impl IntoResponse {
    let user = match UserRepo::get_by_email(&state.pool, &req.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({"error": "User not found"})),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!("DB error during resend: {:#}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response();
        }
    };

    if user.is_verified {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Account already verified"})),
        )
            .into_response();
    }

    // Regenerate the token when the stored one is missing
    let verification_token = match user.verification_token {
        Some(t) => t,
        None => {
            let token = generate_verification_token();
            if let Err(e) =
                UserRepo::set_verification_token(&state.pool, user.user_id, &token).await
            {
                tracing::error!("Failed to store verification token: {:#}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "Internal server error"})),
                )
                    .into_response();
            }
            token
        }
    };

    let url = verification_url(&state.config.public_base_url, &verification_token);
    let sent = match &state.mailer {
        Some(mailer) => mailer.send_verification(&req.email, &url).await,
        None => Err(anyhow::anyhow!("Mail is not configured")),
    };

    if let Err(e) = sent {
        tracing::error!("Failed to resend verification mail: {:#}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Failed to send email"})),
        )
            .into_response();
    }

    Json(json!({"message": "Verification email resent successfully"})).into_response()
}
