use crate::auth::validate_access_token;
use crate::state::AppState;
use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use ruta_common::models::auth::{Claims, Role};
use serde_json::json;
use std::sync::Arc;

/// Extractor that validates a JWT Bearer token and provides the claims.
/// Use `Option<AuthUser>` for optional auth (unauthenticated access allowed).
/// Use `AuthUser` directly for required auth.
#[derive(Debug)]
pub struct AuthUser(pub Claims);

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        let token = match auth_header {
            Some(val) => match val.strip_prefix("Bearer ") {
                Some(t) => t,
                None => {
                    return Err((
                        StatusCode::UNAUTHORIZED,
                        Json(json!({"error": "Invalid authorization header format"})),
                    )
                        .into_response());
                }
            },
            None => {
                return Err((
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"error": "Missing authorization header"})),
                )
                    .into_response());
            }
        };

        match validate_access_token(token, &state.config.auth.jwt_secret) {
            Ok(claims) => Ok(AuthUser(claims)),
            Err(_) => Err((
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "Invalid or expired token"})),
            )
                .into_response()),
        }
    }
}

/// Extractor for admin-only routes: valid token AND admin role
#[derive(Debug)]
pub struct AdminUser(pub Claims);

impl FromRequestParts<Arc<AppState>> for AdminUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;
        if claims.role != Role::Admin {
            return Err((
                StatusCode::FORBIDDEN,
                Json(json!({"error": "Access denied: admins only"})),
            )
                .into_response());
        }
        Ok(AdminUser(claims))
    }
}

/// Extractor for commuter-only routes: valid token AND commuter role
#[derive(Debug)]
pub struct CommuterUser(pub Claims);

impl FromRequestParts<Arc<AppState>> for CommuterUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;
        if claims.role != Role::Commuter {
            return Err((
                StatusCode::FORBIDDEN,
                Json(json!({"error": "Access denied: commuters only"})),
            )
                .into_response());
        }
        Ok(CommuterUser(claims))
    }
}
