//! Session routes: login, logout, current user

use axum::extract::State;
use axum::Json;

use crate::middleware::auth::AuthUser;
use crate::models::user::{LoginRequest, LoginResponse, User};
use crate::state::AppContext;
use crate::utils::errors::{Result, ThreadlineError};

/// `POST /api/auth/login` — authenticate and issue a session token
pub async fn login(
    State(ctx): State<AppContext>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let (token, user) = ctx
        .services
        .auth_service
        .login(&request.email, &request.password)
        .await?;

    Ok(Json(LoginResponse { token, user }))
}

/// `POST /api/auth/logout` — revoke the current session
pub async fn logout(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    headers: axum::http::HeaderMap,
) -> Result<Json<serde_json::Value>> {
    let token = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .ok_or_else(|| ThreadlineError::Authentication("Missing bearer token".to_string()))?;

    let claims = ctx.services.auth_service.verify_token(token).await?;
    ctx.services.auth_service.logout(&claims).await?;

    tracing::info!(user_id = auth.user.id, "User logged out");
    Ok(Json(serde_json::json!({ "logged_out": true })))
}

/// `GET /api/auth/me` — the authenticated user
pub async fn me(auth: AuthUser) -> Json<User> {
    Json(auth.user)
}
