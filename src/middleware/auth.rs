//! Authentication middleware
//!
//! Extracts and verifies the bearer token on protected routes, loads the
//! user, and builds the permission context handlers check against.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::models::user::User;
use crate::services::auth::AuthContext;
use crate::state::AppContext;
use crate::utils::errors::ThreadlineError;

/// The authenticated caller, available to any handler as an extractor
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
    pub context: AuthContext,
}

fn bearer_token(parts: &Parts) -> Result<&str, ThreadlineError> {
    let header = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            ThreadlineError::Authentication("Missing Authorization header".to_string())
        })?;

    header.strip_prefix("Bearer ").ok_or_else(|| {
        ThreadlineError::Authentication("Authorization header must be a bearer token".to_string())
    })
}

impl FromRequestParts<AppContext> for AuthUser {
    type Rejection = ThreadlineError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let auth = &state.services.auth_service;
        let claims = auth.verify_token(token).await?;
        let user = auth.load_user(&claims).await?;
        let context = auth.get_auth_context(&user)?;

        Ok(AuthUser { user, context })
    }
}
