//! Navigation route
//!
//! Serves the role- and allow-list-filtered sidebar tree for the caller.

use axum::extract::State;
use axum::Json;

use crate::middleware::auth::AuthUser;
use crate::services::navigation::NavEntry;
use crate::state::AppContext;
use crate::utils::errors::Result;

/// `GET /api/navigation` — sidebar tree for the authenticated user
pub async fn get_navigation(
    State(ctx): State<AppContext>,
    auth: AuthUser,
) -> Result<Json<Vec<NavEntry>>> {
    let tree = ctx
        .services
        .navigation_service
        .navigation_for_user(&auth.user)
        .await?;

    Ok(Json(tree))
}
