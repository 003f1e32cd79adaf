//! User administration routes

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::middleware::auth::AuthUser;
use crate::models::user::{CreateUserRequest, UpdateUserRequest, User};
use crate::services::auth::Permission;
use crate::state::AppContext;
use crate::utils::errors::Result;
use crate::utils::logging;

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct VisiblePagesRequest {
    pub visible_pages: Vec<String>,
}

/// `POST /api/users` — create a user account
pub async fn create_user(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<User>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageUsers)?;

    let user = ctx.services.user_service.create_user(request).await?;
    logging::log_admin_action(auth.user.id, "create_user", Some(&user.email), None);
    Ok(Json(user))
}

/// `GET /api/users` — list user accounts
pub async fn list_users(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<Vec<User>>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageUsers)?;

    let users = ctx
        .services
        .user_service
        .list_users(query.page.unwrap_or(1), query.page_size.unwrap_or(50))
        .await?;
    Ok(Json(users))
}

/// `GET /api/users/{id}` — fetch one user
pub async fn get_user(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(user_id): Path<i64>,
) -> Result<Json<User>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageUsers)?;

    let user = ctx.services.user_service.get_user(user_id).await?;
    Ok(Json(user))
}

/// `PATCH /api/users/{id}` — update a user account
pub async fn update_user(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(user_id): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<User>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageUsers)?;

    let user = ctx.services.user_service.update_user(user_id, request).await?;
    ctx.services.navigation_service.invalidate_user(user_id).await?;
    logging::log_admin_action(auth.user.id, "update_user", Some(&user.email), None);
    Ok(Json(user))
}

/// `PUT /api/users/{id}/visible-pages` — replace the allow-list
pub async fn set_visible_pages(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(user_id): Path<i64>,
    Json(request): Json<VisiblePagesRequest>,
) -> Result<Json<User>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageUsers)?;

    let user = ctx
        .services
        .user_service
        .set_visible_pages(user_id, request.visible_pages)
        .await?;
    ctx.services.navigation_service.invalidate_user(user_id).await?;
    Ok(Json(user))
}

/// `POST /api/users/{id}/deactivate` — end a user's access
pub async fn deactivate_user(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(user_id): Path<i64>,
) -> Result<Json<User>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageUsers)?;

    let user = ctx.services.user_service.deactivate_user(user_id).await?;
    logging::log_admin_action(auth.user.id, "deactivate_user", Some(&user.email), None);
    Ok(Json(user))
}

/// `DELETE /api/users/{id}` — remove a user account
pub async fn delete_user(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(user_id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageUsers)?;

    ctx.services.user_service.delete_user(user_id).await?;
    ctx.services.navigation_service.invalidate_user(user_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
