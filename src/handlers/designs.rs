//! Design job routes

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::middleware::auth::AuthUser;
use crate::models::design::{
    CreateDesignProjectRequest, CreateDesignVersionRequest, DesignProject, DesignVersion,
    UpdateDesignProjectRequest,
};
use crate::services::auth::Permission;
use crate::state::AppContext;
use crate::utils::errors::Result;

#[derive(Debug, Deserialize)]
pub struct ListDesignsQuery {
    pub designer_id: Option<i64>,
    pub status: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct AssignDesignerRequest {
    pub designer_id: i64,
}

/// `POST /api/designs` — create a design project
pub async fn create_project(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Json(request): Json<CreateDesignProjectRequest>,
) -> Result<Json<DesignProject>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageDesigns)?;

    let project = ctx.services.design_service.create_project(request).await?;
    Ok(Json(project))
}

/// `GET /api/designs` — list projects, filterable by designer and status
pub async fn list_projects(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Query(query): Query<ListDesignsQuery>,
) -> Result<Json<Vec<DesignProject>>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageDesigns)?;

    let projects = ctx
        .services
        .design_service
        .list_projects(
            query.designer_id,
            query.status.as_deref(),
            query.page.unwrap_or(1),
            query.page_size.unwrap_or(50),
        )
        .await?;
    Ok(Json(projects))
}

/// `GET /api/designs/{id}` — fetch one project
pub async fn get_project(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(project_id): Path<i64>,
) -> Result<Json<DesignProject>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageDesigns)?;

    let project = ctx.services.design_service.get_project(project_id).await?;
    Ok(Json(project))
}

/// `PATCH /api/designs/{id}` — update a project
pub async fn update_project(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(project_id): Path<i64>,
    Json(request): Json<UpdateDesignProjectRequest>,
) -> Result<Json<DesignProject>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageDesigns)?;

    let project = ctx
        .services
        .design_service
        .update_project(project_id, request)
        .await?;
    Ok(Json(project))
}

/// `POST /api/designs/{id}/assign` — assign a designer
pub async fn assign_designer(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(project_id): Path<i64>,
    Json(request): Json<AssignDesignerRequest>,
) -> Result<Json<DesignProject>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageDesigns)?;

    let project = ctx
        .services
        .design_service
        .assign_designer(project_id, request.designer_id)
        .await?;
    Ok(Json(project))
}

/// `POST /api/designs/{id}/versions` — add a version
pub async fn add_version(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(project_id): Path<i64>,
    Json(request): Json<CreateDesignVersionRequest>,
) -> Result<Json<DesignVersion>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageDesigns)?;

    let version = ctx
        .services
        .design_service
        .add_version(project_id, request, Some(auth.user.id))
        .await?;
    Ok(Json(version))
}

/// `GET /api/designs/{id}/versions` — list versions
pub async fn list_versions(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(project_id): Path<i64>,
) -> Result<Json<Vec<DesignVersion>>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageDesigns)?;

    let versions = ctx.services.design_service.list_versions(project_id).await?;
    Ok(Json(versions))
}

/// `POST /api/designs/{id}/versions/{version_id}/approve` — approve a version
pub async fn approve_version(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path((project_id, version_id)): Path<(i64, i64)>,
) -> Result<Json<DesignProject>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageDesigns)?;

    let project = ctx
        .services
        .design_service
        .approve_version(project_id, version_id)
        .await?;
    Ok(Json(project))
}

/// `DELETE /api/designs/{id}` — remove a project
pub async fn delete_project(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(project_id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageDesigns)?;

    ctx.services.design_service.delete_project(project_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
