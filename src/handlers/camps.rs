//! Camp and registration routes

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::middleware::auth::AuthUser;
use crate::models::camp::{
    Camp, CreateCampRequest, CreateRegistrationRequest, Registration, UpdateCampRequest,
    UpdateRegistrationRequest,
};
use crate::services::auth::Permission;
use crate::state::AppContext;
use crate::utils::errors::{Result, ThreadlineError};

#[derive(Debug, Deserialize)]
pub struct ListCampsQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// `POST /api/camps` — create a camp
pub async fn create_camp(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Json(request): Json<CreateCampRequest>,
) -> Result<Json<Camp>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageCamps)?;

    let camp = ctx.services.camp_service.create_camp(request).await?;
    Ok(Json(camp))
}

/// `GET /api/camps` — list camps
pub async fn list_camps(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Query(query): Query<ListCampsQuery>,
) -> Result<Json<Vec<Camp>>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageCamps)?;

    let camps = ctx
        .services
        .camp_service
        .list_camps(query.page.unwrap_or(1), query.page_size.unwrap_or(50))
        .await?;
    Ok(Json(camps))
}

/// `GET /api/camps/{id}` — fetch one camp
pub async fn get_camp(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(camp_id): Path<i64>,
) -> Result<Json<Camp>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageCamps)?;

    let camp = ctx.services.camp_service.get_camp(camp_id).await?;
    Ok(Json(camp))
}

/// `PATCH /api/camps/{id}` — update a camp
pub async fn update_camp(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(camp_id): Path<i64>,
    Json(request): Json<UpdateCampRequest>,
) -> Result<Json<Camp>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageCamps)?;

    let camp = ctx.services.camp_service.update_camp(camp_id, request).await?;
    Ok(Json(camp))
}

/// `DELETE /api/camps/{id}` — remove a camp
pub async fn delete_camp(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(camp_id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageCamps)?;

    ctx.services.camp_service.delete_camp(camp_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// `POST /api/camps/{id}/registrations` — register a participant
pub async fn create_registration(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(camp_id): Path<i64>,
    Json(request): Json<CreateRegistrationRequest>,
) -> Result<Json<Registration>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageCamps)?;

    let registration = ctx
        .services
        .camp_service
        .register_participant(camp_id, request)
        .await?;
    Ok(Json(registration))
}

/// `GET /api/camps/{id}/registrations` — list a camp's registrations
pub async fn list_registrations(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(camp_id): Path<i64>,
) -> Result<Json<Vec<Registration>>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageCamps)?;

    let registrations = ctx.services.camp_service.list_registrations(camp_id).await?;
    Ok(Json(registrations))
}

/// `PATCH /api/registrations/{id}` — update payment status
pub async fn update_registration(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(registration_id): Path<i64>,
    Json(request): Json<UpdateRegistrationRequest>,
) -> Result<Json<Registration>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageCamps)?;

    let payment_status = request.payment_status.ok_or_else(|| {
        ThreadlineError::InvalidInput("payment_status is required".to_string())
    })?;

    let registration = ctx
        .services
        .camp_service
        .set_registration_payment(registration_id, &payment_status)
        .await?;
    Ok(Json(registration))
}

/// `POST /api/registrations/{id}/cancel` — cancel a registration
pub async fn cancel_registration(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(registration_id): Path<i64>,
) -> Result<Json<Registration>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageCamps)?;

    let registration = ctx
        .services
        .camp_service
        .cancel_registration(registration_id)
        .await?;
    Ok(Json(registration))
}
