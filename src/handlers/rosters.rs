//! Participant and staff roster routes

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::middleware::auth::AuthUser;
use crate::models::roster::{
    AssignStaffRequest, CampStaff, CreateParticipantRequest, CreateStaffRequest, Participant,
    Staff, UpdateParticipantRequest, UpdateStaffRequest,
};
use crate::services::auth::Permission;
use crate::state::AppContext;
use crate::utils::errors::Result;

#[derive(Debug, Deserialize)]
pub struct ListStaffQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// `POST /api/camps/{id}/participants` — add a participant to a camp
pub async fn create_participant(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(camp_id): Path<i64>,
    Json(request): Json<CreateParticipantRequest>,
) -> Result<Json<Participant>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageRoster)?;

    let participant = ctx
        .services
        .roster_service
        .create_participant(camp_id, request)
        .await?;
    Ok(Json(participant))
}

/// `GET /api/camps/{id}/participants` — a camp's participant roster
pub async fn list_participants(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(camp_id): Path<i64>,
) -> Result<Json<Vec<Participant>>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageRoster)?;

    let participants = ctx.services.roster_service.list_participants(camp_id).await?;
    Ok(Json(participants))
}

/// `GET /api/participants/{id}` — fetch one participant
pub async fn get_participant(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(participant_id): Path<i64>,
) -> Result<Json<Participant>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageRoster)?;

    let participant = ctx.services.roster_service.get_participant(participant_id).await?;
    Ok(Json(participant))
}

/// `PATCH /api/participants/{id}` — update a participant
pub async fn update_participant(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(participant_id): Path<i64>,
    Json(request): Json<UpdateParticipantRequest>,
) -> Result<Json<Participant>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageRoster)?;

    let participant = ctx
        .services
        .roster_service
        .update_participant(participant_id, request)
        .await?;
    Ok(Json(participant))
}

/// `DELETE /api/participants/{id}` — remove a participant
pub async fn delete_participant(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(participant_id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageRoster)?;

    ctx.services.roster_service.delete_participant(participant_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// `POST /api/staff` — create a staff member
pub async fn create_staff(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Json(request): Json<CreateStaffRequest>,
) -> Result<Json<Staff>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageRoster)?;

    let staff = ctx.services.roster_service.create_staff(request).await?;
    Ok(Json(staff))
}

/// `GET /api/staff` — list staff
pub async fn list_staff(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Query(query): Query<ListStaffQuery>,
) -> Result<Json<Vec<Staff>>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageRoster)?;

    let staff = ctx
        .services
        .roster_service
        .list_staff(query.page.unwrap_or(1), query.page_size.unwrap_or(50))
        .await?;
    Ok(Json(staff))
}

/// `GET /api/staff/{id}` — fetch one staff member
pub async fn get_staff(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(staff_id): Path<i64>,
) -> Result<Json<Staff>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageRoster)?;

    let staff = ctx.services.roster_service.get_staff(staff_id).await?;
    Ok(Json(staff))
}

/// `PATCH /api/staff/{id}` — update a staff member
pub async fn update_staff(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(staff_id): Path<i64>,
    Json(request): Json<UpdateStaffRequest>,
) -> Result<Json<Staff>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageRoster)?;

    let staff = ctx.services.roster_service.update_staff(staff_id, request).await?;
    Ok(Json(staff))
}

/// `DELETE /api/staff/{id}` — remove a staff member
pub async fn delete_staff(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(staff_id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageRoster)?;

    ctx.services.roster_service.delete_staff(staff_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// `POST /api/camps/{id}/staff` — assign a staff member to a camp
pub async fn assign_staff(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(camp_id): Path<i64>,
    Json(request): Json<AssignStaffRequest>,
) -> Result<Json<CampStaff>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageRoster)?;

    let assignment = ctx
        .services
        .roster_service
        .assign_staff(camp_id, request.staff_id, request.duty)
        .await?;
    Ok(Json(assignment))
}

/// `GET /api/camps/{id}/staff` — a camp's staff assignments
pub async fn list_camp_staff(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(camp_id): Path<i64>,
) -> Result<Json<Vec<CampStaff>>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageRoster)?;

    let assignments = ctx.services.roster_service.list_camp_staff(camp_id).await?;
    Ok(Json(assignments))
}

/// `DELETE /api/camps/{id}/staff/{staff_id}` — remove an assignment
pub async fn remove_camp_staff(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path((camp_id, staff_id)): Path<(i64, i64)>,
) -> Result<Json<serde_json::Value>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageRoster)?;

    ctx.services.roster_service.remove_camp_staff(camp_id, staff_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
