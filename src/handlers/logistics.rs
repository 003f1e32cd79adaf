//! Schedule and travel routes

use axum::extract::{Path, State};
use axum::Json;

use crate::middleware::auth::AuthUser;
use crate::models::schedule::{CreateScheduleEventRequest, ScheduleEvent, UpdateScheduleEventRequest};
use crate::models::travel::{CreateTravelRequest, TravelArrangement, UpdateTravelRequest};
use crate::services::auth::Permission;
use crate::state::AppContext;
use crate::utils::errors::Result;

/// `POST /api/camps/{id}/schedule` — add a schedule event
pub async fn create_schedule_event(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(camp_id): Path<i64>,
    Json(request): Json<CreateScheduleEventRequest>,
) -> Result<Json<ScheduleEvent>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageCamps)?;

    let event = ctx
        .services
        .logistics_service
        .create_schedule_event(camp_id, request)
        .await?;
    Ok(Json(event))
}

/// `GET /api/camps/{id}/schedule` — the camp's schedule in day order
pub async fn list_schedule(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(camp_id): Path<i64>,
) -> Result<Json<Vec<ScheduleEvent>>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageCamps)?;

    let events = ctx.services.logistics_service.list_schedule(camp_id).await?;
    Ok(Json(events))
}

/// `GET /api/schedule/{id}` — fetch one schedule event
pub async fn get_schedule_event(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(event_id): Path<i64>,
) -> Result<Json<ScheduleEvent>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageCamps)?;

    let event = ctx.services.logistics_service.get_schedule_event(event_id).await?;
    Ok(Json(event))
}

/// `PATCH /api/schedule/{id}` — update a schedule event
pub async fn update_schedule_event(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(event_id): Path<i64>,
    Json(request): Json<UpdateScheduleEventRequest>,
) -> Result<Json<ScheduleEvent>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageCamps)?;

    let event = ctx
        .services
        .logistics_service
        .update_schedule_event(event_id, request)
        .await?;
    Ok(Json(event))
}

/// `DELETE /api/schedule/{id}` — remove a schedule event
pub async fn delete_schedule_event(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(event_id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageCamps)?;

    ctx.services.logistics_service.delete_schedule_event(event_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// `POST /api/camps/{id}/travel` — add a travel leg
pub async fn create_travel(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(camp_id): Path<i64>,
    Json(request): Json<CreateTravelRequest>,
) -> Result<Json<TravelArrangement>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageTravel)?;

    let travel = ctx.services.logistics_service.create_travel(camp_id, request).await?;
    Ok(Json(travel))
}

/// `GET /api/camps/{id}/travel` — a camp's travel legs
pub async fn list_travel(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(camp_id): Path<i64>,
) -> Result<Json<Vec<TravelArrangement>>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageTravel)?;

    let legs = ctx.services.logistics_service.list_travel(camp_id).await?;
    Ok(Json(legs))
}

/// `GET /api/travel/{id}` — fetch one travel leg
pub async fn get_travel(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(travel_id): Path<i64>,
) -> Result<Json<TravelArrangement>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageTravel)?;

    let travel = ctx.services.logistics_service.get_travel(travel_id).await?;
    Ok(Json(travel))
}

/// `PATCH /api/travel/{id}` — update a travel leg
pub async fn update_travel(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(travel_id): Path<i64>,
    Json(request): Json<UpdateTravelRequest>,
) -> Result<Json<TravelArrangement>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageTravel)?;

    let travel = ctx.services.logistics_service.update_travel(travel_id, request).await?;
    Ok(Json(travel))
}

/// `DELETE /api/travel/{id}` — remove a travel leg
pub async fn delete_travel(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(travel_id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageTravel)?;

    ctx.services.logistics_service.delete_travel(travel_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
