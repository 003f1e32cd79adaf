//! Lead routes, including the step tracker

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::middleware::auth::AuthUser;
use crate::models::lead::{CreateLeadRequest, Lead, LeadProgressRequest, UpdateLeadRequest};
use crate::services::auth::Permission;
use crate::state::AppContext;
use crate::utils::errors::Result;

#[derive(Debug, Deserialize)]
pub struct ListLeadsQuery {
    pub status: Option<String>,
    pub assigned_to: Option<i64>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// `POST /api/leads` — create a lead
pub async fn create_lead(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Json(request): Json<CreateLeadRequest>,
) -> Result<Json<Lead>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageLeads)?;

    let lead = ctx.services.lead_service.create_lead(request).await?;
    Ok(Json(lead))
}

/// `GET /api/leads` — list leads, filterable by status and assignee
pub async fn list_leads(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Query(query): Query<ListLeadsQuery>,
) -> Result<Json<Vec<Lead>>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageLeads)?;

    let leads = ctx
        .services
        .lead_service
        .list_leads(
            query.status.as_deref(),
            query.assigned_to,
            query.page.unwrap_or(1),
            query.page_size.unwrap_or(50),
        )
        .await?;
    Ok(Json(leads))
}

/// `GET /api/leads/{id}` — fetch one lead
pub async fn get_lead(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(lead_id): Path<i64>,
) -> Result<Json<Lead>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageLeads)?;

    let lead = ctx.services.lead_service.get_lead(lead_id).await?;
    Ok(Json(lead))
}

/// `PATCH /api/leads/{id}` — update contact fields
pub async fn update_lead(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(lead_id): Path<i64>,
    Json(request): Json<UpdateLeadRequest>,
) -> Result<Json<Lead>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageLeads)?;

    let lead = ctx.services.lead_service.update_lead(lead_id, request).await?;
    Ok(Json(lead))
}

/// `PATCH /api/leads/{id}/progress` — advance or roll back the step tracker
pub async fn update_progress(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(lead_id): Path<i64>,
    Json(request): Json<LeadProgressRequest>,
) -> Result<Json<Lead>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageLeads)?;

    let lead = ctx.services.lead_service.update_progress(lead_id, request).await?;
    Ok(Json(lead))
}

/// `DELETE /api/leads/{id}` — remove a lead
pub async fn delete_lead(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(lead_id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageLeads)?;

    ctx.services.lead_service.delete_lead(lead_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
