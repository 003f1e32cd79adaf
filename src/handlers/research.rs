//! Fabric and pattern research routes

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::middleware::auth::AuthUser;
use crate::models::research::{CreateResearchNoteRequest, ResearchNote, UpdateResearchNoteRequest};
use crate::services::auth::Permission;
use crate::state::AppContext;
use crate::utils::errors::{Result, ThreadlineError};

#[derive(Debug, Deserialize)]
pub struct ListResearchQuery {
    pub kind: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

fn require_feature(ctx: &AppContext) -> Result<()> {
    if !ctx.settings.features.research_tracker {
        return Err(ThreadlineError::ServiceUnavailable(
            "Research tracker is disabled".to_string(),
        ));
    }
    Ok(())
}

/// `POST /api/research` — create a research note
pub async fn create_note(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Json(request): Json<CreateResearchNoteRequest>,
) -> Result<Json<ResearchNote>> {
    require_feature(&ctx)?;
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageResearch)?;

    let note = ctx
        .services
        .research_service
        .create_note(request, Some(auth.user.id))
        .await?;
    Ok(Json(note))
}

/// `GET /api/research` — list notes, filterable by kind
pub async fn list_notes(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Query(query): Query<ListResearchQuery>,
) -> Result<Json<Vec<ResearchNote>>> {
    require_feature(&ctx)?;
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageResearch)?;

    let notes = ctx
        .services
        .research_service
        .list_notes(
            query.kind.as_deref(),
            query.page.unwrap_or(1),
            query.page_size.unwrap_or(50),
        )
        .await?;
    Ok(Json(notes))
}

/// `GET /api/research/{id}` — fetch one note
pub async fn get_note(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(note_id): Path<i64>,
) -> Result<Json<ResearchNote>> {
    require_feature(&ctx)?;
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageResearch)?;

    let note = ctx.services.research_service.get_note(note_id).await?;
    Ok(Json(note))
}

/// `PATCH /api/research/{id}` — update a note
pub async fn update_note(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(note_id): Path<i64>,
    Json(request): Json<UpdateResearchNoteRequest>,
) -> Result<Json<ResearchNote>> {
    require_feature(&ctx)?;
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageResearch)?;

    let note = ctx.services.research_service.update_note(note_id, request).await?;
    Ok(Json(note))
}

/// `DELETE /api/research/{id}` — remove a note
pub async fn delete_note(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(note_id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    require_feature(&ctx)?;
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageResearch)?;

    ctx.services.research_service.delete_note(note_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
