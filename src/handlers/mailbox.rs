//! Internal mail routes

use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::models::message::{ComposeRequest, MailFolder, MailMessage, MailboxSummary};
use crate::services::auth::Permission;
use crate::state::AppContext;
use crate::utils::errors::{Result, ThreadlineError};

fn require_mailbox(ctx: &AppContext, auth: &AuthUser) -> Result<()> {
    if !ctx.settings.features.mailbox {
        return Err(ThreadlineError::ServiceUnavailable(
            "Mailbox is disabled".to_string(),
        ));
    }
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::UseMailbox)
}

fn parse_folder(folder: &str) -> Result<MailFolder> {
    MailFolder::parse(folder)
        .ok_or_else(|| ThreadlineError::InvalidInput(format!("Unknown folder: {}", folder)))
}

/// `POST /api/mail/messages` — compose and deliver a message
pub async fn compose(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Json(request): Json<ComposeRequest>,
) -> Result<Json<MailMessage>> {
    require_mailbox(&ctx, &auth)?;

    // Recipients must be real accounts before fan-out.
    futures::future::try_join_all(
        request
            .to_user_ids
            .iter()
            .map(|recipient| ctx.services.user_service.get_user(*recipient)),
    )
    .await?;

    let message = ctx
        .services
        .mailbox_service
        .compose(auth.user.id, &auth.user.display_name, request)
        .await?;
    Ok(Json(message))
}

/// `GET /api/mail/folders/{folder}` — list a folder, newest first
pub async fn list_folder(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(folder): Path<String>,
) -> Result<Json<Vec<MailMessage>>> {
    require_mailbox(&ctx, &auth)?;
    let folder = parse_folder(&folder)?;

    let messages = ctx.services.mailbox_service.list_folder(auth.user.id, folder).await;
    Ok(Json(messages))
}

/// `GET /api/mail/messages/{id}` — read a message (marks it read)
pub async fn get_message(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MailMessage>> {
    require_mailbox(&ctx, &auth)?;

    let message = ctx.services.mailbox_service.get_message(auth.user.id, id).await?;
    Ok(Json(message))
}

/// `POST /api/mail/messages/{id}/star` — star a message
pub async fn star(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MailMessage>> {
    require_mailbox(&ctx, &auth)?;

    let message = ctx
        .services
        .mailbox_service
        .set_starred(auth.user.id, id, true)
        .await?;
    Ok(Json(message))
}

/// `POST /api/mail/messages/{id}/unstar` — clear the star
pub async fn unstar(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MailMessage>> {
    require_mailbox(&ctx, &auth)?;

    let message = ctx
        .services
        .mailbox_service
        .set_starred(auth.user.id, id, false)
        .await?;
    Ok(Json(message))
}

/// `POST /api/mail/messages/{id}/archive` — move to archive
pub async fn archive(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MailMessage>> {
    require_mailbox(&ctx, &auth)?;

    let message = ctx.services.mailbox_service.archive(auth.user.id, id).await?;
    Ok(Json(message))
}

/// `DELETE /api/mail/messages/{id}` — trash, or purge if already trashed
pub async fn delete(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    require_mailbox(&ctx, &auth)?;

    let remaining = ctx.services.mailbox_service.delete(auth.user.id, id).await?;
    Ok(Json(serde_json::json!({
        "deleted": true,
        "permanent": remaining.is_none(),
    })))
}

/// `POST /api/mail/messages/{id}/restore` — restore from trash
pub async fn restore(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MailMessage>> {
    require_mailbox(&ctx, &auth)?;

    let message = ctx.services.mailbox_service.restore(auth.user.id, id).await?;
    Ok(Json(message))
}

/// `GET /api/mail/summary` — unread, starred, and total counts
pub async fn summary(
    State(ctx): State<AppContext>,
    auth: AuthUser,
) -> Result<Json<MailboxSummary>> {
    require_mailbox(&ctx, &auth)?;

    let summary = ctx.services.mailbox_service.summary(auth.user.id).await;
    Ok(Json(summary))
}
