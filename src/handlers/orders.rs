//! Order routes and the manufacturing status log

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::middleware::auth::AuthUser;
use crate::models::order::{
    CreateOrderRequest, CreateStatusUpdateRequest, Order, StatusUpdate, UpdateOrderRequest,
};
use crate::services::auth::Permission;
use crate::state::AppContext;
use crate::utils::errors::Result;

#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    pub status: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// `POST /api/orders` — create an order
pub async fn create_order(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Json(request): Json<CreateOrderRequest>,
) -> Result<Json<Order>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageOrders)?;

    let order = ctx
        .services
        .order_service
        .create_order(request, Some(auth.user.id))
        .await?;
    Ok(Json(order))
}

/// `GET /api/orders` — list orders, filterable by status
pub async fn list_orders(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Query(query): Query<ListOrdersQuery>,
) -> Result<Json<Vec<Order>>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageOrders)?;

    let orders = ctx
        .services
        .order_service
        .list_orders(
            query.status.as_deref(),
            query.page.unwrap_or(1),
            query.page_size.unwrap_or(50),
        )
        .await?;
    Ok(Json(orders))
}

/// `GET /api/orders/{id}` — fetch one order
pub async fn get_order(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(order_id): Path<i64>,
) -> Result<Json<Order>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageOrders)?;

    let order = ctx.services.order_service.get_order(order_id).await?;
    Ok(Json(order))
}

/// `PATCH /api/orders/{id}` — update an order
pub async fn update_order(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(order_id): Path<i64>,
    Json(request): Json<UpdateOrderRequest>,
) -> Result<Json<Order>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageOrders)?;

    let order = ctx.services.order_service.update_order(order_id, request).await?;
    Ok(Json(order))
}

/// `POST /api/orders/{id}/status` — append to the status log
pub async fn add_status_update(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(order_id): Path<i64>,
    Json(request): Json<CreateStatusUpdateRequest>,
) -> Result<Json<StatusUpdate>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageOrders)?;

    let update = ctx
        .services
        .order_service
        .add_status_update(order_id, request, Some(auth.user.id))
        .await?;
    Ok(Json(update))
}

/// `GET /api/orders/{id}/status` — the status log
pub async fn list_status_updates(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(order_id): Path<i64>,
) -> Result<Json<Vec<StatusUpdate>>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageOrders)?;

    let updates = ctx.services.order_service.list_status_updates(order_id).await?;
    Ok(Json(updates))
}

/// `DELETE /api/orders/{id}` — remove an order
pub async fn delete_order(
    State(ctx): State<AppContext>,
    auth: AuthUser,
    Path(order_id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    ctx.services
        .auth_service
        .require_permission(&auth.context, Permission::ManageOrders)?;

    ctx.services.order_service.delete_order(order_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
