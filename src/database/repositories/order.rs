//! Order repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::order::{
    CreateOrderRequest, CreateStatusUpdateRequest, Order, StatusUpdate, UpdateOrderRequest,
};
use crate::utils::errors::ThreadlineError;

const ORDER_COLUMNS: &str = "id, customer_name, lead_id, garment_type, quantity, status, payment_status, due_date, created_by, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new order
    pub async fn create(
        &self,
        request: CreateOrderRequest,
        created_by: Option<i64>,
    ) -> Result<Order, ThreadlineError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (customer_name, lead_id, garment_type, quantity, due_date, created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, customer_name, lead_id, garment_type, quantity, status, payment_status, due_date, created_by, created_at, updated_at
            "#,
        )
        .bind(request.customer_name)
        .bind(request.lead_id)
        .bind(request.garment_type)
        .bind(request.quantity)
        .bind(request.due_date)
        .bind(created_by)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(order)
    }

    /// Find order by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Order>, ThreadlineError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {} FROM orders WHERE id = $1",
            ORDER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Update order fields
    pub async fn update(&self, id: i64, request: UpdateOrderRequest) -> Result<Order, ThreadlineError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET customer_name = COALESCE($2, customer_name),
                garment_type = COALESCE($3, garment_type),
                quantity = COALESCE($4, quantity),
                status = COALESCE($5, status),
                payment_status = COALESCE($6, payment_status),
                due_date = COALESCE($7, due_date),
                updated_at = $8
            WHERE id = $1
            RETURNING id, customer_name, lead_id, garment_type, quantity, status, payment_status, due_date, created_by, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(request.customer_name)
        .bind(request.garment_type)
        .bind(request.quantity)
        .bind(request.status)
        .bind(request.payment_status)
        .bind(request.due_date)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(order)
    }

    /// Delete order
    pub async fn delete(&self, id: i64) -> Result<(), ThreadlineError> {
        sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// List orders filtered by status, newest first
    pub async fn list(
        &self,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Order>, ThreadlineError> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            r#"
            SELECT {} FROM orders
            WHERE ($1::text IS NULL OR status = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
            ORDER_COLUMNS
        ))
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// Append a manufacturing status update to an order's log
    pub async fn add_status_update(
        &self,
        order_id: i64,
        request: CreateStatusUpdateRequest,
        created_by: Option<i64>,
    ) -> Result<StatusUpdate, ThreadlineError> {
        let update = sqlx::query_as::<_, StatusUpdate>(
            r#"
            INSERT INTO order_status_updates (order_id, stage, note, passed, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, order_id, stage, note, passed, created_by, created_at
            "#,
        )
        .bind(order_id)
        .bind(request.stage)
        .bind(request.note)
        .bind(request.passed)
        .bind(created_by)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(update)
    }

    /// List the status log for an order, oldest first
    pub async fn list_status_updates(&self, order_id: i64) -> Result<Vec<StatusUpdate>, ThreadlineError> {
        let updates = sqlx::query_as::<_, StatusUpdate>(
            "SELECT id, order_id, stage, note, passed, created_by, created_at FROM order_status_updates WHERE order_id = $1 ORDER BY created_at ASC",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(updates)
    }

    /// Whether the order has a passed quality check on record
    pub async fn has_passed_quality_check(&self, order_id: i64) -> Result<bool, ThreadlineError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM order_status_updates WHERE order_id = $1 AND stage = 'quality_check' AND passed = true",
        )
        .bind(order_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0 > 0)
    }

    /// Count total orders
    pub async fn count(&self) -> Result<i64, ThreadlineError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
