//! Order service implementation
//!
//! Order CRUD, the append-only manufacturing status log, and the quality
//! gate: an order may only move to ready_to_ship once a passed
//! quality_check entry is on record.

use tracing::{debug, info};

use crate::database::repositories::OrderRepository;
use crate::models::order::{
    CreateOrderRequest, CreateStatusUpdateRequest, Order, OrderStatus, PaymentStatus,
    StatusUpdate, UpdateOrderRequest,
};
use crate::utils::errors::{Result, ThreadlineError};
use crate::utils::helpers;
use crate::workflow::transitions::check_order_transition;

/// Order service for manufacturing order management
#[derive(Debug, Clone)]
pub struct OrderService {
    order_repository: OrderRepository,
}

impl OrderService {
    /// Create a new OrderService instance
    pub fn new(order_repository: OrderRepository) -> Self {
        Self { order_repository }
    }

    /// Create a new order
    pub async fn create_order(
        &self,
        request: CreateOrderRequest,
        created_by: Option<i64>,
    ) -> Result<Order> {
        helpers::require_field(&request.customer_name, "customer_name")?;
        helpers::require_field(&request.garment_type, "garment_type")?;
        if request.quantity <= 0 {
            return Err(ThreadlineError::InvalidInput(
                "Quantity must be greater than 0".to_string(),
            ));
        }

        let order = self.order_repository.create(request, created_by).await?;
        info!(order_id = order.id, customer = %order.customer_name, "Order created");
        Ok(order)
    }

    /// Get order by ID
    pub async fn get_order(&self, order_id: i64) -> Result<Order> {
        debug!(order_id = order_id, "Getting order by ID");
        self.order_repository
            .find_by_id(order_id)
            .await?
            .ok_or(ThreadlineError::OrderNotFound { order_id })
    }

    /// Update an order, enforcing the status pipeline and quality gate
    pub async fn update_order(&self, order_id: i64, request: UpdateOrderRequest) -> Result<Order> {
        let order = self.get_order(order_id).await?;

        if let Some(quantity) = request.quantity {
            if quantity <= 0 {
                return Err(ThreadlineError::InvalidInput(
                    "Quantity must be greater than 0".to_string(),
                ));
            }
        }

        if let Some(ref payment) = request.payment_status {
            if PaymentStatus::parse(payment).is_none() {
                return Err(ThreadlineError::InvalidInput(format!(
                    "Unknown payment status: {}",
                    payment
                )));
            }
        }

        if let Some(ref status) = request.status {
            let from = OrderStatus::parse(&order.status).ok_or_else(|| {
                ThreadlineError::InvalidInput(format!("Unknown order status: {}", order.status))
            })?;
            let to = OrderStatus::parse(status).ok_or_else(|| {
                ThreadlineError::InvalidInput(format!("Unknown order status: {}", status))
            })?;

            check_order_transition(from, to)?;

            if to == OrderStatus::ReadyToShip
                && !self.order_repository.has_passed_quality_check(order_id).await?
            {
                return Err(ThreadlineError::InvalidStateTransition {
                    from: from.as_str().to_string(),
                    to: to.as_str().to_string(),
                });
            }
        }

        let order = self.order_repository.update(order_id, request).await?;
        info!(order_id = order_id, status = %order.status, "Order updated");
        Ok(order)
    }

    /// Append a status update to an order's manufacturing log
    pub async fn add_status_update(
        &self,
        order_id: i64,
        request: CreateStatusUpdateRequest,
        created_by: Option<i64>,
    ) -> Result<StatusUpdate> {
        self.get_order(order_id).await?;

        helpers::require_field(&request.stage, "stage")?;
        if request.stage == "quality_check" && request.passed.is_none() {
            return Err(ThreadlineError::InvalidInput(
                "quality_check updates must record passed".to_string(),
            ));
        }

        let update = self
            .order_repository
            .add_status_update(order_id, request, created_by)
            .await?;

        crate::utils::logging::log_order_status(
            order_id,
            &update.stage,
            created_by.unwrap_or_default(),
            update.note.as_deref(),
        );
        Ok(update)
    }

    /// List an order's status log
    pub async fn list_status_updates(&self, order_id: i64) -> Result<Vec<StatusUpdate>> {
        self.get_order(order_id).await?;
        self.order_repository.list_status_updates(order_id).await
    }

    /// List orders filtered by status
    pub async fn list_orders(
        &self,
        status: Option<&str>,
        page: i64,
        page_size: i64,
    ) -> Result<Vec<Order>> {
        if let Some(status) = status {
            if OrderStatus::parse(status).is_none() {
                return Err(ThreadlineError::InvalidInput(format!(
                    "Unknown order status: {}",
                    status
                )));
            }
        }
        let offset = helpers::calculate_offset(page, page_size);
        self.order_repository.list(status, page_size, offset).await
    }

    /// Delete an order
    pub async fn delete_order(&self, order_id: i64) -> Result<()> {
        self.get_order(order_id).await?;
        self.order_repository.delete(order_id).await?;
        info!(order_id = order_id, "Order deleted");
        Ok(())
    }
}
