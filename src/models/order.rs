//! Order and manufacturing status models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: i64,
    pub customer_name: String,
    pub lead_id: Option<i64>,
    pub garment_type: String,
    pub quantity: i32,
    pub status: String,
    pub payment_status: String,
    pub due_date: Option<DateTime<Utc>>,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One entry in an order's append-only manufacturing log
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StatusUpdate {
    pub id: i64,
    pub order_id: i64,
    pub stage: String,
    pub note: Option<String>,
    pub passed: Option<bool>,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_name: String,
    pub lead_id: Option<i64>,
    pub garment_type: String,
    pub quantity: i32,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOrderRequest {
    pub customer_name: Option<String>,
    pub garment_type: Option<String>,
    pub quantity: Option<i32>,
    pub status: Option<String>,
    pub payment_status: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateStatusUpdateRequest {
    pub stage: String,
    pub note: Option<String>,
    pub passed: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    InProduction,
    QualityCheck,
    ReadyToShip,
    Shipped,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::InProduction => "in_production",
            OrderStatus::QualityCheck => "quality_check",
            OrderStatus::ReadyToShip => "ready_to_ship",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(OrderStatus::Pending),
            "in_production" => Some(OrderStatus::InProduction),
            "quality_check" => Some(OrderStatus::QualityCheck),
            "ready_to_ship" => Some(OrderStatus::ReadyToShip),
            "shipped" => Some(OrderStatus::Shipped),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Unpaid,
    Deposit,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Deposit => "deposit",
            PaymentStatus::Paid => "paid",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "unpaid" => Some(PaymentStatus::Unpaid),
            "deposit" => Some(PaymentStatus::Deposit),
            "paid" => Some(PaymentStatus::Paid),
            _ => None,
        }
    }
}
