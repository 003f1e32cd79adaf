//! Lead model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Lead {
    pub id: i64,
    pub company_name: String,
    pub contact_name: String,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub source: Option<String>,
    pub status: String,
    pub assigned_to: Option<i64>,
    pub contacted: bool,
    pub items_confirmed: bool,
    pub submitted_to_design: bool,
    pub submitted_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateLeadRequest {
    pub company_name: String,
    pub contact_name: String,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub source: Option<String>,
    pub assigned_to: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLeadRequest {
    pub company_name: Option<String>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub source: Option<String>,
    pub status: Option<String>,
    pub assigned_to: Option<i64>,
    pub notes: Option<String>,
}

/// Partial update of the three sequential progress flags
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadProgressRequest {
    pub contacted: Option<bool>,
    pub items_confirmed: Option<bool>,
    pub submitted_to_design: Option<bool>,
}

/// The three tracked steps of a lead, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadStep {
    Contacted,
    ItemsConfirmed,
    SubmittedToDesign,
}

impl LeadStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStep::Contacted => "contacted",
            LeadStep::ItemsConfirmed => "items_confirmed",
            LeadStep::SubmittedToDesign => "submitted_to_design",
        }
    }

    /// Steps in workflow order
    pub fn ordered() -> &'static [LeadStep] {
        &[
            LeadStep::Contacted,
            LeadStep::ItemsConfirmed,
            LeadStep::SubmittedToDesign,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    New,
    Active,
    Converted,
    Closed,
}

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Active => "active",
            LeadStatus::Converted => "converted",
            LeadStatus::Closed => "closed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "new" => Some(LeadStatus::New),
            "active" => Some(LeadStatus::Active),
            "converted" => Some(LeadStatus::Converted),
            "closed" => Some(LeadStatus::Closed),
            _ => None,
        }
    }
}
