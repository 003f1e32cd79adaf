//! Design project and version models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DesignProject {
    pub id: i64,
    pub order_id: Option<i64>,
    pub lead_id: Option<i64>,
    pub designer_id: Option<i64>,
    pub title: String,
    pub brief: Option<String>,
    pub status: String,
    pub current_version_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DesignVersion {
    pub id: i64,
    pub project_id: i64,
    pub version_number: i32,
    pub file_ref: String,
    pub notes: Option<String>,
    pub approved: bool,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDesignProjectRequest {
    pub order_id: Option<i64>,
    pub lead_id: Option<i64>,
    pub designer_id: Option<i64>,
    pub title: String,
    pub brief: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDesignProjectRequest {
    pub designer_id: Option<i64>,
    pub title: Option<String>,
    pub brief: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDesignVersionRequest {
    pub file_ref: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesignStatus {
    Submitted,
    InDesign,
    Review,
    Approved,
}

impl DesignStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DesignStatus::Submitted => "submitted",
            DesignStatus::InDesign => "in_design",
            DesignStatus::Review => "review",
            DesignStatus::Approved => "approved",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "submitted" => Some(DesignStatus::Submitted),
            "in_design" => Some(DesignStatus::InDesign),
            "review" => Some(DesignStatus::Review),
            "approved" => Some(DesignStatus::Approved),
            _ => None,
        }
    }
}
