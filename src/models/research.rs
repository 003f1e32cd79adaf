//! Fabric and pattern research models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResearchNote {
    pub id: i64,
    pub kind: String,
    pub title: String,
    pub supplier: Option<String>,
    pub unit_cost: Option<f64>,
    pub notes: Option<String>,
    pub sample_ordered: bool,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateResearchNoteRequest {
    pub kind: String,
    pub title: String,
    pub supplier: Option<String>,
    pub unit_cost: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateResearchNoteRequest {
    pub title: Option<String>,
    pub supplier: Option<String>,
    pub unit_cost: Option<f64>,
    pub notes: Option<String>,
    pub sample_ordered: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResearchKind {
    Fabric,
    Pattern,
}

impl ResearchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResearchKind::Fabric => "fabric",
            ResearchKind::Pattern => "pattern",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "fabric" => Some(ResearchKind::Fabric),
            "pattern" => Some(ResearchKind::Pattern),
            _ => None,
        }
    }
}
