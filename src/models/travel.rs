//! Travel arrangement model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TravelArrangement {
    pub id: i64,
    pub camp_id: i64,
    pub traveler_kind: String,
    pub traveler_id: i64,
    pub kind: String,
    pub carrier: Option<String>,
    pub booking_ref: Option<String>,
    pub depart_location: Option<String>,
    pub arrive_location: Option<String>,
    pub departs_at: DateTime<Utc>,
    pub arrives_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTravelRequest {
    pub traveler_kind: String,
    pub traveler_id: i64,
    pub kind: String,
    pub carrier: Option<String>,
    pub booking_ref: Option<String>,
    pub depart_location: Option<String>,
    pub arrive_location: Option<String>,
    pub departs_at: DateTime<Utc>,
    pub arrives_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTravelRequest {
    pub kind: Option<String>,
    pub carrier: Option<String>,
    pub booking_ref: Option<String>,
    pub depart_location: Option<String>,
    pub arrive_location: Option<String>,
    pub departs_at: Option<DateTime<Utc>>,
    pub arrives_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelKind {
    Flight,
    Train,
    Bus,
    Car,
}

impl TravelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelKind::Flight => "flight",
            TravelKind::Train => "train",
            TravelKind::Bus => "bus",
            TravelKind::Car => "car",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "flight" => Some(TravelKind::Flight),
            "train" => Some(TravelKind::Train),
            "bus" => Some(TravelKind::Bus),
            "car" => Some(TravelKind::Car),
            _ => None,
        }
    }
}

/// Who the travel leg belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelerKind {
    Staff,
    Participant,
}

impl TravelerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelerKind::Staff => "staff",
            TravelerKind::Participant => "participant",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "staff" => Some(TravelerKind::Staff),
            "participant" => Some(TravelerKind::Participant),
            _ => None,
        }
    }
}
