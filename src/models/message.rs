//! Internal mail models
//!
//! Mail state is held in memory for the life of the process; these types are
//! not backed by database rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One owner's copy of a message, with per-owner flags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailMessage {
    pub id: Uuid,
    pub owner_id: i64,
    pub from_user_id: i64,
    pub from_name: String,
    pub to_user_ids: Vec<i64>,
    pub subject: String,
    pub body: String,
    pub folder: MailFolder,
    pub starred: bool,
    pub read: bool,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MailFolder {
    Inbox,
    Sent,
    Archive,
    Trash,
}

impl MailFolder {
    pub fn as_str(&self) -> &'static str {
        match self {
            MailFolder::Inbox => "inbox",
            MailFolder::Sent => "sent",
            MailFolder::Archive => "archive",
            MailFolder::Trash => "trash",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "inbox" => Some(MailFolder::Inbox),
            "sent" => Some(MailFolder::Sent),
            "archive" => Some(MailFolder::Archive),
            "trash" => Some(MailFolder::Trash),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComposeRequest {
    pub to_user_ids: Vec<i64>,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MailboxSummary {
    pub unread: usize,
    pub starred: usize,
    pub total: usize,
}
