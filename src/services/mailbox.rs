//! Mailbox service implementation
//!
//! The internal mail tool. State lives in memory for the life of the
//! process; every recipient gets their own copy of a message with
//! independent folder, star, and read flags. Deleting moves a copy to
//! trash; deleting from trash is permanent.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::message::{ComposeRequest, MailFolder, MailMessage, MailboxSummary};
use crate::utils::errors::{Result, ThreadlineError};
use crate::utils::helpers;

/// Mailbox service holding every user's mail copies
#[derive(Debug, Clone, Default)]
pub struct MailboxService {
    messages: Arc<RwLock<HashMap<Uuid, MailMessage>>>,
}

impl MailboxService {
    /// Create a new, empty MailboxService instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Compose a message, delivering a copy to each recipient's inbox and
    /// recording one in the sender's sent folder
    pub async fn compose(
        &self,
        sender_id: i64,
        sender_name: &str,
        request: ComposeRequest,
    ) -> Result<MailMessage> {
        helpers::require_field(&request.subject, "subject")?;
        if request.to_user_ids.is_empty() {
            return Err(ThreadlineError::InvalidInput(
                "Message needs at least one recipient".to_string(),
            ));
        }

        let sent_at = Utc::now();
        let mut store = self.messages.write().await;

        for recipient in &request.to_user_ids {
            let copy = MailMessage {
                id: Uuid::new_v4(),
                owner_id: *recipient,
                from_user_id: sender_id,
                from_name: sender_name.to_string(),
                to_user_ids: request.to_user_ids.clone(),
                subject: request.subject.clone(),
                body: request.body.clone(),
                folder: MailFolder::Inbox,
                starred: false,
                read: false,
                sent_at,
            };
            store.insert(copy.id, copy);
        }

        let sent_copy = MailMessage {
            id: Uuid::new_v4(),
            owner_id: sender_id,
            from_user_id: sender_id,
            from_name: sender_name.to_string(),
            to_user_ids: request.to_user_ids.clone(),
            subject: request.subject,
            body: request.body,
            folder: MailFolder::Sent,
            starred: false,
            read: true,
            sent_at,
        };
        let result = sent_copy.clone();
        store.insert(sent_copy.id, sent_copy);

        info!(
            sender_id = sender_id,
            recipients = request.to_user_ids.len(),
            "Message composed"
        );
        Ok(result)
    }

    /// List an owner's folder, newest first
    pub async fn list_folder(&self, owner_id: i64, folder: MailFolder) -> Vec<MailMessage> {
        let store = self.messages.read().await;
        let mut messages: Vec<MailMessage> = store
            .values()
            .filter(|m| m.owner_id == owner_id && m.folder == folder)
            .cloned()
            .collect();
        messages.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));
        messages
    }

    async fn with_owned_message<F>(&self, owner_id: i64, id: Uuid, apply: F) -> Result<MailMessage>
    where
        F: FnOnce(&mut MailMessage),
    {
        let mut store = self.messages.write().await;
        let message = store
            .get_mut(&id)
            .filter(|m| m.owner_id == owner_id)
            .ok_or(ThreadlineError::MessageNotFound { message_id: id })?;
        apply(message);
        Ok(message.clone())
    }

    /// Get a message, marking it read
    pub async fn get_message(&self, owner_id: i64, id: Uuid) -> Result<MailMessage> {
        self.with_owned_message(owner_id, id, |m| m.read = true).await
    }

    /// Set or clear the star flag
    pub async fn set_starred(&self, owner_id: i64, id: Uuid, starred: bool) -> Result<MailMessage> {
        debug!(owner_id = owner_id, message_id = %id, starred = starred, "Star flag changed");
        self.with_owned_message(owner_id, id, |m| m.starred = starred).await
    }

    /// Move a message to the archive folder
    pub async fn archive(&self, owner_id: i64, id: Uuid) -> Result<MailMessage> {
        self.with_owned_message(owner_id, id, |m| m.folder = MailFolder::Archive)
            .await
    }

    /// Delete a message. From any folder this moves the copy to trash;
    /// deleting a trashed copy removes it permanently.
    pub async fn delete(&self, owner_id: i64, id: Uuid) -> Result<Option<MailMessage>> {
        let mut store = self.messages.write().await;
        let message = store
            .get_mut(&id)
            .filter(|m| m.owner_id == owner_id)
            .ok_or(ThreadlineError::MessageNotFound { message_id: id })?;

        if message.folder == MailFolder::Trash {
            store.remove(&id);
            info!(owner_id = owner_id, message_id = %id, "Message permanently deleted");
            return Ok(None);
        }

        message.folder = MailFolder::Trash;
        Ok(Some(message.clone()))
    }

    /// Restore a trashed message to the inbox
    pub async fn restore(&self, owner_id: i64, id: Uuid) -> Result<MailMessage> {
        let mut store = self.messages.write().await;
        let message = store
            .get_mut(&id)
            .filter(|m| m.owner_id == owner_id)
            .ok_or(ThreadlineError::MessageNotFound { message_id: id })?;

        if message.folder != MailFolder::Trash {
            return Err(ThreadlineError::InvalidInput(
                "Only trashed messages can be restored".to_string(),
            ));
        }

        message.folder = MailFolder::Inbox;
        Ok(message.clone())
    }

    /// Count unread inbox messages for an owner
    pub async fn unread_count(&self, owner_id: i64) -> usize {
        let store = self.messages.read().await;
        store
            .values()
            .filter(|m| m.owner_id == owner_id && m.folder == MailFolder::Inbox && !m.read)
            .count()
    }

    /// Mailbox totals for an owner
    pub async fn summary(&self, owner_id: i64) -> MailboxSummary {
        let store = self.messages.read().await;
        let owned: Vec<&MailMessage> = store.values().filter(|m| m.owner_id == owner_id).collect();

        MailboxSummary {
            unread: owned
                .iter()
                .filter(|m| m.folder == MailFolder::Inbox && !m.read)
                .count(),
            starred: owned.iter().filter(|m| m.starred).count(),
            total: owned.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compose_request(to: Vec<i64>) -> ComposeRequest {
        ComposeRequest {
            to_user_ids: to,
            subject: "Fitting notes".to_string(),
            body: "Hem the sample before Friday.".to_string(),
        }
    }

    #[tokio::test]
    async fn compose_fans_out_to_recipients_and_sent() {
        let mailbox = MailboxService::new();
        mailbox.compose(1, "Ava", compose_request(vec![2, 3])).await.unwrap();

        assert_eq!(mailbox.list_folder(2, MailFolder::Inbox).await.len(), 1);
        assert_eq!(mailbox.list_folder(3, MailFolder::Inbox).await.len(), 1);
        assert_eq!(mailbox.list_folder(1, MailFolder::Sent).await.len(), 1);
        assert_eq!(mailbox.list_folder(1, MailFolder::Inbox).await.len(), 0);
    }

    #[tokio::test]
    async fn compose_requires_recipients_and_subject() {
        let mailbox = MailboxService::new();
        assert!(mailbox.compose(1, "Ava", compose_request(vec![])).await.is_err());

        let blank_subject = ComposeRequest {
            to_user_ids: vec![2],
            subject: "  ".to_string(),
            body: String::new(),
        };
        assert!(mailbox.compose(1, "Ava", blank_subject).await.is_err());
    }

    #[tokio::test]
    async fn reading_marks_only_own_copy() {
        let mailbox = MailboxService::new();
        mailbox.compose(1, "Ava", compose_request(vec![2, 3])).await.unwrap();

        let inbox = mailbox.list_folder(2, MailFolder::Inbox).await;
        mailbox.get_message(2, inbox[0].id).await.unwrap();

        assert_eq!(mailbox.unread_count(2).await, 0);
        assert_eq!(mailbox.unread_count(3).await, 1);
    }

    #[tokio::test]
    async fn starring_is_per_owner() {
        let mailbox = MailboxService::new();
        mailbox.compose(1, "Ava", compose_request(vec![2, 3])).await.unwrap();

        let inbox = mailbox.list_folder(2, MailFolder::Inbox).await;
        let starred = mailbox.set_starred(2, inbox[0].id, true).await.unwrap();
        assert!(starred.starred);

        assert_eq!(mailbox.summary(2).await.starred, 1);
        assert_eq!(mailbox.summary(3).await.starred, 0);
    }

    #[tokio::test]
    async fn cannot_touch_someone_elses_copy() {
        let mailbox = MailboxService::new();
        mailbox.compose(1, "Ava", compose_request(vec![2])).await.unwrap();

        let inbox = mailbox.list_folder(2, MailFolder::Inbox).await;
        assert!(mailbox.get_message(3, inbox[0].id).await.is_err());
        assert!(mailbox.set_starred(1, inbox[0].id, true).await.is_err());
    }

    #[tokio::test]
    async fn delete_moves_to_trash_then_purges() {
        let mailbox = MailboxService::new();
        mailbox.compose(1, "Ava", compose_request(vec![2])).await.unwrap();

        let id = mailbox.list_folder(2, MailFolder::Inbox).await[0].id;

        let trashed = mailbox.delete(2, id).await.unwrap();
        assert_eq!(trashed.unwrap().folder, MailFolder::Trash);
        assert_eq!(mailbox.list_folder(2, MailFolder::Trash).await.len(), 1);

        let purged = mailbox.delete(2, id).await.unwrap();
        assert!(purged.is_none());
        assert!(mailbox.list_folder(2, MailFolder::Trash).await.is_empty());
        assert!(mailbox.get_message(2, id).await.is_err());
    }

    #[tokio::test]
    async fn restore_returns_to_inbox() {
        let mailbox = MailboxService::new();
        mailbox.compose(1, "Ava", compose_request(vec![2])).await.unwrap();

        let id = mailbox.list_folder(2, MailFolder::Inbox).await[0].id;
        mailbox.delete(2, id).await.unwrap();
        let restored = mailbox.restore(2, id).await.unwrap();
        assert_eq!(restored.folder, MailFolder::Inbox);

        // Restoring an inbox message is rejected.
        assert!(mailbox.restore(2, id).await.is_err());
    }

    #[tokio::test]
    async fn archive_empties_inbox_but_keeps_message() {
        let mailbox = MailboxService::new();
        mailbox.compose(1, "Ava", compose_request(vec![2])).await.unwrap();

        let id = mailbox.list_folder(2, MailFolder::Inbox).await[0].id;
        mailbox.archive(2, id).await.unwrap();

        assert!(mailbox.list_folder(2, MailFolder::Inbox).await.is_empty());
        assert_eq!(mailbox.list_folder(2, MailFolder::Archive).await.len(), 1);
        assert_eq!(mailbox.summary(2).await.total, 1);
    }
}
