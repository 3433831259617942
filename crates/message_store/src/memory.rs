//! In-memory message store implementation.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use entities::{Message, MessagePatch, User};
use tokio::sync::RwLock;

use crate::{MessageFilter, MessageStore, MessageStoreError, StoreResult, UserFilter};

/// In-memory message store, used by tests and when no database is configured.
#[derive(Debug, Default, Clone)]
pub struct MemoryMessageStore {
    users: Arc<RwLock<HashMap<String, User>>>,
    messages: Arc<RwLock<HashMap<String, Message>>>,
}

impl MemoryMessageStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageStore for MemoryMessageStore {
    // =========================================================================
    // User operations
    // =========================================================================

    async fn create_user(&self, user: User) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) {
            return Err(MessageStoreError::already_exists("User", user.id));
        }
        if users.values().any(|u| u.username == user.username) {
            return Err(MessageStoreError::already_exists("User", user.username));
        }
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(id).cloned())
    }

    async fn find_users(&self, filter: &UserFilter) -> StoreResult<Vec<User>> {
        let users = self.users.read().await;
        let mut result: Vec<User> = users.values().filter(|u| filter.matches(u)).cloned().collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(result)
    }

    async fn add_user_message(&self, user_id: &str, message_id: &str) -> StoreResult<()> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(user_id)
            .ok_or_else(|| MessageStoreError::not_found("User", user_id))?;
        user.link_message(message_id);
        Ok(())
    }

    async fn remove_user_message(&self, user_id: &str, message_id: &str) -> StoreResult<()> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(user_id)
            .ok_or_else(|| MessageStoreError::not_found("User", user_id))?;
        user.unlink_message(message_id);
        Ok(())
    }

    async fn rebuild_user_messages(&self, user_id: &str) -> StoreResult<User> {
        let authored = self.find_messages(&MessageFilter::author(user_id)).await?;

        let mut users = self.users.write().await;
        let user = users
            .get_mut(user_id)
            .ok_or_else(|| MessageStoreError::not_found("User", user_id))?;
        user.messages = authored.into_iter().map(|m| m.id).collect();
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn delete_users(&self, filter: &UserFilter) -> StoreResult<u64> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|_, u| !filter.matches(u));
        Ok((before - users.len()) as u64)
    }

    // =========================================================================
    // Message operations
    // =========================================================================

    async fn create_message(&self, message: Message) -> StoreResult<Message> {
        let mut messages = self.messages.write().await;
        if messages.contains_key(&message.id) {
            return Err(MessageStoreError::already_exists("Message", message.id));
        }
        messages.insert(message.id.clone(), message.clone());
        Ok(message)
    }

    async fn get_message(&self, id: &str) -> StoreResult<Option<Message>> {
        let messages = self.messages.read().await;
        Ok(messages.get(id).cloned())
    }

    async fn find_messages(&self, filter: &MessageFilter) -> StoreResult<Vec<Message>> {
        let messages = self.messages.read().await;
        let mut result: Vec<Message> = messages
            .values()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(result)
    }

    async fn update_message(
        &self,
        id: &str,
        patch: &MessagePatch,
    ) -> StoreResult<Option<Message>> {
        let mut messages = self.messages.write().await;
        Ok(messages.get_mut(id).map(|message| {
            message.apply(patch);
            message.clone()
        }))
    }

    async fn delete_message(&self, id: &str) -> StoreResult<Option<Message>> {
        let mut messages = self.messages.write().await;
        Ok(messages.remove(id))
    }

    async fn delete_messages(&self, filter: &MessageFilter) -> StoreResult<u64> {
        let mut messages = self.messages.write().await;
        let before = messages.len();
        messages.retain(|_, m| !filter.matches(m));
        Ok((before - messages.len()) as u64)
    }
}
