//! Message store trait definition.

use async_trait::async_trait;
use entities::{Message, MessagePatch, User};

use crate::{MessageFilter, StoreResult, UserFilter};

/// Trait for user and message storage operations.
///
/// `Message::author` is the source of truth for authorship. The
/// `User::messages` list is an index that callers keep in step through
/// [`add_user_message`](MessageStore::add_user_message) and
/// [`remove_user_message`](MessageStore::remove_user_message), and can
/// recompute with [`rebuild_user_messages`](MessageStore::rebuild_user_messages).
#[async_trait]
pub trait MessageStore: Send + Sync {
    // ========== User Operations ==========

    /// Creates a new user. Fails if the id or username is taken.
    async fn create_user(&self, user: User) -> StoreResult<User>;

    /// Gets a user by ID.
    async fn get_user(&self, id: &str) -> StoreResult<Option<User>>;

    /// Finds users matching the filter.
    async fn find_users(&self, filter: &UserFilter) -> StoreResult<Vec<User>>;

    /// Links a message to a user's message list, if not already present.
    async fn add_user_message(&self, user_id: &str, message_id: &str) -> StoreResult<()>;

    /// Removes a message from a user's message list.
    async fn remove_user_message(&self, user_id: &str, message_id: &str) -> StoreResult<()>;

    /// Recomputes a user's message list from the messages it authored.
    async fn rebuild_user_messages(&self, user_id: &str) -> StoreResult<User>;

    /// Deletes every user matching the filter. Returns the number deleted.
    async fn delete_users(&self, filter: &UserFilter) -> StoreResult<u64>;

    // ========== Message Operations ==========

    /// Creates a new message. Fails if the id is taken.
    async fn create_message(&self, message: Message) -> StoreResult<Message>;

    /// Gets a message by ID.
    async fn get_message(&self, id: &str) -> StoreResult<Option<Message>>;

    /// Finds messages matching the filter, oldest first.
    async fn find_messages(&self, filter: &MessageFilter) -> StoreResult<Vec<Message>>;

    /// Applies a partial update and returns the updated message.
    async fn update_message(&self, id: &str, patch: &MessagePatch)
        -> StoreResult<Option<Message>>;

    /// Deletes a message and returns what was deleted.
    async fn delete_message(&self, id: &str) -> StoreResult<Option<Message>>;

    /// Deletes every message matching the filter. Returns the number deleted.
    async fn delete_messages(&self, filter: &MessageFilter) -> StoreResult<u64>;
}
