//! MongoDB-backed message store.

use async_trait::async_trait;
use entities::{Message, MessagePatch, User};
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, DateTime, Document},
    error::{ErrorKind, WriteFailure},
    options::{IndexOptions, ReturnDocument},
    Client, Collection, Database, IndexModel,
};

use crate::{MessageFilter, MessageStore, MessageStoreError, StoreResult, UserFilter};

/// Collection holding user documents.
pub const USERS_COLLECTION: &str = "users";
/// Collection holding message documents.
pub const MESSAGES_COLLECTION: &str = "messages";

const DUPLICATE_KEY: i32 = 11000;

/// Message store backed by two MongoDB collections.
///
/// The store owns a handle to the pooled [`Client`]; clones share the pool.
#[derive(Debug, Clone)]
pub struct MongoMessageStore {
    client: Client,
    users: Collection<User>,
    messages: Collection<Message>,
}

impl MongoMessageStore {
    /// Connects to `uri`, selects `database` and ensures indexes exist.
    pub async fn connect(uri: &str, database: &str) -> StoreResult<Self> {
        let client = Client::with_uri_str(uri).await?;
        let store = Self::new(client.clone(), &client.database(database));
        store.init_indexes().await?;

        tracing::info!(database, "Connected to MongoDB");
        Ok(store)
    }

    /// Wraps an existing client and database without touching indexes.
    pub fn new(client: Client, database: &Database) -> Self {
        Self {
            client,
            users: database.collection(USERS_COLLECTION),
            messages: database.collection(MESSAGES_COLLECTION),
        }
    }

    /// Creates the unique username index.
    pub async fn init_indexes(&self) -> StoreResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.users.create_index(index).await?;
        Ok(())
    }

    /// Closes the connection pool. Outstanding clones become unusable.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
        tracing::info!("MongoDB connection closed");
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY
    )
}

fn user_filter_doc(filter: &UserFilter) -> Document {
    let mut query = Document::new();
    if !filter.usernames.is_empty() {
        query.insert("username", doc! { "$in": filter.usernames.clone() });
    }
    query
}

fn message_filter_doc(filter: &MessageFilter) -> Document {
    let mut query = Document::new();
    if !filter.titles.is_empty() {
        query.insert("title", doc! { "$in": filter.titles.clone() });
    }
    if let Some(author) = &filter.author {
        query.insert("author", author.clone());
    }
    query
}

fn patch_doc(patch: &MessagePatch) -> Document {
    let mut set = doc! { "updatedAt": DateTime::now() };
    if let Some(title) = &patch.title {
        set.insert("title", title.clone());
    }
    if let Some(body) = &patch.body {
        set.insert("body", body.clone());
    }
    if let Some(author) = &patch.author {
        set.insert("author", author.clone());
    }
    doc! { "$set": set }
}

#[async_trait]
impl MessageStore for MongoMessageStore {
    // ========== User Operations ==========

    async fn create_user(&self, user: User) -> StoreResult<User> {
        match self.users.insert_one(&user).await {
            Ok(_) => Ok(user),
            Err(e) if is_duplicate_key(&e) => {
                Err(MessageStoreError::already_exists("User", user.username))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get_user(&self, id: &str) -> StoreResult<Option<User>> {
        Ok(self.users.find_one(doc! { "_id": id }).await?)
    }

    async fn find_users(&self, filter: &UserFilter) -> StoreResult<Vec<User>> {
        let cursor = self
            .users
            .find(user_filter_doc(filter))
            .sort(doc! { "createdAt": 1, "_id": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn add_user_message(&self, user_id: &str, message_id: &str) -> StoreResult<()> {
        let result = self
            .users
            .update_one(
                doc! { "_id": user_id },
                doc! {
                    "$addToSet": { "messages": message_id },
                    "$set": { "updatedAt": DateTime::now() },
                },
            )
            .await?;
        if result.matched_count == 0 {
            return Err(MessageStoreError::not_found("User", user_id));
        }
        Ok(())
    }

    async fn remove_user_message(&self, user_id: &str, message_id: &str) -> StoreResult<()> {
        let result = self
            .users
            .update_one(
                doc! { "_id": user_id },
                doc! {
                    "$pull": { "messages": message_id },
                    "$set": { "updatedAt": DateTime::now() },
                },
            )
            .await?;
        if result.matched_count == 0 {
            return Err(MessageStoreError::not_found("User", user_id));
        }
        Ok(())
    }

    async fn rebuild_user_messages(&self, user_id: &str) -> StoreResult<User> {
        let ids: Vec<String> = self
            .find_messages(&MessageFilter::author(user_id))
            .await?
            .into_iter()
            .map(|m| m.id)
            .collect();

        self.users
            .find_one_and_update(
                doc! { "_id": user_id },
                doc! { "$set": { "messages": ids, "updatedAt": DateTime::now() } },
            )
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| MessageStoreError::not_found("User", user_id))
    }

    async fn delete_users(&self, filter: &UserFilter) -> StoreResult<u64> {
        let result = self.users.delete_many(user_filter_doc(filter)).await?;
        Ok(result.deleted_count)
    }

    // ========== Message Operations ==========

    async fn create_message(&self, message: Message) -> StoreResult<Message> {
        match self.messages.insert_one(&message).await {
            Ok(_) => Ok(message),
            Err(e) if is_duplicate_key(&e) => {
                Err(MessageStoreError::already_exists("Message", message.id))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get_message(&self, id: &str) -> StoreResult<Option<Message>> {
        Ok(self.messages.find_one(doc! { "_id": id }).await?)
    }

    async fn find_messages(&self, filter: &MessageFilter) -> StoreResult<Vec<Message>> {
        let cursor = self
            .messages
            .find(message_filter_doc(filter))
            .sort(doc! { "createdAt": 1, "_id": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn update_message(
        &self,
        id: &str,
        patch: &MessagePatch,
    ) -> StoreResult<Option<Message>> {
        if patch.is_empty() {
            return self.get_message(id).await;
        }
        Ok(self
            .messages
            .find_one_and_update(doc! { "_id": id }, patch_doc(patch))
            .return_document(ReturnDocument::After)
            .await?)
    }

    async fn delete_message(&self, id: &str) -> StoreResult<Option<Message>> {
        Ok(self.messages.find_one_and_delete(doc! { "_id": id }).await?)
    }

    async fn delete_messages(&self, filter: &MessageFilter) -> StoreResult<u64> {
        let result = self.messages.delete_many(message_filter_doc(filter)).await?;
        Ok(result.deleted_count)
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson::Bson;

    use super::*;

    #[test]
    fn test_user_filter_doc() {
        assert!(user_filter_doc(&UserFilter::default()).is_empty());

        let query = user_filter_doc(&UserFilter::username("testuser1"));
        assert_eq!(query, doc! { "username": { "$in": ["testuser1"] } });
    }

    #[test]
    fn test_message_filter_doc() {
        let filter = MessageFilter {
            titles: vec!["Test Message 1".to_string(), "Test Message 2".to_string()],
            author: Some("u1".to_string()),
        };
        let query = message_filter_doc(&filter);

        assert_eq!(
            query,
            doc! {
                "title": { "$in": ["Test Message 1", "Test Message 2"] },
                "author": "u1",
            }
        );
    }

    #[test]
    fn test_patch_doc_sets_only_supplied_fields() {
        let patch = MessagePatch {
            title: Some("Test Message 1 Updated".to_string()),
            ..Default::default()
        };
        let update = patch_doc(&patch);
        let set = update.get_document("$set").unwrap();

        assert_eq!(set.get("title"), Some(&Bson::String("Test Message 1 Updated".into())));
        assert!(set.get("body").is_none());
        assert!(set.get("author").is_none());
        assert!(set.get_datetime("updatedAt").is_ok());
    }
}
