//! Maintenance of the `User::messages` index.
//!
//! `Message::author` is authoritative. The per-user list is updated
//! incrementally after each message write; if that fails the list is
//! rebuilt from the messages collection. Index failures never fail the
//! request that triggered them.

use message_store::MessageStore;

/// Records that `message_id` is now authored by `user_id`.
pub async fn link<S: MessageStore>(store: &S, user_id: &str, message_id: &str) {
    if let Err(e) = store.add_user_message(user_id, message_id).await {
        tracing::warn!(user_id, message_id, error = %e, "Failed to link message to author");
        reconcile(store, user_id).await;
    }
}

/// Records that `message_id` is no longer authored by `user_id`.
pub async fn unlink<S: MessageStore>(store: &S, user_id: &str, message_id: &str) {
    match store.remove_user_message(user_id, message_id).await {
        Ok(()) => {}
        // The author was deleted; nothing left to keep in step.
        Err(e) if e.is_not_found() => {
            tracing::debug!(user_id, message_id, "Author no longer exists");
        }
        Err(e) => {
            tracing::warn!(user_id, message_id, error = %e, "Failed to unlink message from author");
            reconcile(store, user_id).await;
        }
    }
}

async fn reconcile<S: MessageStore>(store: &S, user_id: &str) {
    match store.rebuild_user_messages(user_id).await {
        Ok(user) => {
            tracing::info!(user_id, messages = user.messages.len(), "Rebuilt author index");
        }
        Err(e) => {
            tracing::warn!(user_id, error = %e, "Failed to rebuild author index");
        }
    }
}

#[cfg(test)]
mod tests {
    use entities::{Message, User};
    use message_store::MemoryMessageStore;

    use super::*;

    #[tokio::test]
    async fn test_link_and_unlink() {
        let store = MemoryMessageStore::new();
        let user = store.create_user(User::new("testuser1", "hash")).await.unwrap();

        link(&store, &user.id, "m1").await;
        link(&store, &user.id, "m2").await;
        unlink(&store, &user.id, "m1").await;

        let user = store.get_user(&user.id).await.unwrap().unwrap();
        assert_eq!(user.messages, vec!["m2"]);
    }

    #[tokio::test]
    async fn test_missing_author_is_ignored() {
        let store = MemoryMessageStore::new();
        store
            .create_message(Message::new("t", "b").with_author("gone"))
            .await
            .unwrap();

        link(&store, "gone", "m1").await;
        unlink(&store, "gone", "m1").await;

        assert!(store.get_user("gone").await.unwrap().is_none());
    }
}
