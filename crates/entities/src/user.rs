//! User-related entity definitions.

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::new_document_id;

/// A user that can author messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Login name, unique across users.
    pub username: String,
    /// Argon2id PHC string. Never the plaintext password.
    pub password_hash: String,
    /// IDs of the messages authored by this user, in link order.
    ///
    /// Derived from [`Message::author`](crate::Message::author); the message
    /// side is authoritative.
    #[serde(default)]
    pub messages: Vec<String>,
    /// When this record was created.
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    /// When this record was last updated.
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with no messages.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: new_document_id(),
            username: username.into(),
            password_hash: password_hash.into(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Appends a message reference unless it is already linked.
    ///
    /// Returns `true` if the list changed.
    pub fn link_message(&mut self, message_id: &str) -> bool {
        if self.messages.iter().any(|id| id == message_id) {
            return false;
        }
        self.messages.push(message_id.to_string());
        self.updated_at = Utc::now();
        true
    }

    /// Removes a message reference. Returns `true` if the list changed.
    pub fn unlink_message(&mut self, message_id: &str) -> bool {
        let before = self.messages.len();
        self.messages.retain(|id| id != message_id);
        let changed = self.messages.len() != before;
        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new("testuser1", "$argon2id$hash");

        assert_eq!(user.username, "testuser1");
        assert!(user.messages.is_empty());
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_link_message_is_idempotent() {
        let mut user = User::new("testuser1", "hash");

        assert!(user.link_message("m1"));
        assert!(!user.link_message("m1"));
        assert!(user.link_message("m2"));
        assert_eq!(user.messages, vec!["m1", "m2"]);
    }

    #[test]
    fn test_unlink_message() {
        let mut user = User::new("testuser1", "hash");
        user.link_message("m1");
        user.link_message("m2");

        assert!(user.unlink_message("m1"));
        assert!(!user.unlink_message("m1"));
        assert_eq!(user.messages, vec!["m2"]);
    }

    #[test]
    fn test_storage_field_names() {
        let user = User::new("testuser1", "hash");
        let doc = bson::to_document(&user).unwrap();

        assert_eq!(doc.get_str("_id").unwrap(), user.id);
        assert_eq!(doc.get_str("passwordHash").unwrap(), "hash");
        assert!(doc.get_datetime("createdAt").is_ok());
    }
}
