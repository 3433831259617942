//! Resource representations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A message as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub body: String,
    /// Author's user ID, never the nested user.
    pub author: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user as returned by the API. Carries no password material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub messages: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Reference to a user in a request body.
///
/// Clients may send the bare ID or a whole user object; only its `_id` is
/// read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorRef {
    Id(String),
    User {
        #[serde(rename = "_id", alias = "id")]
        id: String,
    },
}

impl AuthorRef {
    /// Returns the referenced user ID.
    pub fn id(&self) -> &str {
        match self {
            AuthorRef::Id(id) => id,
            AuthorRef::User { id } => id,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_author_ref_from_id() {
        let author: AuthorRef = serde_json::from_value(json!("abc123abc123")).unwrap();
        assert_eq!(author.id(), "abc123abc123");
    }

    #[test]
    fn test_author_ref_from_user_object() {
        let author: AuthorRef = serde_json::from_value(json!({
            "_id": "abc123abc123",
            "username": "testuser1",
            "messages": ["aaaaaaaaaaaa"],
        }))
        .unwrap();
        assert_eq!(author.id(), "abc123abc123");
    }

    #[test]
    fn test_message_wire_names() {
        let now = Utc::now();
        let message = Message {
            id: "aaaaaaaaaaaa".to_string(),
            title: "Test Message 1".to_string(),
            body: "Test Body 1".to_string(),
            author: Some("abc123abc123".to_string()),
            created_at: now,
            updated_at: now,
        };
        let value = serde_json::to_value(&message).unwrap();

        assert_eq!(value["_id"], "aaaaaaaaaaaa");
        assert_eq!(value["author"], "abc123abc123");
        assert!(value.get("createdAt").is_some());
    }
}
