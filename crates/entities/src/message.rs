//! Message entity definitions.

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::new_document_id;

/// A short message, optionally linked to the user who wrote it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Message title.
    pub title: String,
    /// Message body.
    pub body: String,
    /// Author's user ID. A weak reference: the user may no longer exist.
    #[serde(default)]
    pub author: Option<String>,
    /// When this record was created.
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    /// When this record was last updated.
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Message {
    /// Creates a new message without an author.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: new_document_id(),
            title: title.into(),
            body: body.into(),
            author: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the generated identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Links the message to an author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Applies a partial update. Returns `true` if any field was supplied.
    pub fn apply(&mut self, patch: &MessagePatch) -> bool {
        if patch.is_empty() {
            return false;
        }
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(body) = &patch.body {
            self.body = body.clone();
        }
        if let Some(author) = &patch.author {
            self.author = Some(author.clone());
        }
        self.updated_at = Utc::now();
        true
    }
}

/// Fields to change on an existing message. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessagePatch {
    pub title: Option<String>,
    pub body: Option<String>,
    pub author: Option<String>,
}

impl MessagePatch {
    /// Returns true if no field would change.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none() && self.author.is_none()
    }
}
