//! Response bodies.

use serde::{Deserialize, Serialize};

use crate::types::*;

/// Confirmation text returned by a successful delete.
pub const MESSAGE_DELETED: &str = "Message was deleted.";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMessagesResponse {
    pub all_messages: Vec<Message>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMessageResponse {
    pub selected_message: Message,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteMessageResponse {
    pub message: String,
    #[serde(rename = "_id")]
    pub id: String,
}

impl DeleteMessageResponse {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            message: MESSAGE_DELETED.to_string(),
            id: id.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindUsersResponse {
    pub users: Vec<User>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_response_shape() {
        let value = serde_json::to_value(DeleteMessageResponse::new("aaaaaaaaaaaa")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "message": "Message was deleted.", "_id": "aaaaaaaaaaaa" })
        );
    }

    #[test]
    fn test_list_response_field_name() {
        let value = serde_json::to_value(ListMessagesResponse {
            all_messages: Vec::new(),
        })
        .unwrap();
        assert_eq!(value, serde_json::json!({ "allMessages": [] }));
    }
}
