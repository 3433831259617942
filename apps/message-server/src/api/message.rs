//! Message API endpoints.

use std::sync::Arc;

use api_protocol::{AuthorRef, requests::*, responses::*};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use entities::{Message, MessagePatch};
use message_store::{MessageFilter, MessageStore};

use super::{optional, required};
use crate::error::{ServerError, ServerResult};
use crate::services::author_index;
use crate::state::AppState;

/// Converts entity Message to API Message.
fn entity_to_api_message(message: &Message) -> api_protocol::Message {
    api_protocol::Message {
        id: message.id.clone(),
        title: message.title.clone(),
        body: message.body.clone(),
        author: message.author.clone(),
        created_at: message.created_at,
        updated_at: message.updated_at,
    }
}

fn message_not_found() -> ServerError {
    ServerError::NotFound("Message not found".to_string())
}

/// Resolves an author reference to the ID of an existing user.
async fn resolve_author<S: MessageStore>(store: &S, author: &AuthorRef) -> ServerResult<String> {
    store
        .get_user(author.id())
        .await?
        .map(|user| user.id)
        .ok_or_else(|| ServerError::NotFound("User not found".to_string()))
}

/// Lists all messages.
pub async fn list_messages<S: MessageStore>(
    State(state): State<Arc<AppState<S>>>,
) -> ServerResult<Json<ListMessagesResponse>> {
    let messages = state.store.find_messages(&MessageFilter::default()).await?;

    Ok(Json(ListMessagesResponse {
        all_messages: messages.iter().map(entity_to_api_message).collect(),
    }))
}

/// Gets a message by ID.
pub async fn get_message<S: MessageStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(message_id): Path<String>,
) -> ServerResult<Json<api_protocol::Message>> {
    let message = state
        .store
        .get_message(&message_id)
        .await?
        .ok_or_else(message_not_found)?;

    Ok(Json(entity_to_api_message(&message)))
}

/// Creates a message and links it to its author.
pub async fn create_message<S: MessageStore>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<CreateMessageRequest>, JsonRejection>,
) -> ServerResult<(StatusCode, Json<api_protocol::Message>)> {
    let Json(request) = payload?;
    let title = required(request.title, "title")?;
    let body = required(request.body, "body")?;

    let mut message = Message::new(title, body);
    if let Some(id) = optional(request.id, "_id")? {
        message = message.with_id(id);
    }
    if let Some(author) = &request.author {
        message = message.with_author(resolve_author(&state.store, author).await?);
    }

    let message = state.store.create_message(message).await?;

    if let Some(author) = &message.author {
        author_index::link(&state.store, author, &message.id).await;
    }

    tracing::info!(message_id = %message.id, author = ?message.author, "Message created");

    Ok((StatusCode::CREATED, Json(entity_to_api_message(&message))))
}

/// Updates the supplied fields of a message.
pub async fn update_message<S: MessageStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(message_id): Path<String>,
    payload: Result<Json<UpdateMessageRequest>, JsonRejection>,
) -> ServerResult<Json<UpdateMessageResponse>> {
    let Json(request) = payload?;
    let mut patch = MessagePatch {
        title: optional(request.title, "title")?,
        body: optional(request.body, "body")?,
        author: None,
    };

    let previous = state
        .store
        .get_message(&message_id)
        .await?
        .ok_or_else(message_not_found)?;

    if let Some(author) = &request.author {
        patch.author = Some(resolve_author(&state.store, author).await?);
    }

    let message = state
        .store
        .update_message(&message_id, &patch)
        .await?
        .ok_or_else(message_not_found)?;

    if previous.author != message.author {
        if let Some(old_author) = &previous.author {
            author_index::unlink(&state.store, old_author, &message.id).await;
        }
        if let Some(new_author) = &message.author {
            author_index::link(&state.store, new_author, &message.id).await;
        }
    }

    tracing::info!(message_id = %message_id, "Message updated");

    Ok(Json(UpdateMessageResponse {
        selected_message: entity_to_api_message(&message),
    }))
}

/// Deletes a message and unlinks it from its author.
pub async fn delete_message<S: MessageStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(message_id): Path<String>,
) -> ServerResult<Json<DeleteMessageResponse>> {
    let message = state
        .store
        .delete_message(&message_id)
        .await?
        .ok_or_else(message_not_found)?;

    if let Some(author) = &message.author {
        author_index::unlink(&state.store, author, &message.id).await;
    }

    tracing::info!(message_id = %message_id, "Message deleted");

    Ok(Json(DeleteMessageResponse::new(message.id)))
}
