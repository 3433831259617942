//! API endpoints.

pub mod message;
pub mod user;

use std::sync::Arc;

use axum::{Router, routing::get};
use message_store::MessageStore;

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router<S: MessageStore + 'static>() -> Router<Arc<AppState<S>>> {
    Router::new()
        // Message endpoints
        .route(
            "/messages",
            get(message::list_messages).post(message::create_message),
        )
        .route(
            "/messages/:id",
            get(message::get_message)
                .put(message::update_message)
                .delete(message::delete_message),
        )
        // User endpoints
        .route("/users", get(user::find_users).post(user::create_user))
        .route("/users/:id", get(user::get_user))
        // Health check
        .route("/health", get(health_check))
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

/// Returns the value of a required text field, rejecting absent or blank input.
fn required(value: Option<String>, field: &str) -> ServerResult<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ServerError::InvalidRequest(format!("{field} is required"))),
    }
}

/// Like [`required`], but an absent field is allowed.
fn optional(value: Option<String>, field: &str) -> ServerResult<Option<String>> {
    value.map(|value| required(Some(value), field)).transpose()
}
