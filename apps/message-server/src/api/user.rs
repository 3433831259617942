//! User API endpoints.

use std::sync::Arc;

use api_protocol::{requests::*, responses::*};
use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use entities::User;
use message_store::{MessageStore, UserFilter};

use super::required;
use crate::error::{ServerError, ServerResult};
use crate::services::password::hash_password;
use crate::state::AppState;

/// Converts entity User to API User, dropping the password hash.
fn entity_to_api_user(user: &User) -> api_protocol::User {
    api_protocol::User {
        id: user.id.clone(),
        username: user.username.clone(),
        messages: user.messages.clone(),
        created_at: user.created_at,
        updated_at: user.updated_at,
    }
}

/// Creates a user.
pub async fn create_user<S: MessageStore>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> ServerResult<(StatusCode, Json<api_protocol::User>)> {
    let Json(request) = payload?;
    let username = required(request.username, "username")?;
    let password = required(request.password, "password")?;

    let password_hash = hash_password(&password)?;
    let user = state
        .store
        .create_user(User::new(username, password_hash))
        .await?;

    tracing::info!(user_id = %user.id, username = %user.username, "User created");

    Ok((StatusCode::CREATED, Json(entity_to_api_user(&user))))
}

/// Gets a user by ID.
pub async fn get_user<S: MessageStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(user_id): Path<String>,
) -> ServerResult<Json<api_protocol::User>> {
    let user = state
        .store
        .get_user(&user_id)
        .await?
        .ok_or_else(|| ServerError::NotFound("User not found".to_string()))?;

    Ok(Json(entity_to_api_user(&user)))
}

/// Finds users, optionally by username.
pub async fn find_users<S: MessageStore>(
    State(state): State<Arc<AppState<S>>>,
    Query(query): Query<FindUsersQuery>,
) -> ServerResult<Json<FindUsersResponse>> {
    let filter = query.username.map(UserFilter::username).unwrap_or_default();
    let users = state.store.find_users(&filter).await?;

    Ok(Json(FindUsersResponse {
        users: users.iter().map(entity_to_api_user).collect(),
    }))
}
