//! Shared fixture for the HTTP API tests.
//!
//! Every test gets one user (`testuser1`) and one message
//! (`Test Message 1`, id [`MESSAGE_OBJECT_ID`]) linked to each other, and
//! the fixture removes them again on teardown.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use entities::{Message, User};
use message_server::{config::Config, create_app, create_state, state::AppState};
use message_store::{MessageFilter, MessageStore, UserFilter};
use serde_json::Value;
use tokio_test::assert_ok;
use tower::ServiceExt;

pub const USERNAME: &str = "testuser1";
pub const PASSWORD: &str = "securepassword1";
pub const MESSAGE_OBJECT_ID: &str = "aaaaaaaaaaaa";

/// Titles created by the tests, wiped on teardown.
pub const FIXTURE_TITLES: [&str; 3] = ["Test Message 1", "Test Message 2", "Test Message 1 Updated"];

pub struct Fixture<S: MessageStore> {
    pub state: Arc<AppState<S>>,
    pub app: Router,
    pub user: User,
    pub message: Message,
}

impl<S: MessageStore + 'static> Fixture<S> {
    /// Seeds the store with one user and one message authored by them.
    pub async fn setup(store: S) -> Self {
        let state = create_state(Config::default(), store);
        let app = create_app(state.clone());
        wipe(&state.store).await;

        // Seeded straight into the store, so the hash is never checked.
        let user = assert_ok!(state.store.create_user(User::new(USERNAME, "$fixture$hash")).await);

        let message = Message::new("Test Message 1", "Test Body 1")
            .with_id(MESSAGE_OBJECT_ID)
            .with_author(&user.id);
        let message = assert_ok!(state.store.create_message(message).await);
        assert_ok!(state.store.add_user_message(&user.id, &message.id).await);

        let user = state.store.get_user(&user.id).await.unwrap().unwrap();

        Self {
            state,
            app,
            user,
            message,
        }
    }

    pub fn store(&self) -> &S {
        &self.state.store
    }

    /// Removes the fixture user and every message the tests may have created.
    pub async fn teardown(self) {
        wipe(self.store()).await;
    }

    /// Sends a request through the router and decodes the JSON response.
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None).await
    }
}

async fn wipe<S: MessageStore>(store: &S) {
    assert_ok!(store.delete_users(&UserFilter::username(USERNAME)).await);

    let titles = MessageFilter {
        titles: FIXTURE_TITLES.iter().map(|t| t.to_string()).collect(),
        ..Default::default()
    };
    assert_ok!(store.delete_messages(&titles).await);
}

/// Connects to the MongoDB named by `MONGODB_URI`.
pub async fn mongo_store() -> message_store::MongoMessageStore {
    let uri = std::env::var("MONGODB_URI").expect("MONGODB_URI must be set");
    message_store::MongoMessageStore::connect(&uri, "message_board_test")
        .await
        .expect("connect to MongoDB")
}
