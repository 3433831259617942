//! Core entity definitions for the message board.
//!
//! This crate defines the documents persisted by the message store: users
//! and the messages they author. Both serialize to the shape stored in the
//! document database (`_id` identifiers, camelCase field names).

mod id;
mod message;
mod user;

pub use id::*;
pub use message::*;
pub use user::*;
