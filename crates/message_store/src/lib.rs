//! Storage access layer for the message board.
//!
//! This crate provides a storage abstraction over the two document
//! collections the service persists, `users` and `messages`. It ships an
//! in-memory implementation (tests and database-less runs) and a MongoDB
//! implementation for production.

mod error;
mod filter;
mod memory;
mod mongo;
mod store;

pub use error::*;
pub use filter::*;
pub use memory::*;
pub use mongo::*;
pub use store::*;
