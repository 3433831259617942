//! JSON wire types for the message board REST API.
//!
//! This crate defines the request bodies, response bodies and error
//! envelope exchanged between the message server and its clients. Field
//! names follow the document model: camelCase, with `_id` identifiers.

mod error;
pub mod requests;
pub mod responses;
mod types;

pub use error::*;
pub use types::*;
