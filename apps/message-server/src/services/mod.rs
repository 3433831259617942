//! Domain services shared by the API handlers.

pub mod author_index;
pub mod password;
