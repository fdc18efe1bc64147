//! Companies module: CRUD over company records

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
