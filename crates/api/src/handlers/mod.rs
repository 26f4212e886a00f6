//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod conversations;
pub mod feed;
pub mod follows;
pub mod posts;
pub mod users;
