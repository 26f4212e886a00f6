//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - `Serialize` response structs for external-facing output where the raw
//!   row is not safe or not sufficient (e.g. joined author info)

pub mod conversation;
pub mod follow_edge;
pub mod message;
pub mod post;
pub mod session;
pub mod user;
