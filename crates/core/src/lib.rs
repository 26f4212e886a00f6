//! Domain types and pure logic shared across the ConnectHub backend.
//!
//! - [`types`] -- shared id and timestamp aliases.
//! - [`error`] -- the domain error taxonomy.
//! - [`feed`] -- feed ordering and the viewer-filter extension hook.
//! - [`suggestions`] -- suggested-connection ranking.

pub mod error;
pub mod feed;
pub mod suggestions;
pub mod types;
