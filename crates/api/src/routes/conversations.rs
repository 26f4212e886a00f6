//! Route definitions for the `/conversations` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::conversations;
use crate::state::AppState;

/// Routes mounted at `/conversations`.
///
/// ```text
/// GET  /                  -> list_conversations
/// POST /{peer_id}         -> open_conversation
/// GET  /{id}/messages     -> list_messages
/// POST /{id}/messages     -> send_message
/// POST /{id}/read         -> mark_read
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(conversations::list_conversations))
        .route("/{peer_id}", post(conversations::open_conversation))
        .route(
            "/{id}/messages",
            get(conversations::list_messages).post(conversations::send_message),
        )
        .route("/{id}/read", post(conversations::mark_read))
}
