//! Route definitions for the `/posts` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::posts;
use crate::state::AppState;

/// Routes mounted at `/posts`.
///
/// ```text
/// POST /            -> create_post
/// GET  /{id}        -> get_post
/// POST /{id}/like   -> toggle_like
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(posts::create_post))
        .route("/{id}", get(posts::get_post))
        .route("/{id}/like", post(posts::toggle_like))
}
