//! Route definitions for the `/users` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET   /                   -> list_users
/// GET   /suggested          -> suggested_connections
/// PATCH /me                 -> update_me
/// GET   /{id}               -> get_user
/// GET   /{id}/posts         -> user_posts
/// GET   /{id}/connections   -> user_connections
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users))
        .route("/suggested", get(users::suggested_connections))
        .route("/me", patch(users::update_me))
        .route("/{id}", get(users::get_user))
        .route("/{id}/posts", get(users::user_posts))
        .route("/{id}/connections", get(users::user_connections))
}
