pub mod auth;
pub mod conversations;
pub mod feed;
pub mod follows;
pub mod health;
pub mod posts;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                        register (public)
/// /auth/login                           login (public)
/// /auth/logout                          logout
/// /auth/change-password                 change password
/// /auth/me                              current user
///
/// /users                                directory listing
/// /users/suggested                      connection suggestions
/// /users/me                             profile edit (PATCH)
/// /users/{id}                           public profile
/// /users/{id}/posts                     posts by author
/// /users/{id}/connections               accepted connections
///
/// /posts                                create (POST)
/// /posts/{id}                           get
/// /posts/{id}/like                      toggle like (POST)
///
/// /feed                                 home feed
///
/// /follow-requests                      request follow (POST)
/// /follow-requests/pending              requests awaiting review
/// /follow-requests/{id}/respond         accept or reject (POST)
///
/// /conversations                        inbox listing
/// /conversations/{peer_id}              open conversation (POST)
/// /conversations/{id}/messages          history (GET), send (POST)
/// /conversations/{id}/read              mark read (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/posts", posts::router())
        .nest("/feed", feed::router())
        .nest("/follow-requests", follows::router())
        .nest("/conversations", conversations::router())
}
