//! Handlers for the `/users` resource: directory, profiles, connection
//! suggestions.

use axum::extract::{Path, Query, State};
use axum::Json;
use connecthub_core::error::CoreError;
use connecthub_core::suggestions::{self, RecentSignup};
use connecthub_core::types::DbId;
use connecthub_db::models::post::FeedPost;
use connecthub_db::models::user::{UpdateProfile, UserResponse};
use connecthub_db::repositories::{FollowRepo, PostRepo, UserRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Default number of connection suggestions when the client sends no limit.
const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Query parameters for `GET /users/suggested`.
#[derive(Debug, Deserialize)]
pub struct SuggestedParams {
    pub limit: Option<usize>,
}

/// GET /api/v1/users
///
/// Every user, most recent signup first.
pub async fn list_users(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: users }))
}

/// GET /api/v1/users/suggested
///
/// Connection suggestions for the caller: everyone without an edge to/from
/// the viewer, ranked by the default policy and truncated to `limit`.
pub async fn suggested_connections(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<SuggestedParams>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let candidates = UserRepo::suggestion_candidates(&state.pool, auth.user_id).await?;
    let limit = params.limit.unwrap_or(DEFAULT_SUGGESTION_LIMIT);
    let ranked = suggestions::suggest(candidates, &RecentSignup, limit);
    Ok(Json(DataResponse { data: ranked }))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;
    Ok(Json(DataResponse { data: user.into() }))
}

/// PATCH /api/v1/users/me
///
/// Edit the caller's display name and/or bio.
pub async fn update_me(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    if let Some(name) = &input.display_name {
        if name.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Display name must not be empty".into(),
            )));
        }
    }

    let user = UserRepo::update_profile(&state.pool, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    tracing::info!(user_id = user.id, "Profile updated");
    Ok(Json(DataResponse { data: user.into() }))
}

/// GET /api/v1/users/{id}/posts
///
/// A user's posts, newest first, with like state for the caller.
pub async fn user_posts(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<FeedPost>>>> {
    // Resolve the author first so an unknown id is a 404, not an empty list.
    UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;

    let posts = PostRepo::list_by_author(&state.pool, user_id, auth.user_id).await?;
    Ok(Json(DataResponse { data: posts }))
}

/// GET /api/v1/users/{id}/connections
///
/// Users with an accepted follow edge to/from `{id}` in either direction.
pub async fn user_connections(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;

    let connections = FollowRepo::list_connections(&state.pool, user_id).await?;
    Ok(Json(DataResponse { data: connections }))
}
