//! Handlers for the `/follow-requests` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use connecthub_core::error::CoreError;
use connecthub_core::types::DbId;
use connecthub_db::models::follow_edge::{FollowEdge, PendingRequest};
use connecthub_db::repositories::{FollowRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /follow-requests`.
#[derive(Debug, Deserialize)]
pub struct FollowRequestBody {
    pub followee_id: DbId,
}

/// Request body for `POST /follow-requests/{id}/respond`.
#[derive(Debug, Deserialize)]
pub struct RespondBody {
    pub accept: bool,
}

/// Result of a follow-request response.
#[derive(Debug, Serialize)]
pub struct RespondResult {
    pub id: DbId,
    pub accepted: bool,
}

/// POST /api/v1/follow-requests
///
/// Ask to follow another user. The edge starts as `pending` until the
/// followee responds.
pub async fn create_request(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<FollowRequestBody>,
) -> AppResult<(StatusCode, Json<DataResponse<FollowEdge>>)> {
    // 1. No self-follow.
    if input.followee_id == auth.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "Cannot follow yourself".into(),
        )));
    }

    // 2. The followee must exist.
    UserRepo::find_by_id(&state.pool, input.followee_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: input.followee_id,
        }))?;

    // 3. Insert; the unique pair constraint rejects duplicates atomically.
    let edge = FollowRepo::create_request(&state.pool, auth.user_id, input.followee_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "A follow request or connection already exists for this user".into(),
            ))
        })?;

    tracing::info!(
        edge_id = edge.id,
        follower_id = auth.user_id,
        followee_id = input.followee_id,
        "Follow requested"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: edge })))
}

/// POST /api/v1/follow-requests/{id}/respond
///
/// Accept or reject a pending request. Only the followee may respond.
pub async fn respond(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(edge_id): Path<DbId>,
    Json(input): Json<RespondBody>,
) -> AppResult<Json<DataResponse<RespondResult>>> {
    // 1. The edge must exist.
    let edge = FollowRepo::find_by_id(&state.pool, edge_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "FollowRequest",
            id: edge_id,
        }))?;

    // 2. Authorization: only the followee reviews the request.
    if edge.followee_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the recipient may respond to a follow request".into(),
        )));
    }

    // 3. Already resolved requests cannot be resolved again.
    if !edge.is_pending() {
        return Err(AppError::Core(CoreError::Conflict(
            "Follow request already resolved".into(),
        )));
    }

    // 4. Apply the transition; the status guard in the repository settles
    //    concurrent responses (the loser sees a conflict).
    if input.accept {
        FollowRepo::accept(&state.pool, edge_id).await?.ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Follow request already resolved".into(),
            ))
        })?;
    } else {
        let deleted = FollowRepo::reject(&state.pool, edge_id).await?;
        if !deleted {
            return Err(AppError::Core(CoreError::Conflict(
                "Follow request already resolved".into(),
            )));
        }
    }

    tracing::info!(edge_id, accepted = input.accept, "Follow request resolved");
    Ok(Json(DataResponse {
        data: RespondResult {
            id: edge_id,
            accepted: input.accept,
        },
    }))
}

/// GET /api/v1/follow-requests/pending
///
/// Requests awaiting the caller's review, oldest first.
pub async fn list_pending(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<PendingRequest>>>> {
    let pending = FollowRepo::list_pending_for(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: pending }))
}
