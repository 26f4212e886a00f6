//! Handlers for the `/conversations` resource.
//!
//! Messaging is connection-gated: a conversation can only be opened between
//! users joined by an accepted follow edge in at least one direction.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use connecthub_core::error::CoreError;
use connecthub_core::types::DbId;
use connecthub_db::models::conversation::{Conversation, ConversationSummary};
use connecthub_db::models::message::{Message, MessageWithReads, SendMessage};
use connecthub_db::repositories::{ConversationRepo, FollowRepo, MessageRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/conversations/{peer_id}
///
/// Fetch or create the caller's conversation with `peer_id`.
pub async fn open_conversation(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(peer_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Conversation>>> {
    // 1. No conversation with yourself.
    if peer_id == auth.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "Cannot start a conversation with yourself".into(),
        )));
    }

    // 2. The peer must exist.
    UserRepo::find_by_id(&state.pool, peer_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: peer_id,
        }))?;

    // 3. Messaging requires a connection.
    if !FollowRepo::are_connected(&state.pool, auth.user_id, peer_id).await? {
        return Err(AppError::Core(CoreError::Forbidden(
            "Users are not connected".into(),
        )));
    }

    // 4. One conversation per pair; the canonical-pair upsert settles races.
    let conversation = ConversationRepo::get_or_create(&state.pool, auth.user_id, peer_id).await?;
    Ok(Json(DataResponse { data: conversation }))
}

/// GET /api/v1/conversations
///
/// The caller's inbox, most recent activity first, with unread counts.
pub async fn list_conversations(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ConversationSummary>>>> {
    let conversations = ConversationRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: conversations,
    }))
}

/// POST /api/v1/conversations/{id}/messages
///
/// Append a message to a conversation the caller participates in.
pub async fn send_message(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(conversation_id): Path<DbId>,
    Json(input): Json<SendMessage>,
) -> AppResult<(StatusCode, Json<DataResponse<Message>>)> {
    let conversation = participant_conversation(&state, conversation_id, auth.user_id).await?;

    let body = input.body.trim();
    if body.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Message body must not be empty".into(),
        )));
    }

    let message = MessageRepo::send(&state.pool, conversation.id, auth.user_id, body).await?;

    tracing::info!(
        message_id = message.id,
        conversation_id,
        sender_id = auth.user_id,
        "Message sent"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: message })))
}

/// GET /api/v1/conversations/{id}/messages
///
/// Full history of a conversation, oldest first, with read receipts.
pub async fn list_messages(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(conversation_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<MessageWithReads>>>> {
    let conversation = participant_conversation(&state, conversation_id, auth.user_id).await?;
    let messages = MessageRepo::list_for_conversation(&state.pool, conversation.id).await?;
    Ok(Json(DataResponse { data: messages }))
}

/// POST /api/v1/conversations/{id}/read
///
/// Mark every message in the conversation as read by the caller.
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(conversation_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let conversation = participant_conversation(&state, conversation_id, auth.user_id).await?;
    MessageRepo::mark_read(&state.pool, conversation.id, auth.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Resolve a conversation and check the caller participates in it.
async fn participant_conversation(
    state: &AppState,
    conversation_id: DbId,
    user_id: DbId,
) -> Result<Conversation, AppError> {
    let conversation = ConversationRepo::find_by_id(&state.pool, conversation_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Conversation",
            id: conversation_id,
        }))?;

    if !conversation.has_participant(user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not a participant in this conversation".into(),
        )));
    }

    Ok(conversation)
}
