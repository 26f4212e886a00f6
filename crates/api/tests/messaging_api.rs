//! HTTP-level integration tests for conversations and messages.
//!
//! Covers the full scenario: request -> accept -> conversation -> message
//! -> unread counter -> mark read, plus the connection gate and
//! participant checks.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, connect_users, get_auth, post_auth, post_json_auth, register_user,
};
use sqlx::PgPool;

/// Open a conversation between connected users and return its id.
async fn open_conversation(pool: &PgPool, token: &str, peer_id: i64) -> i64 {
    let response = post_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/conversations/{peer_id}"),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Connection gate
// ---------------------------------------------------------------------------

/// Strangers cannot open a conversation; a pending request is not enough.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_conversation_requires_connection(pool: PgPool) {
    let (_alice_id, alice_token) = register_user(common::build_test_app(pool.clone()), "alice").await;
    let (bob_id, _bob_token) = register_user(common::build_test_app(pool.clone()), "bob").await;

    let response = post_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/conversations/{bob_id}"),
        &alice_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // A pending request does not open the gate.
    let body = serde_json::json!({ "followee_id": bob_id });
    post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/follow-requests",
        body,
        &alice_token,
    )
    .await;

    let response = post_auth(
        common::build_test_app(pool),
        &format!("/api/v1/conversations/{bob_id}"),
        &alice_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Conversations with yourself or unknown users are rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_conversation_peer_validation(pool: PgPool) {
    let (alice_id, alice_token) = register_user(common::build_test_app(pool.clone()), "alice").await;

    let response = post_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/conversations/{alice_id}"),
        &alice_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_auth(
        common::build_test_app(pool),
        "/api/v1/conversations/999999",
        &alice_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Both sides resolve to the same conversation.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_conversation_shared_between_peers(pool: PgPool) {
    let (alice_id, alice_token) = register_user(common::build_test_app(pool.clone()), "alice").await;
    let (bob_id, bob_token) = register_user(common::build_test_app(pool.clone()), "bob").await;
    connect_users(&pool, &alice_token, bob_id, &bob_token).await;

    let from_alice = open_conversation(&pool, &alice_token, bob_id).await;
    let from_bob = open_conversation(&pool, &bob_token, alice_id).await;
    assert_eq!(from_alice, from_bob);
}

// ---------------------------------------------------------------------------
// Messaging flow
// ---------------------------------------------------------------------------

/// Full scenario: connect, converse, message, unread, mark read.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_full_messaging_scenario(pool: PgPool) {
    let (_alice_id, alice_token) = register_user(common::build_test_app(pool.clone()), "alice").await;
    let (bob_id, bob_token) = register_user(common::build_test_app(pool.clone()), "bob").await;
    connect_users(&pool, &alice_token, bob_id, &bob_token).await;

    let convo_id = open_conversation(&pool, &alice_token, bob_id).await;

    // Alice says hello.
    let body = serde_json::json!({ "body": "hello" });
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/conversations/{convo_id}/messages"),
        body,
        &alice_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["body"], "hello");

    // Bob's inbox shows one unread from alice.
    let response = get_auth(common::build_test_app(pool.clone()), "/api/v1/conversations", &bob_token).await;
    let json = body_json(response).await;
    let inbox = json["data"].as_array().unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0]["peer_display_name"], "alice");
    assert_eq!(inbox[0]["last_message"], "hello");
    assert_eq!(inbox[0]["unread_count"], 1);

    // Alice's own inbox shows zero unread.
    let response = get_auth(common::build_test_app(pool.clone()), "/api/v1/conversations", &alice_token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["unread_count"], 0);

    // Bob reads the thread.
    let response = post_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/conversations/{convo_id}/read"),
        &bob_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(common::build_test_app(pool.clone()), "/api/v1/conversations", &bob_token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["unread_count"], 0);

    // The history carries the read receipt.
    let response = get_auth(
        common::build_test_app(pool),
        &format!("/api/v1/conversations/{convo_id}/messages"),
        &alice_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let messages = json["data"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["read_by"][0], bob_id);
}

/// Messages keep their send order in the history.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_message_history_in_order(pool: PgPool) {
    let (_alice_id, alice_token) = register_user(common::build_test_app(pool.clone()), "alice").await;
    let (bob_id, bob_token) = register_user(common::build_test_app(pool.clone()), "bob").await;
    connect_users(&pool, &alice_token, bob_id, &bob_token).await;
    let convo_id = open_conversation(&pool, &alice_token, bob_id).await;

    for (token, text) in [(&alice_token, "one"), (&bob_token, "two"), (&alice_token, "three")] {
        let body = serde_json::json!({ "body": text });
        post_json_auth(
            common::build_test_app(pool.clone()),
            &format!("/api/v1/conversations/{convo_id}/messages"),
            body,
            token,
        )
        .await;
    }

    let response = get_auth(
        common::build_test_app(pool),
        &format!("/api/v1/conversations/{convo_id}/messages"),
        &bob_token,
    )
    .await;
    let json = body_json(response).await;
    let bodies: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["body"].as_str().unwrap())
        .collect();
    assert_eq!(bodies, ["one", "two", "three"]);
}

/// An empty message body is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_empty_message_rejected(pool: PgPool) {
    let (_alice_id, alice_token) = register_user(common::build_test_app(pool.clone()), "alice").await;
    let (bob_id, bob_token) = register_user(common::build_test_app(pool.clone()), "bob").await;
    connect_users(&pool, &alice_token, bob_id, &bob_token).await;
    let convo_id = open_conversation(&pool, &alice_token, bob_id).await;

    let body = serde_json::json!({ "body": "   " });
    let response = post_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/conversations/{convo_id}/messages"),
        body,
        &alice_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Non-participants cannot read, write, or mark a conversation.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_outsider_locked_out(pool: PgPool) {
    let (_alice_id, alice_token) = register_user(common::build_test_app(pool.clone()), "alice").await;
    let (bob_id, bob_token) = register_user(common::build_test_app(pool.clone()), "bob").await;
    let (_carol_id, carol_token) = register_user(common::build_test_app(pool.clone()), "carol").await;
    connect_users(&pool, &alice_token, bob_id, &bob_token).await;
    let convo_id = open_conversation(&pool, &alice_token, bob_id).await;

    let response = get_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/conversations/{convo_id}/messages"),
        &carol_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = serde_json::json!({ "body": "intruding" });
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/conversations/{convo_id}/messages"),
        body,
        &carol_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/conversations/{convo_id}/read"),
        &carol_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Carol's inbox stays empty.
    let response = get_auth(common::build_test_app(pool), "/api/v1/conversations", &carol_token).await;
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

/// An unknown conversation id returns 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_conversation(pool: PgPool) {
    let (_alice_id, token) = register_user(common::build_test_app(pool.clone()), "alice").await;

    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/conversations/999999/messages",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
