//! Integration tests for the follow graph repository.
//!
//! Exercises the repository layer against a real database:
//! - Pending request creation and pair uniqueness
//! - Accept / reject transitions and their status guards
//! - Connection listing and membership checks
//! - Suggestion candidate exclusions

use assert_matches::assert_matches;
use sqlx::PgPool;

use connecthub_db::models::follow_edge::{STATUS_ACCEPTED, STATUS_PENDING};
use connecthub_db::models::user::CreateUser;
use connecthub_db::repositories::{FollowRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_user(pool: &PgPool, name: &str) -> i64 {
    let input = CreateUser {
        email: format!("{name}@test.com"),
        display_name: name.to_string(),
        bio: String::new(),
        password_hash: "irrelevant-for-graph-tests".to_string(),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
        .id
}

// ---------------------------------------------------------------------------
// Request lifecycle
// ---------------------------------------------------------------------------

/// A new request is created pending with no response timestamp.
#[sqlx::test(migrations = "./migrations")]
async fn test_create_request_is_pending(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;

    let edge = FollowRepo::create_request(&pool, alice, bob)
        .await
        .expect("query should succeed")
        .expect("request should be created");

    assert_eq!(edge.follower_id, alice);
    assert_eq!(edge.followee_id, bob);
    assert_eq!(edge.status, STATUS_PENDING);
    assert!(edge.responded_at.is_none());
}

/// A duplicate request for the same ordered pair is rejected.
#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_request_returns_none(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;

    FollowRepo::create_request(&pool, alice, bob)
        .await
        .expect("query should succeed")
        .expect("first request should be created");

    let duplicate = FollowRepo::create_request(&pool, alice, bob)
        .await
        .expect("query should succeed");
    assert!(duplicate.is_none(), "duplicate pair must be rejected");
}

/// A request in the reverse direction is a distinct edge.
#[sqlx::test(migrations = "./migrations")]
async fn test_reverse_direction_is_distinct_edge(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;

    FollowRepo::create_request(&pool, alice, bob)
        .await
        .expect("query should succeed")
        .expect("forward request should be created");

    let reverse = FollowRepo::create_request(&pool, bob, alice)
        .await
        .expect("query should succeed");
    assert!(reverse.is_some(), "reverse direction is its own pair");
}

/// Self-follow violates the check constraint.
#[sqlx::test(migrations = "./migrations")]
async fn test_self_follow_rejected_by_schema(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;

    let result = FollowRepo::create_request(&pool, alice, alice).await;
    assert_matches!(result, Err(sqlx::Error::Database(_)));
}

// ---------------------------------------------------------------------------
// Accept / reject
// ---------------------------------------------------------------------------

/// Accepting a pending request flips status and stamps responded_at.
#[sqlx::test(migrations = "./migrations")]
async fn test_accept_pending_request(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;

    let edge = FollowRepo::create_request(&pool, alice, bob)
        .await
        .unwrap()
        .unwrap();

    let accepted = FollowRepo::accept(&pool, edge.id)
        .await
        .expect("query should succeed")
        .expect("pending edge should accept");

    assert_eq!(accepted.status, STATUS_ACCEPTED);
    assert!(accepted.responded_at.is_some());
    assert!(FollowRepo::are_connected(&pool, alice, bob).await.unwrap());
    assert!(FollowRepo::are_connected(&pool, bob, alice).await.unwrap());
}

/// Accepting twice loses the second time: the status guard sees no
/// pending row left.
#[sqlx::test(migrations = "./migrations")]
async fn test_double_accept_loses_cleanly(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;

    let edge = FollowRepo::create_request(&pool, alice, bob)
        .await
        .unwrap()
        .unwrap();

    assert!(FollowRepo::accept(&pool, edge.id).await.unwrap().is_some());
    assert!(
        FollowRepo::accept(&pool, edge.id).await.unwrap().is_none(),
        "second accept must find no pending row"
    );
}

/// Rejecting deletes the edge so the requester can ask again.
#[sqlx::test(migrations = "./migrations")]
async fn test_reject_deletes_edge_and_allows_retry(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;

    let edge = FollowRepo::create_request(&pool, alice, bob)
        .await
        .unwrap()
        .unwrap();

    assert!(FollowRepo::reject(&pool, edge.id).await.unwrap());
    assert!(FollowRepo::find_by_id(&pool, edge.id).await.unwrap().is_none());

    // The pair is free again.
    let retry = FollowRepo::create_request(&pool, alice, bob).await.unwrap();
    assert!(retry.is_some(), "rejected pair must be requestable again");
}

/// Rejecting an accepted edge does nothing: connections cannot be
/// severed through the reject path.
#[sqlx::test(migrations = "./migrations")]
async fn test_reject_after_accept_is_noop(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;

    let edge = FollowRepo::create_request(&pool, alice, bob)
        .await
        .unwrap()
        .unwrap();
    FollowRepo::accept(&pool, edge.id).await.unwrap().unwrap();

    assert!(!FollowRepo::reject(&pool, edge.id).await.unwrap());
    assert!(FollowRepo::are_connected(&pool, alice, bob).await.unwrap());
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

/// Pending listing shows only requests aimed at the reviewer, oldest first.
#[sqlx::test(migrations = "./migrations")]
async fn test_list_pending_oldest_first(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;
    let carol = create_user(&pool, "carol").await;

    FollowRepo::create_request(&pool, alice, carol).await.unwrap();
    FollowRepo::create_request(&pool, bob, carol).await.unwrap();
    // Noise: a request carol herself sent must not appear in her inbox.
    FollowRepo::create_request(&pool, carol, alice).await.unwrap();

    let pending = FollowRepo::list_pending_for(&pool, carol).await.unwrap();
    assert_eq!(pending.len(), 2);
    assert_eq!(pending[0].follower_display_name, "alice");
    assert_eq!(pending[1].follower_display_name, "bob");
}

/// Connections list includes accepted edges from both directions.
#[sqlx::test(migrations = "./migrations")]
async fn test_list_connections_both_directions(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;
    let carol = create_user(&pool, "carol").await;

    // alice -> bob accepted; carol -> alice accepted; alice -> carol impossible then.
    let e1 = FollowRepo::create_request(&pool, alice, bob).await.unwrap().unwrap();
    FollowRepo::accept(&pool, e1.id).await.unwrap().unwrap();
    let e2 = FollowRepo::create_request(&pool, carol, alice).await.unwrap().unwrap();
    FollowRepo::accept(&pool, e2.id).await.unwrap().unwrap();

    let connections = FollowRepo::list_connections(&pool, alice).await.unwrap();
    let names: Vec<&str> = connections.iter().map(|u| u.display_name.as_str()).collect();
    assert_eq!(names, ["bob", "carol"]);
}

/// Pending edges are not connections.
#[sqlx::test(migrations = "./migrations")]
async fn test_pending_edge_is_not_a_connection(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;

    FollowRepo::create_request(&pool, alice, bob).await.unwrap();

    assert!(!FollowRepo::are_connected(&pool, alice, bob).await.unwrap());
    assert!(FollowRepo::list_connections(&pool, alice).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Suggestion candidates
// ---------------------------------------------------------------------------

/// Candidates exclude the viewer and anyone with an edge in either
/// direction, pending or accepted.
#[sqlx::test(migrations = "./migrations")]
async fn test_suggestion_candidates_exclusions(pool: PgPool) {
    let viewer = create_user(&pool, "viewer").await;
    let connected = create_user(&pool, "connected").await;
    let pending_out = create_user(&pool, "pending_out").await;
    let pending_in = create_user(&pool, "pending_in").await;
    let stranger = create_user(&pool, "stranger").await;

    let e = FollowRepo::create_request(&pool, viewer, connected).await.unwrap().unwrap();
    FollowRepo::accept(&pool, e.id).await.unwrap().unwrap();
    FollowRepo::create_request(&pool, viewer, pending_out).await.unwrap();
    FollowRepo::create_request(&pool, pending_in, viewer).await.unwrap();

    let candidates = UserRepo::suggestion_candidates(&pool, viewer).await.unwrap();
    let ids: Vec<i64> = candidates.iter().map(|u| u.id).collect();

    assert_eq!(ids, [stranger], "only the stranger is suggestible");
}
