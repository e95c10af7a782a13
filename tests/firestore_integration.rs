// SPDX-License-Identifier: MIT

//! Firestore integration tests.
//!
//! These run against the Firestore emulator and are skipped when
//! FIRESTORE_EMULATOR_HOST is not set.

use liftlog::db::firestore::SESSION_TTL_DAYS;
use liftlog::models::{generate_id, User};
use liftlog::services::{OauthExchangeService, OauthSessionData};
use liftlog::time_utils::format_utc_rfc3339;

mod common;

fn unique_email(tag: &str) -> String {
    format!("{}-{}@example.com", tag, generate_id("t"))
}

#[tokio::test]
async fn test_user_roundtrip() {
    require_emulator!();
    let db = common::test_db().await;

    let user = User {
        user_id: generate_id("user"),
        email: unique_email("roundtrip"),
        name: "Integration Test".to_string(),
        picture: None,
        password_hash: None,
        created_at: format_utc_rfc3339(chrono::Utc::now()),
    };
    db.upsert_user(&user).await.expect("Upsert should succeed");

    let by_id = db
        .get_user(&user.user_id)
        .await
        .expect("Get should succeed")
        .expect("User should exist");
    assert_eq!(by_id.email, user.email);

    let by_email = db
        .get_user_by_email(&user.email)
        .await
        .expect("Query should succeed")
        .expect("User should be found by email");
    assert_eq!(by_email.user_id, user.user_id);
}

#[tokio::test]
async fn test_put_session_supersedes_previous() {
    require_emulator!();
    let db = common::test_db().await;

    let user_id = generate_id("user");
    let ttl = chrono::Duration::days(SESSION_TTL_DAYS);

    db.put_session(&user_id, "first-token", ttl)
        .await
        .expect("First put should succeed");
    db.put_session(&user_id, "second-token", ttl)
        .await
        .expect("Second put should succeed");

    // The earlier record is purged, not merely shadowed
    assert!(db
        .get_session("first-token")
        .await
        .expect("Get should succeed")
        .is_none());
    assert!(db
        .get_session("second-token")
        .await
        .expect("Get should succeed")
        .is_some());
}

#[tokio::test]
async fn test_concurrent_put_session_race_accepted() {
    require_emulator!();
    let db = common::test_db().await;

    let user_id = generate_id("user");
    let ttl = chrono::Duration::days(SESSION_TTL_DAYS);

    // The purge and the insert inside put_session are separate document
    // writes. Two concurrent calls for the same user can interleave so
    // that both records end up live (each purge runs before the other
    // insert lands). That dual-live outcome is accepted; what must hold
    // is that neither call fails and at least one token resolves.
    let (first, second) = tokio::join!(
        db.put_session(&user_id, "race-token-a", ttl),
        db.put_session(&user_id, "race-token-b", ttl),
    );
    first.expect("Concurrent put should succeed");
    second.expect("Concurrent put should succeed");

    let live_a = db
        .get_session("race-token-a")
        .await
        .expect("Get should succeed")
        .is_some();
    let live_b = db
        .get_session("race-token-b")
        .await
        .expect("Get should succeed")
        .is_some();

    // One or both may be live; never zero.
    assert!(live_a || live_b);
}

#[tokio::test]
async fn test_delete_session_is_exact_match() {
    require_emulator!();
    let db = common::test_db().await;

    let user_id = generate_id("user");
    let ttl = chrono::Duration::days(SESSION_TTL_DAYS);
    db.put_session(&user_id, "keep-this-token", ttl)
        .await
        .expect("Put should succeed");

    db.delete_session("some-other-token")
        .await
        .expect("Deleting an absent token is a no-op");

    assert!(db
        .get_session("keep-this-token")
        .await
        .expect("Get should succeed")
        .is_some());
}

#[tokio::test]
async fn test_oauth_materialize_is_idempotent_per_email() {
    require_emulator!();
    let db = common::test_db().await;
    let service = OauthExchangeService::new("http://unused.invalid".to_string(), db.clone())
        .expect("Service should build");

    let email = unique_email("oauth");
    let first = OauthSessionData {
        email: email.clone(),
        name: "First Name".to_string(),
        picture: None,
        session_token: "oauth-token-1".to_string(),
    };
    let second = OauthSessionData {
        email: email.clone(),
        name: "Updated Name".to_string(),
        picture: Some("https://example.com/p.png".to_string()),
        session_token: "oauth-token-2".to_string(),
    };

    let (user_a, _) = service
        .materialize(first)
        .await
        .expect("First exchange should succeed");
    let (user_b, _) = service
        .materialize(second)
        .await
        .expect("Second exchange should succeed");

    // Same account, refreshed attributes
    assert_eq!(user_a.user_id, user_b.user_id);
    assert_eq!(user_b.name, "Updated Name");
    assert!(user_b.password_hash.is_none());

    // The second exchange supersedes the first session token
    assert!(db
        .get_session("oauth-token-1")
        .await
        .expect("Get should succeed")
        .is_none());
    assert!(db
        .get_session("oauth-token-2")
        .await
        .expect("Get should succeed")
        .is_some());
}

#[tokio::test]
async fn test_workout_and_session_cascade() {
    require_emulator!();
    let db = common::test_db().await;

    use liftlog::models::{TrainingSession, Workout};

    let user_id = generate_id("user");
    let workout = Workout {
        workout_id: generate_id("workout"),
        user_id: user_id.clone(),
        name: "Cascade Test".to_string(),
        description: String::new(),
        days: Vec::new(),
        created_at: format_utc_rfc3339(chrono::Utc::now()),
    };
    db.upsert_workout(&workout)
        .await
        .expect("Upsert should succeed");

    for date in ["2024-06-01", "2024-06-03"] {
        let session = TrainingSession {
            session_id: generate_id("session"),
            user_id: user_id.clone(),
            workout_id: workout.workout_id.clone(),
            workout_name: workout.name.clone(),
            day_index: 0,
            day_name: String::new(),
            date: date.to_string(),
            exercises: Vec::new(),
            created_at: format_utc_rfc3339(chrono::Utc::now()),
        };
        db.upsert_training_session(&session)
            .await
            .expect("Upsert should succeed");
    }

    let deleted = db
        .delete_sessions_for_workout(&user_id, &workout.workout_id)
        .await
        .expect("Cascade should succeed");
    assert_eq!(deleted, 2);

    let remaining = db
        .list_training_sessions(
            &user_id,
            Some(&workout.workout_id),
            firestore::FirestoreQueryDirection::Ascending,
        )
        .await
        .expect("List should succeed");
    assert!(remaining.is_empty());
}
